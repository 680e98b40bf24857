//! Client for the rounds service endpoints a backfill touches.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::BackfillConfig;
use crate::domain::{AgentSummary, HistoricalDay, LeaderboardPage};
use crate::error::{BackfillError, RemoteCall};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, HttpResponse};

pub const LEADERBOARD_PATH: &str = "/api/leaderboard";
pub const CREATE_ROUND_PATH: &str = "/api/admin/create-round";
pub const BACKFILL_PATH: &str = "/api/admin/backfill";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRoundBody {
    open_price: f64,
}

#[derive(Debug, Serialize)]
struct BackfillBody<'a> {
    days: &'a [HistoricalDay],
}

/// Admin and public endpoints of the rounds service.
#[derive(Clone)]
pub struct AdminApi {
    http_client: Arc<dyn HttpClient>,
    config: BackfillConfig,
}

impl AdminApi {
    pub fn new(http_client: Arc<dyn HttpClient>, config: BackfillConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &BackfillConfig {
        &self.config
    }

    /// `GET /api/leaderboard?limit=N`, unauthenticated.
    pub async fn fetch_leaderboard(&self, limit: u32) -> Result<Vec<AgentSummary>, BackfillError> {
        let request = HttpRequest::get(self.config.endpoint(LEADERBOARD_PATH))
            .with_query("limit", limit.to_string())
            .with_auth(&HttpAuth::None);

        let page: LeaderboardPage = self.send_json(RemoteCall::Leaderboard, request).await?;
        Ok(page.leaderboard)
    }

    /// `POST /api/admin/create-round` carrying only the opening price.
    pub async fn create_round(&self, open_price: f64) -> Result<Value, BackfillError> {
        let body = serde_json::to_string(&CreateRoundBody { open_price })?;
        let request = HttpRequest::post(self.config.endpoint(CREATE_ROUND_PATH))
            .with_auth(&self.config.admin_key.auth())
            .with_json_body(body);

        self.send_json(RemoteCall::CreateRound, request).await
    }

    /// `POST /api/admin/backfill` with full open/close/result records.
    pub async fn submit_history(&self, days: &[HistoricalDay]) -> Result<Value, BackfillError> {
        let body = serde_json::to_string(&BackfillBody { days })?;
        let request = HttpRequest::post(self.config.endpoint(BACKFILL_PATH))
            .with_auth(&self.config.admin_key.auth())
            .with_json_body(body);

        self.send_json(RemoteCall::SubmitHistory, request).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        call: RemoteCall,
        request: HttpRequest,
    ) -> Result<T, BackfillError> {
        let response = self.send(call, request).await?;
        serde_json::from_str(&response.body).map_err(|source| BackfillError::Decode { call, source })
    }

    async fn send(
        &self,
        call: RemoteCall,
        request: HttpRequest,
    ) -> Result<HttpResponse, BackfillError> {
        let request = request.with_timeout_ms(self.config.timeout_ms);
        let retry = &self.config.retry;
        let mut attempt: u32 = 0;

        loop {
            let outcome = self.http_client.execute(request.clone()).await;

            if retry.should_retry(attempt, &outcome) {
                let delay = retry.delay_for_attempt(attempt);
                match &outcome {
                    Ok(response) => warn!(
                        call = call.as_str(),
                        status = response.status,
                        attempt = attempt.saturating_add(1),
                        delay_ms = delay.as_millis() as u64,
                        "retrying after transient status"
                    ),
                    Err(error) => warn!(
                        call = call.as_str(),
                        error = error.message(),
                        attempt = attempt.saturating_add(1),
                        delay_ms = delay.as_millis() as u64,
                        "retrying after transport error"
                    ),
                }
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let response = outcome.map_err(|source| BackfillError::Transport { call, source })?;
            debug!(
                call = call.as_str(),
                method = request.method.as_str(),
                path = request.path(),
                status = response.status,
                attempt = attempt.saturating_add(1),
                "remote call completed"
            );

            if !response.is_success() {
                return Err(BackfillError::Status {
                    call,
                    status: response.status,
                    body: response.body,
                });
            }

            return Ok(response);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::config::AdminKey;
    use crate::http_client::{HttpError, HttpMethod, ScriptedHttpClient};
    use crate::retry::RetryConfig;

    fn api(client: Arc<ScriptedHttpClient>, retry: RetryConfig) -> AdminApi {
        let config = BackfillConfig::new(
            "https://rounds.test",
            AdminKey::new("admin-secret").expect("key"),
        )
        .expect("config")
        .with_retry(retry);
        AdminApi::new(client, config)
    }

    #[tokio::test]
    async fn leaderboard_request_is_unauthenticated_with_limit() {
        let client = Arc::new(ScriptedHttpClient::with_responses([Ok(
            HttpResponse::ok_json(r#"{"leaderboard":[{"rank":1},{"rank":2},{"rank":3}]}"#),
        )]));

        let agents = api(client.clone(), RetryConfig::no_retry())
            .fetch_leaderboard(200)
            .await
            .expect("leaderboard");

        assert_eq!(agents.len(), 3);
        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(
            requests[0].full_url(),
            "https://rounds.test/api/leaderboard?limit=200"
        );
        assert!(!requests[0].headers.contains_key("x-admin-key"));
    }

    #[tokio::test]
    async fn create_round_sends_open_price_with_admin_header() {
        let client = Arc::new(ScriptedHttpClient::with_responses([Ok(
            HttpResponse::ok_json(r#"{"success":true,"roundId":"2026-02-03"}"#),
        )]));

        let body = api(client.clone(), RetryConfig::no_retry())
            .create_round(696.21)
            .await
            .expect("create round");

        assert_eq!(body["roundId"], "2026-02-03");
        let requests = client.requests();
        let request = &requests[0];
        assert_eq!(request.path(), CREATE_ROUND_PATH);
        assert_eq!(request.body.as_deref(), Some(r#"{"openPrice":696.21}"#));
        assert_eq!(
            request.headers.get("x-admin-key").map(String::as_str),
            Some("admin-secret")
        );
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error_with_body() {
        let client = Arc::new(ScriptedHttpClient::with_responses([Ok(HttpResponse::new(
            401,
            r#"{"error":"Unauthorized"}"#,
        ))]));

        let error = api(client, RetryConfig::no_retry())
            .create_round(690.35)
            .await
            .expect_err("401 must fail");

        match error {
            BackfillError::Status { call, status, body } => {
                assert_eq!(call, RemoteCall::CreateRound);
                assert_eq!(status, 401);
                assert!(body.contains("Unauthorized"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let client = Arc::new(ScriptedHttpClient::with_responses([Ok(
            HttpResponse::ok_json("<html>gateway</html>"),
        )]));

        let error = api(client, RetryConfig::no_retry())
            .fetch_leaderboard(200)
            .await
            .expect_err("html must fail");
        assert!(matches!(
            error,
            BackfillError::Decode {
                call: RemoteCall::Leaderboard,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn transient_failures_are_retried_when_enabled() {
        let client = Arc::new(ScriptedHttpClient::with_responses([
            Err(HttpError::new("connection failed")),
            Ok(HttpResponse::new(503, "busy")),
            Ok(HttpResponse::ok_json(r#"{"success":true}"#)),
        ]));

        let body = api(
            client.clone(),
            RetryConfig::fixed(Duration::from_millis(1), 2),
        )
        .create_round(680.94)
        .await
        .expect("third attempt succeeds");

        assert_eq!(body["success"], true);
        assert_eq!(client.requests().len(), 3);
    }

    #[tokio::test]
    async fn single_attempt_by_default() {
        let client = Arc::new(ScriptedHttpClient::with_responses([
            Err(HttpError::new("connection failed")),
            Ok(HttpResponse::ok_json(r#"{"success":true}"#)),
        ]));

        let error = api(client.clone(), RetryConfig::default())
            .create_round(680.94)
            .await
            .expect_err("no retry");

        assert!(matches!(error, BackfillError::Transport { .. }));
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn requests_carry_no_timeout_unless_configured() {
        let client = Arc::new(ScriptedHttpClient::with_responses([
            Ok(HttpResponse::ok_json(r#"{"leaderboard":[]}"#)),
            Ok(HttpResponse::ok_json(r#"{"success":true}"#)),
        ]));
        let api = api(client.clone(), RetryConfig::no_retry());

        api.fetch_leaderboard(200).await.expect("leaderboard");
        api.create_round(696.21).await.expect("create round");

        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|request| request.timeout_ms.is_none()));
    }

    #[tokio::test]
    async fn configured_timeout_is_applied_to_every_attempt() {
        let client = Arc::new(ScriptedHttpClient::with_responses([
            Ok(HttpResponse::ok_json(r#"{"leaderboard":[]}"#)),
            Err(HttpError::new("request timeout")),
            Ok(HttpResponse::ok_json(r#"{"success":true}"#)),
        ]));
        let config = BackfillConfig::new(
            "https://rounds.test",
            AdminKey::new("admin-secret").expect("key"),
        )
        .expect("config")
        .with_timeout_ms(Some(1500))
        .with_retry(RetryConfig::fixed(Duration::from_millis(1), 1));
        let api = AdminApi::new(client.clone(), config);

        api.fetch_leaderboard(200).await.expect("leaderboard");
        api.create_round(696.21).await.expect("retried create round");

        let requests = client.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests
            .iter()
            .all(|request| request.timeout_ms == Some(1500)));
    }

    #[tokio::test]
    async fn submit_history_posts_full_records() {
        let client = Arc::new(ScriptedHttpClient::with_responses([Ok(
            HttpResponse::ok_json(r#"{"success":true,"results":[]}"#),
        )]));
        let days = crate::history::HistorySource::load(&crate::history::BuiltinHistory)
            .expect("builtin history");

        api(client.clone(), RetryConfig::no_retry())
            .submit_history(&days[..1])
            .await
            .expect("submit");

        let requests = client.requests();
        let request = &requests[0];
        assert_eq!(request.path(), BACKFILL_PATH);
        let sent: Value =
            serde_json::from_str(request.body.as_deref().expect("body")).expect("json body");
        assert_eq!(
            sent,
            json!({"days":[{"date":"2026-02-03","open":696.21,"close":689.53,"result":"DOWN"}]})
        );
    }
}
