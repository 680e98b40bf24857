use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

/// Calendar date of a trading session, written `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl TryFrom<String> for TradingDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TradingDate> for String {
    fn from(value: TradingDate) -> Self {
        value.to_string()
    }
}

/// Outcome label of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Self::Up),
            "DOWN" => Ok(Self::Down),
            _ => Err(ValidationError::InvalidDirection {
                value: input.to_owned(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Direction {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Direction> for String {
    fn from(value: Direction) -> Self {
        value.as_str().to_owned()
    }
}

/// One historical trading day to replay as a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HistoricalDayRecord")]
pub struct HistoricalDay {
    pub date: TradingDate,
    pub open: f64,
    pub close: f64,
    pub result: Direction,
}

impl HistoricalDay {
    pub fn new(
        date: TradingDate,
        open: f64,
        close: f64,
        result: Direction,
    ) -> Result<Self, ValidationError> {
        validate_price("open", open)?;
        validate_price("close", close)?;

        Ok(Self {
            date,
            open,
            close,
            result,
        })
    }

    /// Direction implied by the prices, `None` for an unchanged close.
    pub fn implied_direction(&self) -> Option<Direction> {
        match self.close.partial_cmp(&self.open) {
            Some(Ordering::Greater) => Some(Direction::Up),
            Some(Ordering::Less) => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.implied_direction() == Some(self.result)
    }

    /// Progress line printed before the day's round is created.
    pub fn banner(&self) -> String {
        format!(
            "--- {}: SPY {:.2} -> {:.2} ({}) ---",
            self.date, self.open, self.close, self.result
        )
    }
}

#[derive(Deserialize)]
struct HistoricalDayRecord {
    date: TradingDate,
    open: f64,
    close: f64,
    result: Direction,
}

impl TryFrom<HistoricalDayRecord> for HistoricalDay {
    type Error = ValidationError;

    fn try_from(value: HistoricalDayRecord) -> Result<Self, Self::Error> {
        Self::new(value.date, value.open, value.close, value.result)
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}
