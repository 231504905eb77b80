//! Small helpers shared by the server and its clients

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Calendar date format used on the wire (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

/// Format a calendar date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Round a money amount to 2 decimal places.
///
/// The value goes through `Decimal` so `345.305` rounds the way a person
/// would expect instead of following binary float artifacts.
pub fn round_money(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
