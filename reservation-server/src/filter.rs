//! List filters and pagination
//!
//! Turns the raw query string of `GET /reservation` into a typed
//! [`ReservationQuery`]. Every value arrives as a string so that parse
//! failures are reported with the offending field instead of a generic
//! extractor rejection.

use chrono::NaiveDate;
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{Agency, Channel, ReservationStatus};
use shared::util::parse_date;
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u64 = 100;
pub const MAX_PAGE_SIZE: u64 = 200;

/// Raw `GET /reservation` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    #[serde(rename = "numberId")]
    pub number_id: Option<String>,
    /// Dash-delimited room numbers, e.g. `1-2-3`
    pub rooms: Option<String>,
    pub status: Option<String>,
    pub channel: Option<String>,
    pub agency: Option<String>,
    /// Lower bound on arrival (inclusive), `YYYY-MM-DD`
    pub arrival: Option<String>,
    /// Upper bound on departure (inclusive), `YYYY-MM-DD`
    pub departure: Option<String>,
}

/// Conditions a stored reservation must satisfy; `None` means unconstrained
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationFilter {
    pub number_id: Option<i64>,
    /// Matches reservations sharing at least one room with this set
    pub rooms: Option<Vec<u32>>,
    pub status: Option<ReservationStatus>,
    pub channel: Option<Channel>,
    pub agency: Option<Agency>,
    pub arrival_from: Option<NaiveDate>,
    pub departure_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationQuery {
    pub filter: ReservationFilter,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("page must be a positive integer, got '{0}'")]
    Page(String),

    #[error("page_size must be between 1 and 200, got '{0}'")]
    PageSize(String),

    #[error("numberId must be an integer, got '{0}'")]
    NumberId(String),

    #[error("rooms must be dash-separated room numbers (e.g. 1-2-3), got '{0}'")]
    Rooms(String),

    #[error("{field} must be a date in YYYY-MM-DD format, got '{value}'")]
    Date { field: &'static str, value: String },

    #[error(transparent)]
    Label(#[from] shared::models::UnknownLabel),
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::invalid_request(err.to_string())
    }
}

/// Treat empty and whitespace-only values as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_rooms(raw: &str) -> Result<Vec<u32>, FilterError> {
    let mut rooms = raw
        .split('-')
        .map(|room| room.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| FilterError::Rooms(raw.to_string()))?;
    rooms.sort_unstable();
    rooms.dedup();
    Ok(rooms)
}

fn parse_date_param(field: &'static str, raw: &str) -> Result<NaiveDate, FilterError> {
    parse_date(raw).map_err(|_| FilterError::Date {
        field,
        value: raw.to_string(),
    })
}

impl ListParams {
    /// Build the store query: `skip = (page - 1) * page_size`, `limit = page_size`
    pub fn build(&self) -> Result<ReservationQuery, FilterError> {
        let page = match present(&self.page) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| FilterError::Page(raw.to_string()))?,
            None => 1,
        };

        let page_size = match present(&self.page_size) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
                .ok_or_else(|| FilterError::PageSize(raw.to_string()))?,
            None => DEFAULT_PAGE_SIZE,
        };

        // A page past every representable offset is still a valid, empty page
        let skip = (page - 1).saturating_mul(page_size);

        let filter = ReservationFilter {
            number_id: present(&self.number_id)
                .map(|raw| {
                    raw.parse::<i64>()
                        .map_err(|_| FilterError::NumberId(raw.to_string()))
                })
                .transpose()?,
            rooms: present(&self.rooms).map(parse_rooms).transpose()?,
            status: present(&self.status)
                .map(str::parse::<ReservationStatus>)
                .transpose()?,
            channel: present(&self.channel)
                .map(str::parse::<Channel>)
                .transpose()?,
            agency: present(&self.agency)
                .map(str::parse::<Agency>)
                .transpose()?,
            arrival_from: present(&self.arrival)
                .map(|raw| parse_date_param("arrival", raw))
                .transpose()?,
            departure_until: present(&self.departure)
                .map(|raw| parse_date_param("departure", raw))
                .transpose()?,
        };

        Ok(ReservationQuery {
            filter,
            skip,
            limit: page_size,
        })
    }
}
