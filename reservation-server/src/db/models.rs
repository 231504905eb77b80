//! Database row types
//!
//! Rows carry the native [`RecordId`]; the wire model in `shared` exposes it
//! as a `table:key` string.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{Agency, Channel, Reservation, ReservationStatus};
use surrealdb::RecordId;

/// Reservation row as stored in the `reservation` table
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    pub id: RecordId,
    pub number_id: i64,
    pub status: ReservationStatus,
    pub name: String,
    pub rooms: Vec<u32>,
    pub channel: Channel,
    #[serde(default)]
    pub agency: Option<Agency>,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    pub pax: u32,
    pub price: f64,
    pub tax: f64,
    #[serde(default)]
    pub notes: String,
}

impl From<ReservationRecord> for Reservation {
    fn from(record: ReservationRecord) -> Self {
        Self {
            id: Some(record.id.to_string()),
            number_id: record.number_id,
            status: record.status,
            name: record.name,
            rooms: record.rooms,
            channel: record.channel,
            agency: record.agency,
            arrival: record.arrival,
            departure: record.departure,
            pax: record.pax,
            price: record.price,
            tax: record.tax,
            notes: record.notes,
        }
    }
}

/// Admin credential row (`admin` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
}
