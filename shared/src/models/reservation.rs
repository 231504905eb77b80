//! Reservation Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::util::round_money;

/// Guest name length limit
pub const MAX_NAME_LEN: usize = 200;

/// Free-text notes length limit
pub const MAX_NOTES_LEN: usize = 2000;

labeled_enum! {
    /// Booking status
    ReservationStatus {
        Confirmed => "Confirmado",
        Cancelled => "Cancelado",
    }
}

labeled_enum! {
    /// Sales channel the booking came through
    Channel {
        Airbnb => "Airbnb",
        Booking => "Booking",
        Direct => "Directo",
        Agency => "Agencia",
        Referral => "Referido",
        Other => "Otros",
        Courtesy => "Cortesia",
        Facebook => "Facebook",
    }
}

labeled_enum! {
    /// Travel agencies the business works with
    Agency {
        Tucasaencuba => "Tucasaencuba",
        BookingHavana => "Booking havana",
        Rgn => "RGN",
        CubaRoom => "CubaRoom",
        FlyForVacations => "Fly for Vacations",
        CaptivatingCuba => "CaptivatingCuba",
        LatinAmericaTravel => "latinamericatravel",
        CubaTravel => "CubaTravel",
        Jelouu => "jelouu",
        EvolutionVoyages => "Evolution Voyages",
        DistalCaribe => "Distal Caribe",
        Alamano => "Alamano",
    }
}

/// Reservation entity
///
/// `id` is the store-assigned identifier in `table:key` form. It is never
/// written by clients and is skipped when the record is sent to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Business key, distinct from `id`
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

/// Create reservation payload
///
/// Has no `id` field, so any identifier a client sends is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
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

/// Update reservation payload (all optional)
///
/// The business key is addressed by the path and cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<Agency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pax: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Reasons a reservation is rejected before it reaches the store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidReservation {
    #[error("arrival ({arrival}) must be before departure ({departure})")]
    DateRange {
        arrival: NaiveDate,
        departure: NaiveDate,
    },

    #[error("numberId must be a positive integer")]
    NumberId,

    #[error("name must not be empty")]
    EmptyName,

    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("rooms must contain at least one room")]
    NoRooms,

    #[error("pax must be at least 1")]
    NoGuests,

    #[error("{0} must be a non-negative amount")]
    NegativeAmount(&'static str),

    #[error("agency is required when channel is 'Agencia'")]
    MissingAgency,
}

impl Reservation {
    /// Check the invariants of a reservation and bring it to canonical form.
    ///
    /// Canonical form: rooms sorted without duplicates, amounts rounded to
    /// cents, name trimmed, and no agency unless the channel is `Agency`.
    pub fn normalize(mut self) -> Result<Self, InvalidReservation> {
        if self.number_id <= 0 {
            return Err(InvalidReservation::NumberId);
        }

        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(InvalidReservation::EmptyName);
        }
        check_len("name", &self.name, MAX_NAME_LEN)?;
        check_len("notes", &self.notes, MAX_NOTES_LEN)?;

        self.rooms.sort_unstable();
        self.rooms.dedup();
        if self.rooms.is_empty() {
            return Err(InvalidReservation::NoRooms);
        }

        if self.pax == 0 {
            return Err(InvalidReservation::NoGuests);
        }

        if self.arrival >= self.departure {
            return Err(InvalidReservation::DateRange {
                arrival: self.arrival,
                departure: self.departure,
            });
        }

        if self.price.is_nan() || self.price < 0.0 {
            return Err(InvalidReservation::NegativeAmount("price"));
        }
        if self.tax.is_nan() || self.tax < 0.0 {
            return Err(InvalidReservation::NegativeAmount("tax"));
        }
        self.price = round_money(self.price);
        self.tax = round_money(self.tax);

        match self.channel {
            Channel::Agency if self.agency.is_none() => {
                return Err(InvalidReservation::MissingAgency);
            }
            Channel::Agency => {}
            _ => self.agency = None,
        }

        Ok(self)
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), InvalidReservation> {
    let len = value.chars().count();
    if len > max {
        return Err(InvalidReservation::TooLong { field, len, max });
    }
    Ok(())
}

impl From<InvalidReservation> for AppError {
    fn from(err: InvalidReservation) -> Self {
        let code = match err {
            InvalidReservation::DateRange { .. } => ErrorCode::InvalidDateRange,
            _ => ErrorCode::ValidationFailed,
        };
        AppError::with_message(code, err.to_string())
    }
}

impl From<ReservationCreate> for Reservation {
    fn from(data: ReservationCreate) -> Self {
        Self {
            id: None,
            number_id: data.number_id,
            status: data.status,
            name: data.name,
            rooms: data.rooms,
            channel: data.channel,
            agency: data.agency,
            arrival: data.arrival,
            departure: data.departure,
            pax: data.pax,
            price: data.price,
            tax: data.tax,
            notes: data.notes,
        }
    }
}

impl ReservationUpdate {
    /// Merge the supplied fields into `base`; absent fields keep their value.
    pub fn apply_to(self, mut base: Reservation) -> Reservation {
        if let Some(status) = self.status {
            base.status = status;
        }
        if let Some(name) = self.name {
            base.name = name;
        }
        if let Some(rooms) = self.rooms {
            base.rooms = rooms;
        }
        if let Some(channel) = self.channel {
            base.channel = channel;
        }
        if let Some(agency) = self.agency {
            base.agency = Some(agency);
        }
        if let Some(arrival) = self.arrival {
            base.arrival = arrival;
        }
        if let Some(departure) = self.departure {
            base.departure = departure;
        }
        if let Some(pax) = self.pax {
            base.pax = pax;
        }
        if let Some(price) = self.price {
            base.price = price;
        }
        if let Some(tax) = self.tax {
            base.tax = tax;
        }
        if let Some(notes) = self.notes {
            base.notes = notes;
        }
        base
    }
}
