//! Reservation Repository
//!
//! Reservations are addressed by their business key `numberId`; the store's
//! own record id is only ever read back.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::ReservationRecord;
use crate::filter::{ReservationFilter, ReservationQuery};
use shared::models::{Reservation, ReservationCreate, ReservationUpdate};
use shared::util::format_date;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

/// Unique-index violations surface as "Database index ... already contains ..."
fn write_error(err: surrealdb::Error, number_id: i64) -> RepoError {
    let msg = err.to_string();
    if msg.contains("already contains") {
        duplicate(number_id)
    } else {
        RepoError::Database(msg)
    }
}

fn duplicate(number_id: i64) -> RepoError {
    RepoError::Duplicate(format!("Duplicated numberId {}", number_id))
}

/// WHERE clauses for the supplied filter fields, in bind-name form
fn conditions(filter: &ReservationFilter) -> Vec<&'static str> {
    let mut conditions = Vec::new();
    if filter.number_id.is_some() {
        conditions.push("numberId = $number_id");
    }
    if filter.rooms.is_some() {
        conditions.push("rooms CONTAINSANY $rooms");
    }
    if filter.status.is_some() {
        conditions.push("status = $status");
    }
    if filter.channel.is_some() {
        conditions.push("channel = $channel");
    }
    if filter.agency.is_some() {
        conditions.push("agency = $agency");
    }
    // Dates are stored as YYYY-MM-DD strings, so string order is date order
    if filter.arrival_from.is_some() {
        conditions.push("arrival >= $arrival");
    }
    if filter.departure_until.is_some() {
        conditions.push("departure <= $departure");
    }
    conditions
}

fn select_statement(filter: &ReservationFilter) -> String {
    let mut sql = String::from("SELECT * FROM reservation");
    let conditions = conditions(filter);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" LIMIT $limit START $skip");
    sql
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find_record(&self, number_id: i64) -> RepoResult<Option<ReservationRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE numberId = $number_id LIMIT 1")
            .bind(("number_id", number_id))
            .await?;
        let records: Vec<ReservationRecord> = result.take(0)?;
        Ok(records.into_iter().next())
    }

    /// Find reservation by business key
    pub async fn find_by_number_id(&self, number_id: i64) -> RepoResult<Option<Reservation>> {
        Ok(self.find_record(number_id).await?.map(Reservation::from))
    }

    /// Filtered page of reservations in store order
    ///
    /// An offset beyond what the store can address yields an empty page.
    pub async fn find_all(&self, query: &ReservationQuery) -> RepoResult<Vec<Reservation>> {
        let (Ok(skip), Ok(limit)) = (i64::try_from(query.skip), i64::try_from(query.limit)) else {
            return Ok(Vec::new());
        };

        let filter = &query.filter;
        let mut statement = self
            .base
            .db()
            .query(select_statement(&query.filter))
            .bind(("limit", limit))
            .bind(("skip", skip));

        if let Some(number_id) = filter.number_id {
            statement = statement.bind(("number_id", number_id));
        }
        if let Some(rooms) = &filter.rooms {
            statement = statement.bind(("rooms", rooms.clone()));
        }
        if let Some(status) = filter.status {
            statement = statement.bind(("status", status));
        }
        if let Some(channel) = filter.channel {
            statement = statement.bind(("channel", channel));
        }
        if let Some(agency) = filter.agency {
            statement = statement.bind(("agency", agency));
        }
        if let Some(arrival) = filter.arrival_from {
            statement = statement.bind(("arrival", format_date(arrival)));
        }
        if let Some(departure) = filter.departure_until {
            statement = statement.bind(("departure", format_date(departure)));
        }

        let records: Vec<ReservationRecord> = statement.await?.take(0)?;
        Ok(records.into_iter().map(Reservation::from).collect())
    }

    /// Largest business key in the store
    pub async fn max_number_id(&self) -> RepoResult<Option<i64>> {
        let mut result = self
            .base
            .db()
            .query("RETURN math::max((SELECT VALUE numberId FROM reservation))")
            .await?;
        let max: Option<i64> = result.take(0)?;
        Ok(max)
    }

    /// Create a new reservation; the store assigns the record id
    pub async fn create(&self, data: ReservationCreate) -> RepoResult<Reservation> {
        let reservation = Reservation::from(data).normalize()?;
        let number_id = reservation.number_id;

        if self.find_record(number_id).await?.is_some() {
            return Err(duplicate(number_id));
        }

        let created: Option<ReservationRecord> = self
            .base
            .db()
            .create(TABLE)
            .content(reservation)
            .await
            .map_err(|e| write_error(e, number_id))?;
        created
            .map(Reservation::from)
            .ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Merge `data` into the stored reservation and re-validate the result.
    ///
    /// Returns `None` when no reservation has this business key.
    pub async fn update_by_number_id(
        &self,
        number_id: i64,
        data: ReservationUpdate,
    ) -> RepoResult<Option<Reservation>> {
        let Some(existing) = self.find_record(number_id).await? else {
            return Ok(None);
        };
        let thing = existing.id.clone();

        let mut merged = data.apply_to(Reservation::from(existing)).normalize()?;
        merged.id = None;

        let updated: Vec<ReservationRecord> = self
            .base
            .db()
            .query("UPDATE $thing CONTENT $data")
            .bind(("thing", thing))
            .bind(("data", merged))
            .await
            .and_then(|mut response| response.take(0))
            .map_err(|e| write_error(e, number_id))?;

        Ok(updated.into_iter().next().map(Reservation::from))
    }

    /// Hard delete by business key; `false` when nothing matched
    pub async fn delete_by_number_id(&self, number_id: i64) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("DELETE reservation WHERE numberId = $number_id RETURN BEFORE")
            .bind(("number_id", number_id))
            .await?;
        let deleted: Vec<ReservationRecord> = result.take(0)?;
        Ok(!deleted.is_empty())
    }
}
