//! Reservation queries.

use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, info, warn};

use crate::db::{DatabasePool, GuestReservation, Reservation, check_limit};
use crate::error::{DbError, query_failed};
use crate::models::{NewReservation, ReservationUpdate};

/// Which side of today a guest's reservations fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservationWindow {
    /// Stays that ended before today.
    Fulfilled,
    /// Stays that start after today.
    Upcoming,
}

impl ReservationWindow {
    fn sql(self) -> &'static str {
        match self {
            Self::Fulfilled => {
                r#"
                SELECT properties.*,
                    reservations.id AS reservation_id,
                    reservations.start_date,
                    reservations.end_date,
                    reservations.guest_id,
                    avg(property_reviews.rating)::float8 AS average_rating
                FROM reservations
                JOIN properties ON reservations.property_id = properties.id
                LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
                WHERE reservations.guest_id = $1
                AND reservations.end_date < now()::date
                GROUP BY properties.id, reservations.id
                ORDER BY reservations.start_date
                LIMIT $2
                "#
            }
            Self::Upcoming => {
                r#"
                SELECT properties.*,
                    reservations.id AS reservation_id,
                    reservations.start_date,
                    reservations.end_date,
                    reservations.guest_id,
                    avg(property_reviews.rating)::float8 AS average_rating
                FROM reservations
                JOIN properties ON reservations.property_id = properties.id
                LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
                WHERE reservations.guest_id = $1
                AND reservations.start_date > now()::date
                GROUP BY properties.id, reservations.id
                ORDER BY reservations.start_date
                LIMIT $2
                "#
            }
        }
    }

    fn operation(self) -> &'static str {
        match self {
            Self::Fulfilled => "get_fulfilled_reservations",
            Self::Upcoming => "get_upcoming_reservations",
        }
    }
}

/// Builds an UPDATE that sets only the dates present in `update`.
pub(crate) fn reservation_update_query(
    update: &ReservationUpdate,
) -> Result<QueryBuilder<'static, Postgres>, DbError> {
    update.validate()?;

    let mut builder = QueryBuilder::new("UPDATE reservations SET ");
    {
        let mut assignments = builder.separated(", ");
        if let Some(start_date) = update.start_date {
            assignments.push("start_date = ");
            assignments.push_bind_unseparated(start_date);
        }
        if let Some(end_date) = update.end_date {
            assignments.push("end_date = ");
            assignments.push_bind_unseparated(end_date);
        }
    }
    builder.push(" WHERE id = ");
    builder.push_bind(update.reservation_id);
    builder.push(" RETURNING *");

    Ok(builder)
}

impl DatabasePool {
    /// Gets all reservations for a single guest.
    ///
    /// Only a reservation starting at exactly the current instant is
    /// excluded, so in practice this returns every reservation up to `limit`.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: i64,
    ) -> Result<Vec<Reservation>, DbError> {
        check_limit(limit)?;

        sqlx::query_as::<_, Reservation>(
            r#"
            SELECT *
            FROM reservations
            WHERE guest_id = $1
            AND start_date != now()
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(query_failed("get_all_reservations"))
    }

    /// Gets a guest's past stays with property details, oldest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_fulfilled_reservations(
        &self,
        guest_id: i32,
        limit: i64,
    ) -> Result<Vec<GuestReservation>, DbError> {
        self.guest_reservations(guest_id, limit, ReservationWindow::Fulfilled)
            .await
    }

    /// Gets a guest's future stays with property details, soonest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_upcoming_reservations(
        &self,
        guest_id: i32,
        limit: i64,
    ) -> Result<Vec<GuestReservation>, DbError> {
        self.guest_reservations(guest_id, limit, ReservationWindow::Upcoming)
            .await
    }

    async fn guest_reservations(
        &self,
        guest_id: i32,
        limit: i64,
        window: ReservationWindow,
    ) -> Result<Vec<GuestReservation>, DbError> {
        check_limit(limit)?;
        debug!(guest_id, limit, ?window, "fetching guest reservations");

        sqlx::query_as::<_, GuestReservation>(window.sql())
            .bind(guest_id)
            .bind(limit)
            .fetch_all(self.pool())
            .await
            .map_err(query_failed(window.operation()))
    }

    /// Adds a reservation and returns the stored row.
    ///
    /// # Errors
    /// Returns [`DbError::InvalidRequest`] if the dates are not ordered or the
    /// property or guest does not exist.
    pub async fn add_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, DbError> {
        reservation.validate()?;

        let created = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (start_date, end_date, property_id, guest_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.property_id)
        .bind(reservation.guest_id)
        .fetch_one(self.pool())
        .await
        .map_err(query_failed("add_reservation"))?;

        info!(
            reservation_id = created.id,
            property_id = created.property_id,
            guest_id = created.guest_id,
            "reservation created"
        );
        Ok(created)
    }

    /// Changes the start and/or end date of a reservation.
    ///
    /// Returns `None` if no reservation has the given id.
    ///
    /// # Errors
    /// Returns [`DbError::InvalidRequest`] if neither date is supplied or the
    /// supplied dates are reversed.
    pub async fn update_reservation(
        &self,
        update: &ReservationUpdate,
    ) -> Result<Option<Reservation>, DbError> {
        let mut builder = reservation_update_query(update)?;
        debug!(sql = builder.sql(), reservation_id = update.reservation_id, "updating reservation");

        let updated = builder
            .build_query_as::<Reservation>()
            .fetch_optional(self.pool())
            .await
            .map_err(query_failed("update_reservation"))?;

        if updated.is_none() {
            warn!(reservation_id = update.reservation_id, "reservation to update not found");
        }
        Ok(updated)
    }

    /// Deletes a reservation, returning the number of rows removed.
    ///
    /// Deleting an id that does not exist is not an error; it removes zero rows.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete_reservation(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(query_failed("delete_reservation"))?;

        info!(reservation_id = id, deleted = result.rows_affected(), "reservation deleted");
        Ok(result.rows_affected())
    }

    /// Gets a single reservation by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_individual_reservation(
        &self,
        id: i32,
    ) -> Result<Option<Reservation>, DbError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(query_failed("get_individual_reservation"))
    }
}
