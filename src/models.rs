//! Input models accepted by the query functions.
//!
//! Rows read back from the database live in [`crate::db`]; the types here are
//! what a caller hands in to create, update or filter records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// Request to register a user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email, unique across users.
    pub email: String,
    /// Password as supplied by the caller.
    pub password: String,
}

/// Request to list a property.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewProperty {
    /// Owning user.
    pub owner_id: i32,
    /// Listing title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Thumbnail image URL.
    pub thumbnail_photo_url: String,
    /// Cover image URL.
    pub cover_photo_url: String,
    /// Nightly price in cents.
    pub cost_per_night: i32,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// Province or state.
    pub province: String,
    /// Postal code.
    pub post_code: String,
    /// Country.
    pub country: String,
    /// Number of parking spaces.
    #[serde(default)]
    pub parking_spaces: i32,
    /// Number of bathrooms.
    #[serde(default)]
    pub number_of_bathrooms: i32,
    /// Number of bedrooms.
    #[serde(default)]
    pub number_of_bedrooms: i32,
}

impl NewProperty {
    /// Rejects negative prices and counts.
    ///
    /// # Errors
    /// Returns [`DbError::InvalidRequest`] naming the offending field.
    pub fn validate(&self) -> Result<(), DbError> {
        let counts = [
            ("cost_per_night", self.cost_per_night),
            ("parking_spaces", self.parking_spaces),
            ("number_of_bathrooms", self.number_of_bathrooms),
            ("number_of_bedrooms", self.number_of_bedrooms),
        ];

        for (field, value) in counts {
            if value < 0 {
                return Err(DbError::InvalidRequest(format!(
                    "{} cannot be negative",
                    field
                )));
            }
        }

        Ok(())
    }
}

/// Request to book a property.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewReservation {
    /// First night of the stay.
    pub start_date: NaiveDate,
    /// Checkout date.
    pub end_date: NaiveDate,
    /// Booked property.
    pub property_id: i32,
    /// Booking guest.
    pub guest_id: i32,
}

impl NewReservation {
    /// Checks that the stay covers at least one night.
    ///
    /// # Errors
    /// Returns [`DbError::InvalidRequest`] if `start_date` is not before `end_date`.
    pub fn validate(&self) -> Result<(), DbError> {
        check_date_order(self.start_date, self.end_date)
    }
}

/// Partial update of a reservation's dates.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReservationUpdate {
    /// Reservation to change.
    pub reservation_id: i32,
    /// New start date, if changing.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// New end date, if changing.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ReservationUpdate {
    /// Checks that at least one date is supplied, and that both are ordered
    /// when both are supplied.
    ///
    /// # Errors
    /// Returns [`DbError::InvalidRequest`] when there is nothing to update or
    /// the dates are reversed.
    pub fn validate(&self) -> Result<(), DbError> {
        match (self.start_date, self.end_date) {
            (None, None) => Err(DbError::InvalidRequest(
                "reservation update needs start_date or end_date".to_string(),
            )),
            (Some(start), Some(end)) => check_date_order(start, end),
            _ => Ok(()),
        }
    }
}

fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), DbError> {
    if start >= end {
        return Err(DbError::InvalidRequest(format!(
            "start_date {} must precede end_date {}",
            start, end
        )));
    }
    Ok(())
}

/// Filters for the property search.
///
/// Prices are whole currency units; they are converted to cents before
/// being compared against `cost_per_night`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PropertySearch {
    /// Substring the city must contain.
    #[serde(default)]
    pub city: Option<String>,
    /// Only properties owned by this user.
    #[serde(default)]
    pub owner_id: Option<i32>,
    /// Lowest nightly price.
    #[serde(default)]
    pub minimum_price_per_night: Option<i64>,
    /// Highest nightly price.
    #[serde(default)]
    pub maximum_price_per_night: Option<i64>,
    /// Lowest acceptable average review rating.
    #[serde(default)]
    pub minimum_rating: Option<f64>,
}

impl PropertySearch {
    /// Search restricted to a city.
    #[must_use]
    pub fn in_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    /// Minimum price in cents.
    #[must_use]
    pub fn minimum_price_cents(&self) -> Option<i64> {
        self.minimum_price_per_night.map(|p| p.saturating_mul(100))
    }

    /// Maximum price in cents.
    #[must_use]
    pub fn maximum_price_cents(&self) -> Option<i64> {
        self.maximum_price_per_night.map(|p| p.saturating_mul(100))
    }

    /// Rejects an inverted price range.
    ///
    /// # Errors
    /// Returns [`DbError::InvalidRequest`] if the minimum exceeds the maximum.
    pub fn validate(&self) -> Result<(), DbError> {
        match (self.minimum_price_per_night, self.maximum_price_per_night) {
            (Some(min), Some(max)) if min > max => Err(DbError::InvalidRequest(format!(
                "minimum_price_per_night {} exceeds maximum_price_per_night {}",
                min, max
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_reservation_valid() {
        let reservation = NewReservation {
            start_date: date(2026, 7, 1),
            end_date: date(2026, 7, 5),
            property_id: 1,
            guest_id: 2,
        };
        assert!(reservation.validate().is_ok());
    }

    #[test]
    fn test_new_reservation_same_day_rejected() {
        let reservation = NewReservation {
            start_date: date(2026, 7, 1),
            end_date: date(2026, 7, 1),
            property_id: 1,
            guest_id: 2,
        };
        assert!(matches!(
            reservation.validate(),
            Err(DbError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_update_without_dates_rejected() {
        let update = ReservationUpdate {
            reservation_id: 7,
            start_date: None,
            end_date: None,
        };
        assert!(matches!(update.validate(), Err(DbError::InvalidRequest(_))));
    }

    #[test]
    fn test_update_single_date_accepted() {
        let update = ReservationUpdate {
            reservation_id: 7,
            start_date: None,
            end_date: Some(date(2026, 1, 1)),
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_reversed_dates_rejected() {
        let update = ReservationUpdate {
            reservation_id: 7,
            start_date: Some(date(2026, 2, 1)),
            end_date: Some(date(2026, 1, 1)),
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_deserialize_missing_fields() {
        let update: ReservationUpdate =
            serde_json::from_str(r#"{"reservation_id": 7, "start_date": "2026-03-01"}"#).unwrap();
        assert_eq!(update.reservation_id, 7);
        assert_eq!(update.start_date, Some(date(2026, 3, 1)));
        assert!(update.end_date.is_none());
    }

    #[test]
    fn test_property_search_price_conversion() {
        let search = PropertySearch {
            minimum_price_per_night: Some(50),
            maximum_price_per_night: Some(150),
            ..PropertySearch::default()
        };
        assert_eq!(search.minimum_price_cents(), Some(5000));
        assert_eq!(search.maximum_price_cents(), Some(15000));
        assert!(search.validate().is_ok());
    }

    #[test]
    fn test_property_search_inverted_range() {
        let search = PropertySearch {
            minimum_price_per_night: Some(200),
            maximum_price_per_night: Some(100),
            ..PropertySearch::default()
        };
        assert!(search.validate().is_err());
    }

    #[test]
    fn test_property_search_in_city() {
        let search = PropertySearch::in_city("Vancouver");
        assert_eq!(search.city.as_deref(), Some("Vancouver"));
        assert!(search.owner_id.is_none());
    }

    #[test]
    fn test_new_property_negative_cost_rejected() {
        let property: NewProperty = serde_json::from_str(
            r#"{
                "owner_id": 1,
                "title": "Cabin",
                "thumbnail_photo_url": "https://example.com/t.jpg",
                "cover_photo_url": "https://example.com/c.jpg",
                "cost_per_night": -100,
                "street": "1 Lake Rd",
                "city": "Whistler",
                "province": "BC",
                "post_code": "V0N",
                "country": "Canada"
            }"#,
        )
        .unwrap();
        assert_eq!(property.description, "");
        assert_eq!(property.parking_spaces, 0);
        assert!(matches!(
            property.validate(),
            Err(DbError::InvalidRequest(msg)) if msg.contains("cost_per_night")
        ));
    }
}
