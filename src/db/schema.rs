//! Database row types.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// User record from the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    /// Unique identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Stored password; never serialized.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Property record from the `properties` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Property {
    /// Unique identifier.
    pub id: i32,
    /// Owning user.
    pub owner_id: i32,
    /// Listing title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Thumbnail image URL.
    pub thumbnail_photo_url: String,
    /// Cover image URL.
    pub cover_photo_url: String,
    /// Nightly price in cents (to avoid floating point issues).
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
    pub parking_spaces: i32,
    /// Number of bathrooms.
    pub number_of_bathrooms: i32,
    /// Number of bedrooms.
    pub number_of_bedrooms: i32,
}

/// Property together with its average review rating.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PropertyListing {
    /// The property row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    /// Mean of all review ratings, `None` when unreviewed.
    pub average_rating: Option<f64>,
}

/// Reservation record from the `reservations` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Reservation {
    /// Unique identifier.
    pub id: i32,
    /// First night of the stay.
    pub start_date: NaiveDate,
    /// Checkout date.
    pub end_date: NaiveDate,
    /// Booked property.
    pub property_id: i32,
    /// Booking guest.
    pub guest_id: i32,
}

/// A guest's reservation joined with the booked property.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct GuestReservation {
    /// Reservation identifier.
    pub reservation_id: i32,
    /// First night of the stay.
    pub start_date: NaiveDate,
    /// Checkout date.
    pub end_date: NaiveDate,
    /// Booking guest.
    pub guest_id: i32,
    /// The booked property.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    /// Mean review rating of the property.
    pub average_rating: Option<f64>,
}

/// Row counts across the main tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct DatabaseStats {
    /// Registered users.
    pub users: i64,
    /// Listed properties.
    pub properties: i64,
    /// Reservations of any date.
    pub reservations: i64,
}
