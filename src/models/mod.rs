pub mod telegram;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Source of a listing snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Airbnb,
    Booking,
}

impl Source {
    /// Collection holding this source's listings
    pub fn collection(&self) -> &'static str {
        match self {
            Source::Airbnb => "airbnb",
            Source::Booking => "booking",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Airbnb => write!(f, "Airbnb"),
            Source::Booking => write!(f, "Booking"),
        }
    }
}

/// Fields every stored listing exposes, regardless of source.
///
/// Grouping, freshness and prompt building are written against this trait
/// so the two record shapes never need a shared parent type.
pub trait StayListing {
    const SOURCE: Source;

    /// Check-in date, `YYYY-MM-DD`
    fn start_date(&self) -> &str;
    /// Check-out date, `YYYY-MM-DD`
    fn end_date(&self) -> &str;
    fn price(&self) -> f64;
    fn bed_configuration(&self) -> &str;
    /// Raw insertion instant as written by the scraper
    fn inserted_at(&self) -> &str;
}

/// Scrapers write `null` for fields a page did not show
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Nested listing block of an Airbnb snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AirbnbDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bed_configuration: String,
}

/// Airbnb listing snapshot for one check-in/check-out pair
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AirbnbListing {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub url: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub listing: AirbnbDetails,
    pub inserted_at: String,
}

/// Booking.com listing snapshot. Flat, and the rating is free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingListing {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub url: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bed_configuration: String,
    pub inserted_at: String,
}

impl StayListing for AirbnbListing {
    const SOURCE: Source = Source::Airbnb;

    fn start_date(&self) -> &str {
        &self.start_date
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }

    fn price(&self) -> f64 {
        self.listing.price
    }

    fn bed_configuration(&self) -> &str {
        &self.listing.bed_configuration
    }

    fn inserted_at(&self) -> &str {
        &self.inserted_at
    }
}

impl StayListing for BookingListing {
    const SOURCE: Source = Source::Booking;

    fn start_date(&self) -> &str {
        &self.start_date
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn bed_configuration(&self) -> &str {
        &self.bed_configuration
    }

    fn inserted_at(&self) -> &str {
        &self.inserted_at
    }
}

/// Aggregate statistics the scraper prints for one source
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingAnalysis {
    pub average_price: f64,
    pub highest_price: f64,
    pub lowest_price: f64,
    pub total_listings: u64,
}

impl ListingAnalysis {
    /// With no listings the price fields carry no meaning.
    pub fn is_empty(&self) -> bool {
        self.total_listings == 0
    }
}
