pub mod mongo;

use crate::models::{AirbnbListing, BookingListing};
use crate::scrapers::DateRange;
use anyhow::Result;
use async_trait::async_trait;

pub use mongo::MongoStore;

/// Read access to persisted listing snapshots.
///
/// Both queries return every listing with `start_date >= range.start` and
/// `end_date <= range.end`, in no particular order. An empty match is an
/// empty vector, never an error.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn airbnb_by_date(&self, range: &DateRange) -> Result<Vec<AirbnbListing>>;

    async fn booking_by_date(&self, range: &DateRange) -> Result<Vec<BookingListing>>;
}
