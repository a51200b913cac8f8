use anyhow::Result;
use async_trait::async_trait;
use stay_pricer::models::{AirbnbListing, BookingListing, StayListing};
use stay_pricer::scrapers::DateRange;
use stay_pricer::store::ListingStore;
use std::sync::RwLock;

/// In-process listing store with the same range semantics as MongoDB
#[derive(Debug, Default)]
pub struct MemoryStore {
    airbnb: RwLock<Vec<AirbnbListing>>,
    booking: RwLock<Vec<BookingListing>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(airbnb: Vec<AirbnbListing>, booking: Vec<BookingListing>) -> Self {
        Self {
            airbnb: RwLock::new(airbnb),
            booking: RwLock::new(booking),
        }
    }

    pub fn insert_airbnb(&self, listing: AirbnbListing) {
        write_lock(&self.airbnb).push(listing);
    }

    pub fn insert_booking(&self, listing: BookingListing) {
        write_lock(&self.booking).push(listing);
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn in_range<L: StayListing + Clone>(lock: &RwLock<Vec<L>>, range: &DateRange) -> Vec<L> {
    let listings = lock.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    listings
        .iter()
        .filter(|l| range.contains(l.start_date(), l.end_date()))
        .cloned()
        .collect()
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn airbnb_by_date(&self, range: &DateRange) -> Result<Vec<AirbnbListing>> {
        Ok(in_range(&self.airbnb, range))
    }

    async fn booking_by_date(&self, range: &DateRange) -> Result<Vec<BookingListing>> {
        Ok(in_range(&self.booking, range))
    }
}
