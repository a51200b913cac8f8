use crate::models::ListingAnalysis;
use crate::scrapers::types::DateRange;
use anyhow::Result;
use async_trait::async_trait;

/// Aggregates produced by one scrape run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrapeReport {
    pub airbnb: ListingAnalysis,
    pub booking: ListingAnalysis,
}

/// Common trait for listing scrapers.
/// A run refreshes the store for the range and reports per-source aggregates.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Scrape both sources for the given range
    async fn scrape(&self, range: &DateRange) -> Result<ScrapeReport>;

    /// Get the name of the scraper
    fn name(&self) -> &'static str;
}
