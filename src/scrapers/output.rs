use crate::models::ListingAnalysis;
use crate::scrapers::traits::ScrapeReport;
use anyhow::{anyhow, Context, Result};
use serde_json::Deserializer;
use tracing::debug;

pub const AIRBNB_MARKER: &str = "Airbnb Listings Data:";
pub const BOOKING_MARKER: &str = "Booking Listings Data:";

/// Extract both aggregates from the scraper's combined output.
///
/// Everything before the Airbnb marker is progress chatter and is ignored.
pub fn parse_scrape_output(output: &str) -> Result<ScrapeReport> {
    let (_, after_airbnb) = output
        .split_once(AIRBNB_MARKER)
        .ok_or_else(|| anyhow!("scraper output is missing '{AIRBNB_MARKER}'"))?;
    let (airbnb_block, booking_block) = after_airbnb
        .split_once(BOOKING_MARKER)
        .ok_or_else(|| anyhow!("scraper output is missing '{BOOKING_MARKER}'"))?;

    let airbnb = decode_block(airbnb_block).context("failed to decode Airbnb aggregate")?;
    let booking = decode_block(booking_block).context("failed to decode Booking aggregate")?;
    Ok(ScrapeReport { airbnb, booking })
}

/// Decode the first object in a block, tolerating trailing lines.
///
/// The scraper prints Python dict reprs, so a block that is not already
/// JSON is retried with single quotes turned into double quotes. That
/// coercion breaks on any value containing an apostrophe.
fn decode_block(block: &str) -> Result<ListingAnalysis> {
    let block = block.trim();
    match first_value(block) {
        Ok(analysis) => Ok(analysis),
        Err(json_err) => {
            debug!("aggregate is not plain JSON ({json_err}), coercing quotes");
            let coerced = block.replace('\'', "\"");
            first_value(&coerced).with_context(|| format!("unparseable aggregate: {block}"))
        }
    }
}

fn first_value(block: &str) -> Result<ListingAnalysis, serde_json::Error> {
    Deserializer::from_str(block)
        .into_iter::<ListingAnalysis>()
        .next()
        // an empty block yields serde_json's own EOF error
        .unwrap_or_else(|| serde_json::from_str(block))
}
