use crate::bot::command::{GET_PRICES_USAGE, SCRAPE_USAGE};
use crate::models::ListingAnalysis;
use crate::scrapers::ScrapeReport;

pub const NO_LISTINGS: &str = "No listings found.";

fn analysis_section(heading: &str, analysis: &ListingAnalysis) -> String {
    if analysis.is_empty() {
        return format!("{heading}\n{NO_LISTINGS}");
    }
    format!(
        "{heading}\nAverage Price: {:.2}\nHighest Price: {:.2}\nLowest Price: {:.2}\nTotal Listings: {}",
        analysis.average_price, analysis.highest_price, analysis.lowest_price, analysis.total_listings
    )
}

/// Reply for a finished `/scrape`
pub fn scrape_reply(report: &ScrapeReport) -> String {
    format!(
        "{}\n\n{}",
        analysis_section("Airbnb Listings Data:", &report.airbnb),
        analysis_section("Booking Listings Data:", &report.booking)
    )
}

/// Reply short-circuiting `/getprices` when some dates need a re-scrape
pub fn stale_reply(airbnb_dates: &str, booking_dates: &str) -> String {
    format!(
        "Data is not up to date. Please run /scrape command. Airbnbs: {airbnb_dates}. Bookings: {booking_dates}."
    )
}

/// Booking suggestions first, then Airbnb
pub fn prices_reply(booking: &str, airbnb: &str) -> String {
    format!("Booking Prices:\n{booking}\n\nAirbnb Prices:\n{airbnb}")
}

pub fn unknown_command_reply(token: &str) -> String {
    format!("Unknown command: {token}\nAvailable commands:\n{SCRAPE_USAGE}\n{GET_PRICES_USAGE}")
}
