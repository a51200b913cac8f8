pub mod output;
pub mod subprocess;
pub mod traits;
pub mod types;

pub use subprocess::SubprocessScraper;
pub use traits::{ScrapeReport, Scraper};
pub use types::DateRange;
