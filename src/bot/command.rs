use crate::error::{BotError, BotResult};
use crate::scrapers::DateRange;

pub const SCRAPE_USAGE: &str = "/scrape start_date end_date";
pub const GET_PRICES_USAGE: &str = "/getprices start_date end_date";

/// A chat message parsed into a bot command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scrape(DateRange),
    GetPrices(DateRange),
    Unknown(String),
}

impl Command {
    /// Split on single ASCII spaces; the first token picks the command.
    /// Dates are passed through unvalidated.
    pub fn parse(text: &str) -> BotResult<Self> {
        let parts: Vec<&str> = text.split(' ').collect();
        match parts.as_slice() {
            ["/scrape", start, end] => Ok(Command::Scrape(DateRange::new(*start, *end))),
            ["/scrape", ..] => Err(BotError::Usage(SCRAPE_USAGE)),
            ["/getprices", start, end] => Ok(Command::GetPrices(DateRange::new(*start, *end))),
            ["/getprices", ..] => Err(BotError::Usage(GET_PRICES_USAGE)),
            [first, ..] => Ok(Command::Unknown((*first).to_string())),
            [] => Ok(Command::Unknown(String::new())),
        }
    }
}
