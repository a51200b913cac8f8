use crate::ai::{build_prompt, PriceAdvisor};
use crate::bot::command::Command;
use crate::bot::reply::{prices_reply, scrape_reply, stale_reply, unknown_command_reply, NO_LISTINGS};
use crate::chat::ChatClient;
use crate::error::BotResult;
use crate::freshness::FreshnessPolicy;
use crate::models::{AirbnbListing, BookingListing, StayListing};
use crate::scrapers::{DateRange, Scraper};
use crate::store::ListingStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of the freshness check behind `/getprices`
#[derive(Debug, Clone, PartialEq)]
pub enum PriceCheck {
    /// Some check-in dates need a re-scrape; comma-joined per source
    Stale { airbnb: String, booking: String },
    /// Every stored date is recent enough to price
    Fresh {
        airbnb: Vec<AirbnbListing>,
        booking: Vec<BookingListing>,
    },
}

/// Maps chat commands to adapter calls and exactly one reply
pub struct Dispatcher {
    store: Arc<dyn ListingStore>,
    scraper: Arc<dyn Scraper>,
    advisor: Arc<dyn PriceAdvisor>,
    chat: Arc<dyn ChatClient>,
    policy: FreshnessPolicy,
    clock: fn() -> DateTime<Utc>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn ListingStore>,
        scraper: Arc<dyn Scraper>,
        advisor: Arc<dyn PriceAdvisor>,
        chat: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            store,
            scraper,
            advisor,
            chat,
            policy: FreshnessPolicy::default(),
            clock: Utc::now,
        }
    }

    pub fn with_policy(mut self, policy: FreshnessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the wall clock used as "now" by the freshness check
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Handle one chat message.
    ///
    /// Command and adapter failures become the reply text; the only error
    /// returned is a failure to deliver that reply.
    pub async fn handle_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let reply = match self.reply_for(text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Command '{}' from chat {} failed: {}", text, chat_id, e);
                e.reply_text()
            }
        };

        self.chat
            .send_message(chat_id, &reply)
            .await
            .with_context(|| format!("Failed to reply to chat {chat_id}"))
    }

    /// Run the command in `text` and compose its reply
    pub async fn reply_for(&self, text: &str) -> BotResult<String> {
        let command = Command::parse(text)?;
        info!("Dispatching {:?}", command);

        match command {
            Command::Scrape(range) => self.scrape(&range).await,
            Command::GetPrices(range) => self.get_prices(&range).await,
            Command::Unknown(token) => Ok(unknown_command_reply(&token)),
        }
    }

    async fn scrape(&self, range: &DateRange) -> BotResult<String> {
        debug!("Using {} scraper", self.scraper.name());
        let report = self.scraper.scrape(range).await?;
        Ok(scrape_reply(&report))
    }

    /// Load both sources for the range and classify every check-in date
    pub async fn check_prices(&self, range: &DateRange) -> BotResult<PriceCheck> {
        let airbnb = self.store.airbnb_by_date(range).await?;
        let booking = self.store.booking_by_date(range).await?;

        let now = (self.clock)();
        let stale_airbnb = self.policy.out_of_date_list(&airbnb, now)?;
        let stale_booking = self.policy.out_of_date_list(&booking, now)?;

        if stale_airbnb.is_empty() && stale_booking.is_empty() {
            Ok(PriceCheck::Fresh { airbnb, booking })
        } else {
            info!(
                "Stale data for {}: airbnb=[{}] booking=[{}]",
                range, stale_airbnb, stale_booking
            );
            Ok(PriceCheck::Stale {
                airbnb: stale_airbnb,
                booking: stale_booking,
            })
        }
    }

    async fn get_prices(&self, range: &DateRange) -> BotResult<String> {
        match self.check_prices(range).await? {
            PriceCheck::Stale { airbnb, booking } => Ok(stale_reply(&airbnb, &booking)),
            PriceCheck::Fresh { airbnb, booking } => {
                let booking_prices = self.suggest_prices(&booking).await?;
                let airbnb_prices = self.suggest_prices(&airbnb).await?;
                Ok(prices_reply(&booking_prices, &airbnb_prices))
            }
        }
    }

    /// One model call per source, except that a source with no stored
    /// listings skips the call and answers `No listings found.`
    async fn suggest_prices<L: StayListing + Sync>(&self, listings: &[L]) -> BotResult<String> {
        if listings.is_empty() {
            debug!("No {} listings, skipping price suggestion", L::SOURCE);
            return Ok(NO_LISTINGS.to_string());
        }
        let prompt = build_prompt(listings);
        debug!("{} prompt covers {} listings", L::SOURCE, listings.len());
        Ok(self.advisor.generate(&prompt).await?)
    }
}
