#![allow(dead_code)]

pub mod store;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use stay_pricer::ai::PriceAdvisor;
use stay_pricer::bot::Dispatcher;
use stay_pricer::chat::ChatClient;
use stay_pricer::models::{AirbnbDetails, AirbnbListing, BookingListing};
use stay_pricer::scrapers::output::parse_scrape_output;
use stay_pricer::scrapers::{DateRange, ScrapeReport, Scraper};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub use store::MemoryStore;

pub const S1_OUTPUT: &str = "Airbnb Listings Data: {'average_price': 100.0, 'highest_price': 120.0, 'lowest_price': 80.0, 'total_listings': 3}\n\
Booking Listings Data: {'average_price': 90.0, 'highest_price': 110.0, 'lowest_price': 70.0, 'total_listings': 2}";

pub const AI_REPLY: &str = "2025-01-10: 95.00\n2025-01-11: 97.00";

/// Captures every reply instead of calling Telegram
#[derive(Default)]
pub struct RecordingChat {
    sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingChat {
    pub fn replies(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> String {
        self.replies().last().map(|(_, text)| text.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatClient for RecordingChat {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

/// Chat that cannot deliver anything
pub struct BrokenChat;

#[async_trait]
impl ChatClient for BrokenChat {
    async fn send_message(&self, _chat_id: i64, _text: &str) -> Result<()> {
        bail!("telegram unreachable")
    }
}

/// Scraper replaying canned process output through the real parser
pub struct CannedScraper {
    output: &'static str,
    pub ranges: Mutex<Vec<DateRange>>,
}

impl CannedScraper {
    pub fn new(output: &'static str) -> Self {
        Self {
            output,
            ranges: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Scraper for CannedScraper {
    async fn scrape(&self, range: &DateRange) -> Result<ScrapeReport> {
        self.ranges.lock().unwrap().push(range.clone());
        parse_scrape_output(self.output)
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

/// Advisor returning a fixed reply and remembering its prompts
pub struct ScriptedAdvisor {
    reply: Result<&'static str, &'static str>,
    calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedAdvisor {
    pub fn replying(reply: &'static str) -> Self {
        Self {
            reply: Ok(reply),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            reply: Err(message),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceAdvisor for ScriptedAdvisor {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.reply {
            Ok(text) => Ok(text.to_string()),
            Err(message) => bail!("{message}"),
        }
    }
}

/// `inserted_at` the way the scraper writes it: naive, microseconds
pub fn inserted_days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days))
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

pub fn airbnb(start: &str, end: &str, price: f64, days_ago: i64) -> AirbnbListing {
    AirbnbListing {
        id: format!("a-{start}-{price}"),
        url: "https://www.airbnb.com/rooms/1".to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        listing: AirbnbDetails {
            name: "Olive grove cottage".to_string(),
            price,
            rating: 4.8,
            bed_configuration: "2 double beds".to_string(),
        },
        inserted_at: inserted_days_ago(days_ago),
        ..Default::default()
    }
}

pub fn booking(start: &str, end: &str, price: f64, days_ago: i64) -> BookingListing {
    BookingListing {
        id: format!("b-{start}-{price}"),
        url: "https://www.booking.com/hotel/pt/1.html".to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        name: "Quinta".to_string(),
        price,
        rating: "Scored 9.1".to_string(),
        bed_configuration: "1 double bed".to_string(),
        inserted_at: inserted_days_ago(days_ago),
        ..Default::default()
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub scraper: Arc<CannedScraper>,
    pub advisor: Arc<ScriptedAdvisor>,
    pub chat: Arc<RecordingChat>,
}

impl Harness {
    pub fn new(store: MemoryStore, advisor: ScriptedAdvisor) -> Self {
        Self {
            store: Arc::new(store),
            scraper: Arc::new(CannedScraper::new(S1_OUTPUT)),
            advisor: Arc::new(advisor),
            chat: Arc::new(RecordingChat::default()),
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            self.store.clone(),
            self.scraper.clone(),
            self.advisor.clone(),
            self.chat.clone(),
        )
    }
}
