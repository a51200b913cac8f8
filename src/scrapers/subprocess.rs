use crate::scrapers::output::parse_scrape_output;
use crate::scrapers::traits::{ScrapeReport, Scraper};
use crate::scrapers::types::DateRange;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Runs the external scraper script: `<interpreter> <script> <start> <end>`
pub struct SubprocessScraper {
    interpreter: PathBuf,
    script: PathBuf,
    timeout: Duration,
}

impl SubprocessScraper {
    /// Create a scraper with the default five minute deadline
    pub fn new(interpreter: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            script: script.into(),
            timeout: Duration::from_secs(300),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, range: &DateRange) -> Result<String> {
        let mut command = Command::new(&self.interpreter);
        command
            .arg(&self.script)
            .arg(&range.start)
            .arg(&range.end)
            .kill_on_drop(true);

        debug!(
            "Running {} {} {} {}",
            self.interpreter.display(),
            self.script.display(),
            range.start,
            range.end
        );

        // the child is reaped (or killed on drop) before this returns
        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .with_context(|| format!("scraper timed out after {:?}", self.timeout))?
            .with_context(|| format!("failed to launch {}", self.interpreter.display()))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            warn!("Scraper exited with {}", output.status);
            bail!("scraper exited with {}: {}", output.status, tail(&combined, 500));
        }

        debug!("Scraper produced {} bytes of output", combined.len());
        Ok(combined)
    }
}

/// Last `max` bytes of the output, on a char boundary
fn tail(output: &str, max: usize) -> &str {
    let trimmed = output.trim();
    if trimmed.len() <= max {
        return trimmed;
    }
    let mut start = trimmed.len() - max;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    &trimmed[start..]
}

#[async_trait]
impl Scraper for SubprocessScraper {
    async fn scrape(&self, range: &DateRange) -> Result<ScrapeReport> {
        info!("Starting scrape for {}", range);
        let output = self.run(range).await?;
        let report = parse_scrape_output(&output)?;
        info!(
            "✅ Scrape finished: {} Airbnb and {} Booking listings",
            report.airbnb.total_listings, report.booking.total_listings
        );
        Ok(report)
    }

    fn name(&self) -> &'static str {
        "subprocess"
    }
}
