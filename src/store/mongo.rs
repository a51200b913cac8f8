use crate::models::{AirbnbListing, BookingListing, Source};
use crate::scrapers::DateRange;
use crate::store::ListingStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Listing store backed by the MongoDB collections the scraper writes to
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
    timeout: Duration,
}

impl MongoStore {
    /// Connect and ping the deployment, so an unreachable store fails startup
    pub async fn connect(uri: &str, database: &str, timeout: Duration) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .context("Invalid MongoDB connection string")?;
        options.app_name = Some("stay-pricer".to_string());
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let client = Client::with_options(options).context("Failed to create MongoDB client")?;
        client
            .database(database)
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to reach MongoDB")?;

        info!("Connected to MongoDB database '{}'", database);
        Ok(Self {
            client,
            database: database.to_string(),
            timeout,
        })
    }

    /// Release pooled connections
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("MongoDB connection closed");
    }

    async fn find_in_range<T: DeserializeOwned>(&self, source: Source, range: &DateRange) -> Result<Vec<T>> {
        let collection = self
            .client
            .database(&self.database)
            .collection::<Document>(source.collection());
        let filter = doc! {
            "start_date": { "$gte": range.start.as_str() },
            "end_date": { "$lte": range.end.as_str() },
        };
        debug!("Querying {} with filter {}", source.collection(), filter);

        let query = async {
            let mut cursor = collection
                .find(filter)
                .await
                .with_context(|| format!("{} query failed", source))?;
            let mut results = Vec::new();
            while let Some(raw) = cursor
                .try_next()
                .await
                .with_context(|| format!("{} query failed", source))?
            {
                if let Some(listing) = decode_listing(source, raw)? {
                    results.push(listing);
                }
            }
            Ok::<_, anyhow::Error>(results)
        };

        let results = tokio::time::timeout(self.timeout, query)
            .await
            .with_context(|| format!("{} query timed out after {:?}", source, self.timeout))??;

        info!("Query on {} completed. Found {} results.", source.collection(), results.len());
        Ok(results)
    }
}

/// Decode one stored document.
///
/// An Airbnb document that does not decode fails the whole query; a Booking
/// document that does not decode is logged and skipped.
fn decode_listing<T: DeserializeOwned>(source: Source, raw: Document) -> Result<Option<T>> {
    match bson::from_document::<T>(normalise_document(raw)) {
        Ok(listing) => Ok(Some(listing)),
        Err(e) if source == Source::Booking => {
            warn!("Skipping undecodable {} document: {}", source, e);
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to decode {} document", source)),
    }
}

/// Flatten driver-specific values into the plain strings the listing
/// models expect: ObjectId `_id` to hex, BSON datetime `inserted_at` to RFC3339.
fn normalise_document(mut raw: Document) -> Document {
    let id_hex = match raw.get("_id") {
        Some(Bson::ObjectId(id)) => Some(id.to_hex()),
        _ => None,
    };
    if let Some(hex) = id_hex {
        raw.insert("_id", hex);
    }

    let inserted_at = match raw.get("inserted_at") {
        Some(Bson::DateTime(instant)) => instant.try_to_rfc3339_string().ok(),
        _ => None,
    };
    if let Some(text) = inserted_at {
        raw.insert("inserted_at", text);
    }
    raw
}

#[async_trait]
impl ListingStore for MongoStore {
    async fn airbnb_by_date(&self, range: &DateRange) -> Result<Vec<AirbnbListing>> {
        self.find_in_range(Source::Airbnb, range).await
    }

    async fn booking_by_date(&self, range: &DateRange) -> Result<Vec<BookingListing>> {
        self.find_in_range(Source::Booking, range).await
    }
}
