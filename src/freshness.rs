//! Check-in date grouping and the data freshness policy.
//!
//! A listing is fresh when it was inserted strictly after `now - window`.
//! A check-in date is fresh when at least one of its listings is fresh:
//! one recent scrape for the date is enough to trust its price snapshot.

use crate::error::{BotError, BotResult};
use crate::models::StayListing;
use chrono::{DateTime, Duration, Utc};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Listings sharing one check-in date, keyed by that date
pub type DateGroups<'a, L> = BTreeMap<&'a str, Vec<&'a L>>;

/// Group listings by `start_date`. Empty input gives an empty map.
pub fn group_by_start_date<L: StayListing>(listings: &[L]) -> DateGroups<'_, L> {
    let mut groups: DateGroups<'_, L> = BTreeMap::new();
    for listing in listings {
        groups.entry(listing.start_date()).or_default().push(listing);
    }
    groups
}

/// Append the UTC marker to timestamps written without a zone.
///
/// Values already carrying `Z` or a numeric offset after the date part are
/// left untouched.
pub fn normalise_inserted_at(raw: &str) -> Cow<'_, str> {
    if has_zone(raw) {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("{raw}Z"))
    }
}

fn has_zone(raw: &str) -> bool {
    if raw.contains('Z') {
        return true;
    }
    // skip the date part, whose dashes are not offsets
    raw.get(10..)
        .is_some_and(|time| time.contains('+') || time.contains('-'))
}

/// Parse a listing's `inserted_at` as an RFC3339 instant
pub fn parse_inserted_at(raw: &str) -> BotResult<DateTime<Utc>> {
    let normalised = normalise_inserted_at(raw);
    DateTime::parse_from_rfc3339(&normalised)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|source| BotError::Timestamp {
            value: normalised.into_owned(),
            source,
        })
}

#[derive(Debug, Clone, Copy)]
pub struct FreshnessPolicy {
    window: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            window: Duration::days(7),
        }
    }
}

impl FreshnessPolicy {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Inserted strictly after `now - window`
    pub fn is_fresh<L: StayListing>(&self, listing: &L, now: DateTime<Utc>) -> BotResult<bool> {
        let inserted_at = parse_inserted_at(listing.inserted_at())?;
        Ok(inserted_at > now - self.window)
    }

    /// A group is fresh iff any of its listings is fresh.
    ///
    /// Every timestamp is parsed before deciding, so one malformed value
    /// fails the group whatever order the listings arrive in.
    pub fn is_group_fresh<L: StayListing>(&self, group: &[&L], now: DateTime<Utc>) -> BotResult<bool> {
        let inserted = group
            .iter()
            .map(|listing| parse_inserted_at(listing.inserted_at()))
            .collect::<BotResult<Vec<_>>>()?;
        let cutoff = now - self.window;
        Ok(inserted.into_iter().any(|instant| instant > cutoff))
    }

    /// Check-in dates whose group is not fresh, ascending
    pub fn out_of_date_dates<'a, L: StayListing>(
        &self,
        groups: &DateGroups<'a, L>,
        now: DateTime<Utc>,
    ) -> BotResult<Vec<&'a str>> {
        let mut stale = Vec::new();
        for (date, group) in groups {
            if !self.is_group_fresh(group, now)? {
                stale.push(*date);
            }
        }
        Ok(stale)
    }

    /// Comma-joined stale dates for one source; empty when all are fresh.
    pub fn out_of_date_list<L: StayListing>(&self, listings: &[L], now: DateTime<Utc>) -> BotResult<String> {
        let groups = group_by_start_date(listings);
        Ok(self.out_of_date_dates(&groups, now)?.join(","))
    }
}
