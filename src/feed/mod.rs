// src/feed/mod.rs
pub mod date;
pub mod sources;
pub mod types;

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

use crate::config::AppConfig;
use crate::feed::date::FeedDate;
use crate::feed::sources::apod::{self, ApodClient, ApodPayload};
use crate::feed::sources::epic::{EpicClient, EpicItem};
use crate::feed::sources::neo::{self, NeoClient, NeoFeed};
use crate::feed::types::{Card, DayFeed, FeedKpis, SourceError};

/// Per-source card cap. The imagery and event feeds can return many more
/// elements for a busy day; only the first 9 in feed order are shown.
pub const MAX_CARDS_PER_SOURCE: usize = 9;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_cycles_total", "Completed fetch cycles.");
        describe_counter!("feed_cards_total", "Cards produced across all cycles.");
        describe_counter!(
            "feed_source_errors_total",
            "Upstream fetch/decode errors, per cycle and source."
        );
        describe_histogram!("feed_cycle_ms", "Fetch cycle wall time in milliseconds.");
    });
}

/// Treat empty strings from upstream payloads the same as missing fields.
pub(crate) fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Group an absolute value's integer digits by thousands and keep at most
/// three fraction digits, the way the dashboard has always rendered NEO
/// distances and speeds (e.g. 1234567.89 renders as "1,234,567.89").
pub fn format_grouped(value: f64) -> String {
    let mut s = format!("{:.3}", value.abs());
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (s, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(&frac);
    }
    grouped
}

/// Fans out to the three upstream feeds for one day and folds whatever
/// settles into a uniform card list.
pub struct FeedAggregator {
    apod: ApodClient,
    epic: EpicClient,
    neo: NeoClient,
}

impl FeedAggregator {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            apod: ApodClient::new(&cfg.apod_endpoint, &cfg.api_key),
            epic: EpicClient::new(&cfg.epic_endpoint, &cfg.epic_archive, &cfg.api_key),
            neo: NeoClient::new(&cfg.neo_endpoint, &cfg.api_key),
        }
    }

    /// Run one fetch cycle: issue all three requests concurrently, wait for
    /// every one to settle, and normalize the successes. A failing source
    /// contributes zero cards and never takes the cycle down with it.
    pub async fn fetch_day(&self, date: &FeedDate) -> DayFeed {
        ensure_metrics_described();
        let t0 = Instant::now();

        let (apod, epic, neo) = tokio::join!(
            self.apod.fetch(date),
            self.epic.fetch(date),
            self.neo.fetch(date),
        );
        let cards = self.assemble(date, apod, epic, neo);
        let kpis = FeedKpis::tally(&cards);

        counter!("feed_cycles_total").increment(1);
        counter!("feed_cards_total").increment(cards.len() as u64);
        histogram!("feed_cycle_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        tracing::debug!(date = %date, total = kpis.total, photos = kpis.photos, "fetch cycle done");

        DayFeed {
            date: date.to_string(),
            cards,
            kpis,
        }
    }

    /// The settle step, separated from I/O: fold three already-resolved
    /// source results into cards. Order is fixed: APOD, then EPIC, then NEO.
    pub fn assemble(
        &self,
        date: &FeedDate,
        apod: Result<ApodPayload, SourceError>,
        epic: Result<Vec<EpicItem>, SourceError>,
        neo: Result<NeoFeed, SourceError>,
    ) -> Vec<Card> {
        let mut cards = Vec::new();
        match apod {
            Ok(payload) => cards.push(apod::normalize(payload, date)),
            Err(e) => source_failed("apod", &e),
        }
        match epic {
            Ok(items) => cards.extend(self.epic.normalize(items, date)),
            Err(e) => source_failed("epic", &e),
        }
        match neo {
            Ok(feed) => cards.extend(neo::normalize(feed, date)),
            Err(e) => source_failed("neo", &e),
        }
        cards
    }
}

fn source_failed(source: &'static str, err: &SourceError) {
    tracing::warn!(error = %err, source, "source fetch failed");
    counter!("feed_source_errors_total").increment(1);
}
