// src/feed/types.rs
use serde::{Deserialize, Serialize};

/// One normalized card, regardless of which feed produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub badge: String, // e.g., "APOD", "EPIC", "NEO • Hazard"
    pub title: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Extra content for the detail drawer; `None` means the card offers
    /// only its external link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CardDetails>,
}

/// Detail-drawer content for a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardDetails {
    pub badge: String,
    pub title: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<String>,
    pub links: Vec<DetailLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailLink {
    pub href: String,
    pub label: String,
}

impl DetailLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// Summary counters shown above the card list.
///
/// `events` mirrors `total`; the dashboard has always wired both KPI tiles to
/// the full card count, and consumers depend on that.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedKpis {
    pub total: usize,
    pub photos: usize,
    pub events: usize,
}

impl FeedKpis {
    pub fn tally(cards: &[Card]) -> Self {
        let photos = cards.iter().filter(|c| c.image.is_some()).count();
        Self {
            total: cards.len(),
            photos,
            events: cards.len(),
        }
    }
}

/// Everything produced for one queried day. Replaced wholesale on the next
/// query; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayFeed {
    pub date: String,
    pub cards: Vec<Card>,
    pub kpis: FeedKpis,
}

/// Failure of a single upstream feed call. Never aborts a fetch cycle; the
/// aggregator logs it and moves on with the other sources.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decoding payload: {0}")]
    Decode(#[from] serde_json::Error),
}
