// src/feed/sources/epic.rs
//! EPIC Earth imagery. A JSON array of camera shots per day; 404 simply
//! means the spacecraft has nothing archived for that date.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::feed::date::FeedDate;
use crate::feed::non_empty;
use crate::feed::types::{Card, CardDetails, DetailLink, SourceError};
use crate::feed::MAX_CARDS_PER_SOURCE;

pub const DEFAULT_ENDPOINT: &str = "https://api.nasa.gov/EPIC/api/natural/date";
pub const DEFAULT_ARCHIVE: &str = "https://api.nasa.gov/EPIC/archive/natural";
pub const PORTAL_URL: &str = "https://epic.gsfc.nasa.gov/";

const BADGE: &str = "EPIC";
const CARD_TITLE: &str = "EPIC Earth Image";
const FALLBACK_COORDS: &str = "Earth from DSCOVR";
const FALLBACK_DETAIL_DESC: &str = "Earth from DSCOVR (EPIC)";
const CREDITS: &str = "NASA EPIC / DSCOVR";

#[derive(Debug, Clone, Deserialize)]
pub struct EpicItem {
    /// Archive image identifier, e.g. "epic_1b_20240307003634".
    pub image: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub centroid_coordinates: Option<Centroid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Centroid {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

pub struct EpicClient {
    client: Client,
    endpoint: String,
    archive: String,
    api_key: String,
}

impl EpicClient {
    pub fn new(
        endpoint: impl Into<String>,
        archive: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            archive: archive.into(),
            api_key: api_key.into(),
        }
    }

    pub fn request_url(&self, date: &FeedDate) -> String {
        format!("{}/{}?api_key={}", self.endpoint, date, self.api_key)
    }

    /// Full-resolution PNG location for one shot in the image archive.
    pub fn archive_image_url(&self, date: &FeedDate, image: &str) -> String {
        let (y, m, d) = date.split_ymd();
        format!(
            "{}/{}/{}/{}/png/{}.png?api_key={}",
            self.archive, y, m, d, image, self.api_key
        )
    }

    pub async fn fetch(&self, date: &FeedDate) -> Result<Vec<EpicItem>, SourceError> {
        let resp = self.client.get(self.request_url(date)).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        decode_response(status, &body)
    }

    /// Shape the day's shots into cards, first 9 in archive order.
    pub fn normalize(&self, items: Vec<EpicItem>, requested: &FeedDate) -> Vec<Card> {
        items
            .into_iter()
            .take(MAX_CARDS_PER_SOURCE)
            .map(|item| {
                let image_url = self.archive_image_url(requested, &item.image);
                let coords = item
                    .centroid_coordinates
                    .as_ref()
                    .and_then(|c| Some((c.lat?, c.lon?)))
                    .map(|(lat, lon)| format!("Lat {lat:.2}, Lon {lon:.2}"))
                    .unwrap_or_else(|| FALLBACK_COORDS.to_string());
                let caption = non_empty(item.caption);
                let description = match &caption {
                    Some(c) => format!("{coords} • {c}"),
                    None => coords,
                };
                let date = non_empty(item.date).unwrap_or_else(|| requested.to_string());

                Card {
                    badge: BADGE.to_string(),
                    title: CARD_TITLE.to_string(),
                    date: date.clone(),
                    image: Some(image_url.clone()),
                    description: Some(description),
                    link: Some(PORTAL_URL.to_string()),
                    details: Some(CardDetails {
                        badge: BADGE.to_string(),
                        title: CARD_TITLE.to_string(),
                        date,
                        image: Some(image_url),
                        description: Some(
                            caption.unwrap_or_else(|| FALLBACK_DETAIL_DESC.to_string()),
                        ),
                        credits: Some(CREDITS.to_string()),
                        links: vec![DetailLink::new(PORTAL_URL, "EPIC Portal")],
                    }),
                }
            })
            .collect()
    }
}

/// Interpret one EPIC response. 404 is an empty day, not a failure.
pub fn decode_response(status: StatusCode, body: &str) -> Result<Vec<EpicItem>, SourceError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(Vec::new());
    }
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    Ok(serde_json::from_str(body)?)
}
