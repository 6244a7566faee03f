// src/feed/sources/apod.rs
//! Astronomy Picture of the Day. One JSON object per day, at most one card.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::feed::date::FeedDate;
use crate::feed::non_empty;
use crate::feed::types::{Card, CardDetails, DetailLink, SourceError};

pub const DEFAULT_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

const BADGE: &str = "APOD";
const FALLBACK_DETAIL_TITLE: &str = "Astronomy Picture of the Day";
const DEFAULT_CREDITS: &str = "NASA / APOD";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApodPayload {
    pub title: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
    pub hdurl: Option<String>,
    pub media_type: Option<String>,
    pub explanation: Option<String>,
    pub copyright: Option<String>,
}

pub struct ApodClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ApodClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn request_url(&self, date: &FeedDate) -> String {
        format!("{}?api_key={}&date={}", self.endpoint, self.api_key, date)
    }

    pub async fn fetch(&self, date: &FeedDate) -> Result<ApodPayload, SourceError> {
        let resp = self.client.get(self.request_url(date)).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        decode_response(status, &body)
    }
}

/// Interpret one APOD response. Any non-success status is a hard failure.
pub fn decode_response(status: StatusCode, body: &str) -> Result<ApodPayload, SourceError> {
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    Ok(serde_json::from_str(body)?)
}

/// Shape one payload into its card.
///
/// Non-image media (videos) keep their text and link but carry no inline
/// image. When both `hdurl` and `url` exist, the HD variant wins for the
/// inline image, the detail image, and the external link alike.
pub fn normalize(payload: ApodPayload, requested: &FeedDate) -> Card {
    let is_image = payload.media_type.as_deref() == Some("image");
    let hdurl = non_empty(payload.hdurl);
    let url = non_empty(payload.url);
    let best_url = hdurl.clone().or_else(|| url.clone());
    let image = if is_image { best_url.clone() } else { None };

    let title = non_empty(payload.title);
    let date = non_empty(payload.date).unwrap_or_else(|| requested.to_string());
    let explanation = non_empty(payload.explanation);

    let links: Vec<DetailLink> = [
        hdurl.map(|href| DetailLink::new(href, "HD image")),
        url.map(|href| DetailLink::new(href, "APOD link")),
    ]
    .into_iter()
    .flatten()
    .collect();

    Card {
        badge: BADGE.to_string(),
        title: title.clone().unwrap_or_else(|| BADGE.to_string()),
        date: date.clone(),
        image: image.clone(),
        description: explanation.clone(),
        link: best_url,
        details: Some(CardDetails {
            badge: BADGE.to_string(),
            title: title.unwrap_or_else(|| FALLBACK_DETAIL_TITLE.to_string()),
            date,
            image,
            description: explanation,
            credits: Some(
                non_empty(payload.copyright).unwrap_or_else(|| DEFAULT_CREDITS.to_string()),
            ),
            links,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_carries_key_and_date() {
        let client = ApodClient::new(DEFAULT_ENDPOINT, "test-key");
        let date: FeedDate = "2024-03-07".parse().unwrap();
        assert_eq!(
            client.request_url(&date),
            "https://api.nasa.gov/planetary/apod?api_key=test-key&date=2024-03-07"
        );
    }

    #[test]
    fn non_success_status_is_a_hard_failure() {
        let err = decode_response(StatusCode::NOT_FOUND, "").unwrap_err();
        assert!(matches!(err, SourceError::Status(404)));
    }
}
