// src/feed/sources/neo.rs
//! Near-Earth Object close approaches. The feed endpoint returns objects
//! keyed by date; only the requested day's bucket is used.

use std::collections::HashMap;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::feed::date::FeedDate;
use crate::feed::types::{Card, SourceError};
use crate::feed::{format_grouped, non_empty, MAX_CARDS_PER_SOURCE};

pub const DEFAULT_ENDPOINT: &str = "https://api.nasa.gov/neo/rest/v1/feed";

const BADGE: &str = "NEO";
const BADGE_HAZARD: &str = "NEO • Hazard";
const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeoFeed {
    #[serde(default)]
    pub near_earth_objects: HashMap<String, Vec<NeoObject>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeoObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub nasa_jpl_url: Option<String>,
    #[serde(default)]
    pub estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimatedDiameter {
    #[serde(default)]
    pub meters: Option<DiameterRange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiameterRange {
    #[serde(default)]
    pub estimated_diameter_min: Option<f64>,
    #[serde(default)]
    pub estimated_diameter_max: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloseApproach {
    #[serde(default)]
    pub close_approach_date: Option<String>,
    #[serde(default)]
    pub close_approach_date_full: Option<String>,
    #[serde(default)]
    pub miss_distance: Option<MissDistance>,
    #[serde(default)]
    pub relative_velocity: Option<RelativeVelocity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MissDistance {
    #[serde(default)]
    pub kilometers: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelativeVelocity {
    #[serde(default)]
    pub kilometers_per_hour: Option<String>,
}

pub struct NeoClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl NeoClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn request_url(&self, date: &FeedDate) -> String {
        format!(
            "{}?start_date={date}&end_date={date}&api_key={}",
            self.endpoint, self.api_key
        )
    }

    pub async fn fetch(&self, date: &FeedDate) -> Result<NeoFeed, SourceError> {
        let resp = self.client.get(self.request_url(date)).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        decode_response(status, &body)
    }
}

/// Interpret one NEO feed response. Any non-success status is a hard failure;
/// a day with no objects shows up as a missing bucket, which `normalize`
/// treats as an empty list.
pub fn decode_response(status: StatusCode, body: &str) -> Result<NeoFeed, SourceError> {
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    Ok(serde_json::from_str(body)?)
}

/// Shape the requested day's objects into cards, first 9 in feed order.
///
/// Only the first close-approach entry of an object is shown. Diameter, miss
/// distance, and speed render independently, each falling back to "—" when
/// the feed omits the value or sends something unparseable.
pub fn normalize(mut feed: NeoFeed, requested: &FeedDate) -> Vec<Card> {
    let objects = feed
        .near_earth_objects
        .remove(&requested.to_string())
        .unwrap_or_default();

    objects
        .into_iter()
        .take(MAX_CARDS_PER_SOURCE)
        .map(|obj| {
            let approach = obj
                .close_approach_data
                .into_iter()
                .next()
                .unwrap_or_default();

            let diameter = obj
                .estimated_diameter
                .and_then(|d| d.meters)
                .and_then(|m| Some((m.estimated_diameter_min?, m.estimated_diameter_max?)))
                .map(|(min, max)| format!("{}–{} m", min.round() as i64, max.round() as i64))
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            let miss = approach
                .miss_distance
                .and_then(|m| parse_feed_number(m.kilometers.as_deref()?))
                .map(|km| format!("{} km", format_grouped(km)))
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            let speed = approach
                .relative_velocity
                .and_then(|v| parse_feed_number(v.kilometers_per_hour.as_deref()?))
                .map(|kmh| format!("{} km/h", format_grouped(kmh)))
                .unwrap_or_else(|| PLACEHOLDER.to_string());

            let badge = if obj.is_potentially_hazardous_asteroid {
                BADGE_HAZARD
            } else {
                BADGE
            };
            let date = non_empty(approach.close_approach_date_full)
                .or_else(|| non_empty(approach.close_approach_date))
                .unwrap_or_else(|| requested.to_string());

            Card {
                badge: badge.to_string(),
                title: obj.name.unwrap_or_default(),
                date,
                image: None,
                description: Some(format!(
                    "Est. dia: {diameter} • Miss: {miss} • Speed: {speed}"
                )),
                link: non_empty(obj.nasa_jpl_url),
                details: None,
            }
        })
        .collect()
}

/// The feed sends its numeric fields as strings.
fn parse_feed_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_numbers_parse_with_surrounding_whitespace() {
        assert_eq!(parse_feed_number(" 1234.5 "), Some(1234.5));
        assert_eq!(parse_feed_number("nonsense"), None);
        assert_eq!(parse_feed_number(""), None);
        assert_eq!(parse_feed_number("NaN"), None);
    }

    #[test]
    fn request_url_queries_a_single_day_window() {
        let client = NeoClient::new(DEFAULT_ENDPOINT, "test-key");
        let date: FeedDate = "2024-03-07".parse().unwrap();
        assert_eq!(
            client.request_url(&date),
            "https://api.nasa.gov/neo/rest/v1/feed?start_date=2024-03-07&end_date=2024-03-07&api_key=test-key"
        );
    }
}
