// tests/apod_normalize.rs
//
// Card shaping for the picture-of-the-day payload.

use serde_json::json;

use astro_feed_aggregator::feed::date::FeedDate;
use astro_feed_aggregator::feed::sources::apod::{self, ApodPayload};

fn day() -> FeedDate {
    "2024-03-07".parse().unwrap()
}

fn payload(v: serde_json::Value) -> ApodPayload {
    serde_json::from_value(v).expect("apod payload fixture")
}

#[test]
fn hd_url_wins_for_inline_image_detail_image_and_link() {
    let p = payload(json!({
        "title": "Galaxy",
        "date": "2024-03-07",
        "url": "https://apod.nasa.gov/std.jpg",
        "hdurl": "https://apod.nasa.gov/hd.jpg",
        "media_type": "image",
        "explanation": "A galaxy.",
        "copyright": "J. Doe"
    }));
    let card = apod::normalize(p, &day());

    assert_eq!(card.badge, "APOD");
    assert_eq!(card.image.as_deref(), Some("https://apod.nasa.gov/hd.jpg"));
    assert_eq!(card.link.as_deref(), Some("https://apod.nasa.gov/hd.jpg"));

    let details = card.details.expect("apod card has details");
    assert_eq!(details.image.as_deref(), Some("https://apod.nasa.gov/hd.jpg"));
    assert_eq!(details.credits.as_deref(), Some("J. Doe"));

    let labels: Vec<&str> = details.links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["HD image", "APOD link"]);
    assert_eq!(details.links[0].href, "https://apod.nasa.gov/hd.jpg");
    assert_eq!(details.links[1].href, "https://apod.nasa.gov/std.jpg");
}

#[test]
fn video_keeps_text_and_link_but_has_no_image() {
    let p = payload(json!({
        "title": "Eclipse timelapse",
        "date": "2024-03-07",
        "url": "https://youtu.be/xyz",
        "media_type": "video",
        "explanation": "A timelapse."
    }));
    let card = apod::normalize(p, &day());

    assert_eq!(card.image, None);
    assert_eq!(card.title, "Eclipse timelapse");
    assert_eq!(card.description.as_deref(), Some("A timelapse."));
    assert_eq!(card.link.as_deref(), Some("https://youtu.be/xyz"));

    let details = card.details.expect("details present");
    assert_eq!(details.image, None);
}

#[test]
fn missing_copyright_defaults_to_nasa_attribution() {
    let p = payload(json!({
        "title": "Galaxy",
        "url": "https://apod.nasa.gov/std.jpg",
        "media_type": "image"
    }));
    let details = apod::normalize(p, &day()).details.unwrap();
    assert_eq!(details.credits.as_deref(), Some("NASA / APOD"));
}

#[test]
fn missing_title_and_date_fall_back() {
    let p = payload(json!({
        "url": "https://apod.nasa.gov/std.jpg",
        "media_type": "image"
    }));
    let card = apod::normalize(p, &day());
    assert_eq!(card.title, "APOD");
    assert_eq!(card.date, "2024-03-07");

    let details = card.details.unwrap();
    assert_eq!(details.title, "Astronomy Picture of the Day");
}

#[test]
fn absent_urls_are_omitted_from_detail_links() {
    let p = payload(json!({
        "title": "Galaxy",
        "url": "https://apod.nasa.gov/std.jpg",
        "media_type": "image"
    }));
    let card = apod::normalize(p, &day());
    // No hdurl: the standard URL serves as image and link.
    assert_eq!(card.image.as_deref(), Some("https://apod.nasa.gov/std.jpg"));

    let details = card.details.unwrap();
    assert_eq!(details.links.len(), 1);
    assert_eq!(details.links[0].label, "APOD link");
}

#[test]
fn empty_explanation_means_no_description() {
    let p = payload(json!({
        "title": "Galaxy",
        "url": "https://apod.nasa.gov/std.jpg",
        "media_type": "image",
        "explanation": ""
    }));
    let card = apod::normalize(p, &day());
    assert_eq!(card.description, None);
}
