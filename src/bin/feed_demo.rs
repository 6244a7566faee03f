//! Demo that runs one fetch cycle and prints the cards to stdout.
//! Pass a date as `YYYY-MM-DD`; defaults to today, like the dashboard does on load.

use astro_feed_aggregator::config::AppConfig;
use astro_feed_aggregator::feed::date::FeedDate;
use astro_feed_aggregator::feed::FeedAggregator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let date = match std::env::args().nth(1) {
        Some(raw) => raw.parse::<FeedDate>()?,
        None => FeedDate::today(),
    };

    let cfg = AppConfig::load()?;
    let aggregator = FeedAggregator::new(&cfg);
    let day = aggregator.fetch_day(&date).await;

    for card in &day.cards {
        println!("[{}] {} ({})", card.badge, card.title, card.date);
        if let Some(desc) = &card.description {
            println!("    {desc}");
        }
        if let Some(link) = &card.link {
            println!("    {link}");
        }
    }
    println!(
        "{}: {} cards, {} photos, {} events",
        day.date, day.kpis.total, day.kpis.photos, day.kpis.events
    );
    Ok(())
}
