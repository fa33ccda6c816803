use chrono::{Duration, Local};
use firstrun_core::{Schedule, TvdbClient, TvdbProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = TvdbClient::connect().await?;
    let provider = TvdbProvider::new(client);

    let shows: Vec<String> = ["Suits", "The Blacklist", "No Such Show 404"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    // A wide window so the demo finds something even between seasons
    let cutoff = Local::now().date_naive() - Duration::days(90);

    println!("🔍 Looking for episodes aired since {}...\n", cutoff);

    let schedule = Schedule::build(&provider, &shows, cutoff).await?;

    for (series, episodes) in schedule.by_series() {
        println!("📺 {}", series);
        for ep in episodes {
            println!("   🎬 S{:02}E{:02} {} [{}]", ep.season, ep.number, ep.title, ep.airdate);
        }
        println!();
    }

    if schedule.episodes.is_empty() {
        println!("❌ Nothing aired inside the window.\n");
    }

    schedule.report_missing(std::io::stderr().lock())?;

    println!("✅ Done: {} episodes from {} shows.", schedule.episodes.len(), shows.len());
    Ok(())
}
