//! Basic example demonstrating the lawg API client.
//!
//! Run with:
//! ```
//! LAWG_DEV_API_TOKEN=your-token LAWG_PROJECT=acme cargo run --example basic
//! ```

use lawg::{
    EventTemplate, EventTemplates, LawgClient, LawgError, NewInsight, NewLog, Pagination,
};

#[tokio::main]
async fn main() -> lawg::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating lawg client...");
    let client = LawgClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    let namespace = std::env::var("LAWG_PROJECT")
        .map_err(|_| LawgError::ConfigMissing("LAWG_PROJECT is required".to_string()))?;
    let project = client.project(namespace);

    // Show the project and its feeds
    println!("\n--- Project ---");
    let info = project.fetch().await?;
    println!("{} ({})", info.name, info.id);
    for feed in &info.feeds {
        println!("  - {} {}", feed.emoji.as_deref().unwrap_or(" "), feed.name);
    }

    // Log an event from a template
    println!("\n--- Logging ---");
    let mut templates = EventTemplates::new();
    templates.register(
        "deploy",
        EventTemplate {
            title: Some("Deployed".to_string()),
            description: None,
            emoji: Some("🚀".to_string()),
        },
    );

    let feed = project.feed("releases");
    let log = feed
        .event(&templates, "deploy", Some("from the basic example"))
        .await?;
    println!("Logged {} to {}", log.id, log.feed());

    let mut note = feed
        .log(NewLog::new("Example note").tag("source", "demo"))
        .await?;
    println!("Logged {}", note.id);

    // Page through recent logs
    println!("\n--- Recent Logs ---");
    let page = feed.fetch_logs(Pagination::new(5, 0)).await?;
    for log in page.iter() {
        println!("  {} {}", log.id, log.title);
    }
    if page.has_more {
        println!("  ... more at offset {}", page.next().effective_offset());
    }

    // Counters
    println!("\n--- Insights ---");
    let mut visits = project
        .create_insight(&NewInsight::new("Demo visits").emoji("👀"))
        .await?;
    visits.increment(1.0).await?;
    println!("{} = {}", visits.title, visits.value);

    // Clean up
    note.delete().await?;
    visits.delete().await?;
    println!("\nDone.");

    Ok(())
}
