//! lawg API CLI binary.
//!
//! A command-line interface for interacting with the lawg API.

use clap::Parser;
use lawg::cli::{Cli, Command, InsightAction};
use lawg::output::{page_footer, PrettyPrint};
use lawg::{
    FeedInfo, InsightInfo, LawgClient, LawgError, LogInfo, NewLog, Page, ProjectManager,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match LawgClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set LAWG_DEV_API_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &LawgClient, cli: Cli) -> lawg::Result<()> {
    let namespace = cli.project.ok_or_else(|| {
        LawgError::ConfigMissing("--project or LAWG_PROJECT is required".to_string())
    })?;
    let project = client.project(namespace);

    match cli.command {
        Command::Project => {
            let project = project.fetch().await?;
            output_single(project.info(), cli.json)
        }
        Command::Feeds { page } => {
            let feeds = project.fetch_feeds(page.into()).await?;
            output_page(&feeds.map(|f| f.into_info()), cli.json, |f| FeedRow::from(f))
        }
        Command::Log {
            feed,
            title,
            description,
            emoji,
            notify,
        } => {
            let log = NewLog {
                title,
                description,
                emoji,
                notify: notify.then_some(true),
                ..NewLog::default()
            };
            let log = project.feed(feed).log(log).await?;
            output_single(log.info(), cli.json)
        }
        Command::Logs { feed, page } => {
            let logs = project.feed(feed).fetch_logs(page.into()).await?;
            output_page(&logs.map(|l| l.into_info()), cli.json, |l| LogRow::from(l))
        }
        Command::Insights { page } => {
            let insights = project.fetch_insights(page.into()).await?;
            output_page(&insights.map(|i| i.into_info()), cli.json, |i| InsightRow::from(i))
        }
        Command::Insight { action } => handle_insight(&project, action, cli.json).await,
    }
}

async fn handle_insight(
    project: &ProjectManager<LawgClient>,
    action: InsightAction,
    json: bool,
) -> lawg::Result<()> {
    let insight = match action {
        InsightAction::Set { id, value } => project.set(&id, value).await?,
        InsightAction::Increment { id, amount } => project.increment(&id, amount).await?,
    };
    output_single(insight.info(), json)
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> lawg::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> lawg::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{}", page_footer(page));
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct FeedRow {
    name: String,
    id: String,
    emoji: String,
    description: String,
}

impl From<&FeedInfo> for FeedRow {
    fn from(f: &FeedInfo) -> Self {
        Self {
            name: f.name.clone(),
            id: f.id.clone(),
            emoji: f.emoji.clone().unwrap_or_default(),
            description: f.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct LogRow {
    id: String,
    emoji: String,
    title: String,
    description: String,
}

impl From<&LogInfo> for LogRow {
    fn from(l: &LogInfo) -> Self {
        Self {
            id: l.id.clone(),
            emoji: l.emoji.clone().unwrap_or_default(),
            title: l.title.clone(),
            description: l
                .description
                .as_deref()
                .map(first_line)
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct InsightRow {
    id: String,
    title: String,
    value: f64,
    updated: String,
}

impl From<&InsightInfo> for InsightRow {
    fn from(i: &InsightInfo) -> Self {
        Self {
            id: i.id.clone(),
            title: i.title.clone(),
            value: i.value,
            updated: i
                .updated_at
                .unwrap_or(i.created_at)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        }
    }
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}
