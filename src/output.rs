//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{FeedInfo, InsightInfo, LogInfo, Page, ProjectInfo};

/// Trait for human-readable key-value output.
///
/// Implemented by payload types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for ProjectInfo {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Project: {}", self.namespace));
        lines.push(format!("ID:             {}", self.id));
        lines.push(format!("Name:           {}", self.name));

        if !self.feeds.is_empty() {
            let names: Vec<&str> = self.feeds.iter().map(|f| f.name.as_str()).collect();
            lines.push(format!("Feeds:          {}", names.join(", ")));
        }

        if !self.members.is_empty() {
            let names: Vec<&str> = self.members.iter().map(|m| m.username.as_str()).collect();
            lines.push(format!("Members:        {}", names.join(", ")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for FeedInfo {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Feed: {}", self.name));
        lines.push(format!("ID:             {}", self.id));

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        if let Some(ref emoji) = self.emoji {
            lines.push(format!("Emoji:          {}", emoji));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for LogInfo {
    fn pretty_print(&self) -> String {
        let title = match self.emoji {
            Some(ref emoji) => format!("{} {}", emoji, self.title),
            None => self.title.clone(),
        };
        let mut lines = header(title);
        lines.push(format!("ID:             {}", self.id));
        lines.push(format!("Feed:           {}", self.feed_id));

        if let Some(ref description) = self.description {
            lines.push(String::new());
            lines.push(description.clone());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for InsightInfo {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Insight: {}", self.title));
        lines.push(format!("ID:             {}", self.id));
        lines.push(format!("Value:          {}", self.value));

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        lines.push(format!(
            "Created:        {}",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if let Some(ref updated) = self.updated_at {
            lines.push(format!("Updated:        {}", updated.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        lines.join("\n")
    }
}

/// Footer shown under a table of paged results.
///
/// Positions are 1-based and saturate at `u32::MAX`.
pub fn page_footer<T>(page: &Page<T>) -> String {
    if page.is_empty() {
        return format!("No items at offset {}", page.offset);
    }

    let count = u32::try_from(page.len()).unwrap_or(u32::MAX);
    let first = page.offset.saturating_add(1);
    let last = page.offset.saturating_add(count);
    if page.has_more {
        format!(
            "Items {first}-{last} (more available, next: --offset {})",
            page.next().effective_offset()
        )
    } else {
        format!("Items {first}-{last} (end)")
    }
}
