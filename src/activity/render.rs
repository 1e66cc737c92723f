// Activity rendering.
// Turns events into one human-readable line each, with relative ages.

use chrono::{DateTime, TimeDelta, Utc};

use crate::github::{Event, EventKind};

/// Line shown in place of a feed with no events.
pub const NO_ACTIVITY: &str = "No recent activity to display.";

/// Render events as of now.
pub fn render(events: &[Event], filter: Option<&str>) -> Vec<String> {
    render_at(events, filter, Utc::now())
}

/// Render events, measuring ages from `now`.
///
/// An empty feed yields the single [`NO_ACTIVITY`] line. The filter matches
/// event types case-insensitively and an empty filter matches everything;
/// input order is kept.
pub fn render_at(events: &[Event], filter: Option<&str>, now: DateTime<Utc>) -> Vec<String> {
    if events.is_empty() {
        return vec![NO_ACTIVITY.to_string()];
    }
    let filter = filter.filter(|f| !f.is_empty());

    events
        .iter()
        .filter(|event| matches_filter(event, filter))
        .map(|event| {
            let age = event
                .created_at
                .map(|created| format_age(now.signed_duration_since(created)))
                .unwrap_or_else(|| "unknown time".to_string());
            format!("- [{}] {}", age, describe(event))
        })
        .collect()
}

fn matches_filter(event: &Event, filter: Option<&str>) -> bool {
    match (filter, event.type_name.as_deref()) {
        (None, _) => true,
        (Some(wanted), Some(actual)) => wanted.to_lowercase() == actual.to_lowercase(),
        (Some(_), None) => false,
    }
}

/// Format an elapsed duration as days, hours, or minutes ago.
pub fn format_age(age: TimeDelta) -> String {
    let age = age.max(TimeDelta::zero());
    if age.num_days() >= 1 {
        format!("{} days ago", age.num_days())
    } else if age.num_hours() >= 1 {
        format!("{} hours ago", age.num_hours())
    } else {
        format!("{} minutes ago", age.num_minutes())
    }
}

/// Kind-specific message for an event.
pub fn describe(event: &Event) -> String {
    let repo = text(&event.repo);
    match &event.kind {
        EventKind::Push { commits } => format!("Pushed {} commits to {}", commits, repo),
        EventKind::Create { ref_type } => {
            format!("Created a new {} in {}", text(ref_type), repo)
        }
        EventKind::Issues { action, title } => format!(
            "{} issue '{}' in {}",
            capitalize(text(action)),
            text(title),
            repo
        ),
        EventKind::IssueComment => format!("Commented on an issue in {}", repo),
        EventKind::PullRequest { action, title } => format!(
            "{} pull request '{}' in {}",
            capitalize(text(action)),
            text(title),
            repo
        ),
        EventKind::Watch { action } => {
            format!("{} watching {}", capitalize(text(action)), repo)
        }
        EventKind::Other => format!("{} on {}", text(&event.type_name), repo),
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Uppercase the first character, leaving the rest unchanged.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
