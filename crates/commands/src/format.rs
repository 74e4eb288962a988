//! Output formatting for card payloads
//!
//! Pure functions over fetched payloads: deterministic for a given payload
//! and mode, with no network, environment, or clock access. Markdown
//! rendering follows a fixed section order: title, metadata, description,
//! attachments, comments.

use chrono::DateTime;

use trel_runtime::types::{
    Attachment, Badges, Board, BoardList, Card, CommentAction, Label, Member,
};

/// Render a card as a human-readable markdown summary.
///
/// Comments are rendered newest first and truncated to `comment_limit`.
pub fn markdown_card(card: &Card, comment_limit: usize) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## Trello card: {}", card.name));
    if let Some(url) = card.short_url.as_deref().or(card.url.as_deref()) {
        lines.push(format!("[Open in Trello]({url})"));
    }
    lines.push(String::new());

    lines.push(format!(
        "- Short link: {}",
        card.short_link.as_deref().unwrap_or("<n/a>")
    ));
    lines.push(format!(
        "- Due: {}",
        card.due.as_deref().map_or_else(|| "n/a".to_string(), format_timestamp)
    ));
    lines.push(format!("- Members: {}", format_members(&card.members)));
    lines.push(format!("- Labels: {}", format_labels(&card.labels)));
    if let Some(badges) = &card.badges {
        let summary = summarize_badges(badges);
        if !summary.is_empty() {
            lines.push(format!("- Badges: {summary}"));
        }
    }
    if let Some(last_activity) = card.date_last_activity.as_deref() {
        lines.push(format!("- Last activity: {}", format_timestamp(last_activity)));
    }
    lines.push(String::new());

    lines.push("### Description".to_string());
    let description = card.desc.trim();
    if description.is_empty() {
        lines.push("<no description>".to_string());
    } else {
        for line in description.lines() {
            lines.push(format!("  {line}"));
        }
    }
    lines.push(String::new());

    lines.push("### Attachments".to_string());
    if card.attachments.is_empty() {
        lines.push("<no attachments>".to_string());
    } else {
        for attachment in &card.attachments {
            lines.push(format_attachment(attachment));
        }
    }
    lines.push(String::new());

    lines.push("### Comments".to_string());
    let comments = recent_comments(&card.actions, comment_limit);
    if comments.is_empty() {
        lines.push("<no comments>".to_string());
    } else {
        for comment in comments {
            lines.push(format_comment(comment));
        }
    }

    lines.join("\n")
}

/// Render the confirmation summary for a freshly created card.
pub fn created_card_summary(card: &Card, board: &Board, list: &BoardList) -> String {
    let board_ref = board.short_link.as_deref().unwrap_or(&board.id);
    [
        "Created Trello card:".to_string(),
        format!("- Name: {}", card.name),
        format!("- Board: {} ({board_ref})", board.name),
        format!("- List: {}", list.name),
        format!("- URL: {}", card.short_url.as_deref().unwrap_or("<n/a>")),
        format!("- ID: {}", card.id),
    ]
    .join("\n")
}

/// Pretty-printed JSON pass-through of the filtered payload, for downstream
/// automation.
pub fn json_payload(card: &Card) -> serde_json::Result<String> {
    serde_json::to_string_pretty(card)
}

/// Comments with text, newest first, truncated to `limit`.
///
/// The API usually returns actions newest first already; re-sorting on the
/// timestamp keeps the ordering guarantee independent of the payload.
fn recent_comments(actions: &[CommentAction], limit: usize) -> Vec<&CommentAction> {
    let mut commented: Vec<&CommentAction> = actions
        .iter()
        .filter(|action| action.data.text.as_deref().is_some_and(|t| !t.is_empty()))
        .collect();
    commented.sort_by(|a, b| b.date.cmp(&a.date));
    commented.truncate(limit);
    commented
}

fn format_comment(action: &CommentAction) -> String {
    let author = action
        .member_creator
        .as_ref()
        .map_or_else(|| "Unknown".to_string(), member_display);
    let date = action
        .date
        .as_deref()
        .map_or_else(|| "n/a".to_string(), format_timestamp);
    let text = action.data.text.as_deref().unwrap_or_default();
    format!("- {date} by {author}: {text}")
}

fn format_attachment(attachment: &Attachment) -> String {
    let name = attachment.name.as_deref().unwrap_or("Attachment");
    let mut meta: Vec<String> = Vec::new();
    if let Some(bytes) = attachment.bytes {
        meta.push(human_readable_bytes(bytes));
    }
    if let Some(mime) = attachment.mime_type.as_deref() {
        meta.push(mime.to_string());
    }
    if attachment.is_upload {
        meta.push("uploaded".to_string());
    }
    let meta_text = if meta.is_empty() {
        String::new()
    } else {
        format!(" ({})", meta.join(", "))
    };
    match attachment.url.as_deref().or(attachment.download_url.as_deref()) {
        Some(url) => format!("- [{name}]({url}){meta_text}"),
        None => format!("- {name}{meta_text}"),
    }
}

fn format_labels(labels: &[Label]) -> String {
    if labels.is_empty() {
        return "<none>".to_string();
    }
    labels
        .iter()
        .map(|label| {
            let name = if label.name.is_empty() {
                if label.id.is_empty() { "<label>" } else { &label.id }
            } else {
                &label.name
            };
            match label.color.as_deref() {
                Some(color) => format!("{name} ({color})"),
                None => name.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_members(members: &[Member]) -> String {
    if members.is_empty() {
        return "<none>".to_string();
    }
    members
        .iter()
        .map(member_display)
        .collect::<Vec<_>>()
        .join(", ")
}

fn member_display(member: &Member) -> String {
    let name = member
        .full_name
        .as_deref()
        .or(member.username.as_deref())
        .unwrap_or(&member.id);
    let name = if name.is_empty() { "<member>" } else { name };
    match member.username.as_deref() {
        Some(username) if !name.contains(username) => format!("{name} (@{username})"),
        _ => name.to_string(),
    }
}

fn summarize_badges(badges: &Badges) -> String {
    let mut pieces: Vec<String> = Vec::new();
    if let Some(due) = badges.due.as_deref() {
        pieces.push(format!("due {}", format_timestamp(due)));
    }
    if badges.due_complete {
        pieces.push("completed".to_string());
    }
    if badges.subscribed {
        pieces.push("subscribed".to_string());
    }
    if badges.attachments > 0 {
        pieces.push(format!("{} attachments", badges.attachments));
    }
    if badges.check_items > 0 {
        pieces.push(format!(
            "{}/{} checklist items",
            badges.check_items_checked, badges.check_items
        ));
    }
    if badges.votes > 0 {
        pieces.push(format!("votes: {}", badges.votes));
    }
    pieces.join(", ")
}

/// Normalize an ISO-8601 timestamp for display; unparseable values pass
/// through verbatim.
fn format_timestamp(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map_or_else(|_| value.to_string(), |parsed| parsed.to_rfc3339())
}

fn human_readable_bytes(num: u64) -> String {
    let mut size = num as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{size:.1}{unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1}PB")
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
