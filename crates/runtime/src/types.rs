//! Wire types for the Trello REST API
//!
//! These cover the subset of the Trello schema the fetch query requests.
//! Collections default to empty when the API omits them: a card with no
//! attachments deserializes to an empty vector, not an error.

use serde::{Deserialize, Serialize};

/// A Trello card with the expansions requested by the fetch query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Full card id
    pub id: String,
    /// Card title
    pub name: String,
    /// Card description (markdown)
    #[serde(default)]
    pub desc: String,
    /// Due date, ISO-8601
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// Whether the due date is marked complete
    #[serde(default)]
    pub due_complete: bool,
    /// Compact URL-safe card identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_link: Option<String>,
    /// Short URL for the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
    /// Full URL for the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Timestamp of the last activity on the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_last_activity: Option<String>,
    /// Owning board id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_board: Option<String>,
    /// Owning list id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_list: Option<String>,
    /// Badge counters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<Badges>,
    /// Labels attached to the card
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Members assigned to the card
    #[serde(default)]
    pub members: Vec<Member>,
    /// Attachments on the card
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// `commentCard` actions, bounded by the requested actions limit
    #[serde(default)]
    pub actions: Vec<CommentAction>,
}

/// Badge counters summarizing card state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badges {
    /// Due date shown on the card face
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// Whether the due date is complete
    #[serde(default)]
    pub due_complete: bool,
    /// Whether the viewer is subscribed to the card
    #[serde(default)]
    pub subscribed: bool,
    /// Number of attachments
    #[serde(default)]
    pub attachments: u32,
    /// Total checklist items
    #[serde(default)]
    pub check_items: u32,
    /// Checked checklist items
    #[serde(default)]
    pub check_items_checked: u32,
    /// Vote count
    #[serde(default)]
    pub votes: u32,
}

/// A label with the name/color fields the fetch query requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Label id
    #[serde(default)]
    pub id: String,
    /// Display name; may be empty for color-only labels
    #[serde(default)]
    pub name: String,
    /// Label color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A board member with the fullName/username fields the fetch query requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member id
    #[serde(default)]
    pub id: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Login handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// An attachment with the metadata fields the fetch query requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Attachment URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Direct download URL, when distinct from `url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Size in bytes; absent for link attachments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    /// Upload timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// MIME type, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// True for uploaded files, false for link attachments
    #[serde(default)]
    pub is_upload: bool,
}

/// A `commentCard` action from the card's audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAction {
    /// Action id
    #[serde(default)]
    pub id: String,
    /// Timestamp the comment was left at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// The member who left the comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_creator: Option<Member>,
    /// Action payload
    #[serde(default)]
    pub data: CommentData,
}

/// Payload of a `commentCard` action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentData {
    /// The comment text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A list (column) on a board, as returned by the board list collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    /// List id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// A board with the fields the create flow requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Board id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Compact URL-safe board identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_link: Option<String>,
}

/// Form body for card creation. Field names follow Trello's wire contract;
/// label and member ids are comma-joined as Trello expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    /// Card title (required, non-empty)
    pub name: String,
    /// Resolved destination list id
    pub id_list: String,
    /// Card description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Position in the list: top, bottom, or a fractional value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// Due date, ISO-8601
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// Comma-joined label ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_labels: Option<String>,
    /// Comma-joined member ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_members: Option<String>,
    /// URL to attach at creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_deserializes_with_missing_collections() {
        let card: Card = serde_json::from_str(r#"{"id": "abc", "name": "A card"}"#).unwrap();
        assert_eq!(card.name, "A card");
        assert!(card.attachments.is_empty());
        assert!(card.actions.is_empty());
        assert!(card.labels.is_empty());
        assert!(!card.due_complete);
    }

    #[test]
    fn create_request_serializes_trello_field_names() {
        let request = CreateCardRequest {
            name: "New card".to_string(),
            id_list: "list-1".to_string(),
            desc: None,
            pos: Some("bottom".to_string()),
            due: None,
            id_labels: Some("l1,l2".to_string()),
            id_members: None,
            url_source: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["idList"], "list-1");
        assert_eq!(value["idLabels"], "l1,l2");
        assert_eq!(value["pos"], "bottom");
        assert!(value.get("desc").is_none());
        assert!(value.get("idMembers").is_none());
    }
}
