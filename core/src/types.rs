//! Domain records exchanged with the Snappy API.
//!
//! # Design
//! Response records use container-level `#[serde(default)]` because the API
//! omits fields freely; anything it is known to send as `null` is an
//! `Option`. Create payloads (`NewNote`, `NewWallPost`) leave unset optional
//! references out of the JSON document entirely.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: u64,
    pub organization: String,
    pub domain: String,
    pub plan_id: u64,
    pub active: u8,
    pub created_at: String,
    pub updated_at: String,
    pub custom_domain: String,
}

/// A staff member who can log into Snappy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    pub id: u64,
    pub email: String,
    pub sms_number: String,
    pub first_name: String,
    pub last_name: String,
    pub photo: Option<String>,
    pub culture: String,
    pub notify: u8,
    pub signature: String,
    pub tour_played: u8,
    pub timezone: String,
    pub notify_new: u8,
    pub news_read_at: Option<String>,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: u64,
    pub account_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub value: String,
    pub provider: String,
    pub address: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mailbox {
    pub id: u64,
    pub account_id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub display: String,
    pub auto_responding: u8,
    pub auto_response: String,
    pub active: u8,
    pub custom_address: String,
    pub theme: String,
    pub local_part: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Name and e-mail address pair used by notes and ticket recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteAddress {
    pub name: String,
    pub address: String,
}

/// Who the next reply on a ticket goes to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipients {
    pub to: Vec<NoteAddress>,
    pub cc: Vec<NoteAddress>,
    pub bcc: Vec<NoteAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticket {
    pub id: u64,
    pub account_id: u64,
    pub mailbox_id: u64,
    pub created_via: String,
    pub last_reply_by: String,
    pub last_reply_at: i64,
    pub opened_by_staff_id: Option<u64>,
    pub opened_by_contact_id: Option<u64>,
    pub opened_at: i64,
    pub status: String,
    pub first_staff_reply_at: Option<String>,
    pub default_subject: String,
    pub summary: String,
    pub next_recipients: Option<Recipients>,
    pub created_at: i64,
    pub updated_at: String,
    pub unread: bool,
    pub tags: Vec<String>,
    pub contacts: Vec<Contact>,
    pub mailbox: Option<Mailbox>,
    pub opener: Option<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMeta {
    pub total: u64,
    /// The API reports the page as a string.
    pub page: String,
}

/// One page of ticket search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub meta: SearchMeta,
    #[serde(rename = "data")]
    pub tickets: Vec<Ticket>,
}

/// A file stored on an account or attached to a ticket note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: u64,
    pub account_id: u64,
    pub note_id: Option<u64>,
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: u64,
    pub storage_key: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub id: u64,
    pub account_id: u64,
    pub ticket_id: u64,
    pub created_by_staff_id: Option<u64>,
    pub created_by_contact_id: Option<u64>,
    pub scope: String,
    pub created_at: i64,
    pub updated_at: String,
    pub content: String,
    pub contacts: Vec<Contact>,
    pub creator: Option<Contact>,
    pub attachments: Vec<Document>,
}

/// Payload for creating a note.
///
/// `ticket_nonce` is sent as `id`; leaving it unset starts a new ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub subject: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailbox_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<NoteAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from: Vec<NoteAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<u64>,
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub ticket_nonce: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallComment {
    pub id: u64,
    #[serde(rename = "post_id")]
    pub wall_post_id: u64,
    pub staff_id: u64,
    pub content: String,
    pub content_markdown: String,
    pub created_at: String,
    pub updated_at: String,
    pub staff: Option<Employee>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallPost {
    pub id: u64,
    pub account_id: u64,
    pub staff_id: u64,
    pub ticket_id: Option<u64>,
    pub note_id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub content_markdown: String,
    pub created_at: String,
    pub updated_at: String,
    pub tags: Vec<String>,
    pub likes: Vec<String>,
    pub like_count: u64,
    pub comments: Vec<WallComment>,
}

/// Payload for creating a wall post. `ticket` and `note` link the post to
/// an existing record and are left out when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWallPost {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<u64>,
}
