//! Canned records served by the read-only endpoints.

use serde_json::{json, Value};

/// The one account the stand-in knows about.
pub const ACCOUNT_ID: u64 = 3;
pub const MAILBOX_ID: u64 = 1;
pub const DOCUMENT_ID: u64 = 1;
pub const ATTACHMENT_ID: u64 = 1;

/// Body of every download.
pub const DOWNLOAD_BODY: &[u8] = b"hey now!";

pub fn accounts() -> Value {
    json!([
        {
            "id": ACCOUNT_ID,
            "organization": "Snappy Help",
            "domain": "help.besnappy.com",
            "plan_id": 1,
            "active": 1,
            "created_at": "2012-12-05 15:24:20",
            "updated_at": "2013-05-07 19:48:06",
            "custom_domain": ""
        }
    ])
}

pub fn staff() -> Value {
    json!([
        {
            "id": 123,
            "email": "test1@test.com",
            "sms_number": "",
            "first_name": "Test",
            "last_name": "1",
            "photo": null,
            "culture": "en",
            "notify": 1,
            "created_at": "2013-07-04 04:16:56",
            "updated_at": "2013-12-23 04:20:05",
            "signature": "",
            "tour_played": 1,
            "timezone": "America/Chicago",
            "notify_new": 1,
            "news_read_at": "2013-12-23 04:20:05",
            "address": "test1@test.com",
            "username": "test1"
        },
        {
            "id": 124,
            "email": "test2@test.com",
            "sms_number": "",
            "first_name": "Test",
            "last_name": "2",
            "photo": null,
            "culture": "en",
            "notify": 1,
            "created_at": "2013-07-05 16:12:24",
            "updated_at": "2013-12-21 16:11:15",
            "signature": "",
            "tour_played": 1,
            "timezone": "America/Chicago",
            "notify_new": 0,
            "news_read_at": "2013-12-21 16:11:15",
            "address": "test2@test.com",
            "username": "test2"
        }
    ])
}

pub fn mailbox() -> Value {
    json!({
        "id": MAILBOX_ID,
        "account_id": ACCOUNT_ID,
        "type": "email",
        "address": "hello@test.com",
        "display": "Test",
        "auto_responding": 1,
        "auto_response": "Test Auto Response",
        "active": 1,
        "created_at": "2013-07-04 04:16:56",
        "updated_at": "2013-09-03 01:25:41",
        "custom_address": "test@test.com",
        "theme": "snappy",
        "local_part": "hello"
    })
}

pub fn mailboxes() -> Value {
    Value::Array(vec![mailbox()])
}

pub fn contacts() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "account_id": ACCOUNT_ID,
            "first_name": "Test",
            "last_name": "1",
            "value": "test@test.com",
            "provider": "email",
            "created_at": "2013-12-21 15:50:19",
            "updated_at": "2013-12-21 15:50:19",
            "address": "test@test.com"
        }),
        json!({
            "id": 2,
            "account_id": ACCOUNT_ID,
            "first_name": "Plus",
            "last_name": "Addressed",
            "value": "first+last@test.com",
            "provider": "email",
            "created_at": "2013-12-23 20:37:31",
            "updated_at": "2013-12-23 20:37:31",
            "address": "first+last@test.com"
        }),
    ]
}

fn ticket(id: u64, status: &str, subject: &str, contact: Value) -> Value {
    json!({
        "id": id,
        "account_id": ACCOUNT_ID,
        "mailbox_id": MAILBOX_ID,
        "created_via": "email",
        "last_reply_by": "customer",
        "last_reply_at": 1387831051,
        "opened_by_staff_id": null,
        "opened_by_contact_id": contact["id"],
        "opened_at": 1387831051,
        "status": status,
        "first_staff_reply_at": null,
        "default_subject": subject,
        "summary": "Summary",
        "next_recipients": {
            "cc": [],
            "bcc": [],
            "to": [{"name": "To Test", "address": contact["address"]}]
        },
        "created_at": 1387831051,
        "updated_at": "2013-12-23 20:37:33",
        "tags": ["@test1", "#support"],
        "unread": true,
        "contacts": [contact.clone()],
        "mailbox": mailbox(),
        "opener": contact
    })
}

pub fn tickets() -> Vec<Value> {
    let contacts = contacts();
    vec![
        ticket(1, "waiting", "Printer on fire", contacts[0].clone()),
        ticket(2, "new", "Password reset", contacts[1].clone()),
        ticket(3, "replied", "Invoice question", contacts[0].clone()),
    ]
}

/// Ids of the tickets listed under a mailbox queue path segment.
pub fn queue(segment: &str) -> Option<&'static [u64]> {
    match segment {
        "tickets" => Some(&[1]),
        "inbox" => Some(&[2]),
        "yours" => Some(&[1]),
        _ => None,
    }
}

pub fn documents() -> Value {
    json!([
        {
            "id": DOCUMENT_ID,
            "account_id": ACCOUNT_ID,
            "filename": "Filename",
            "type": "image/png",
            "size": 59788,
            "storage_key": "fake",
            "created_at": "2013-07-10 15:41:34",
            "updated_at": "2013-07-10 15:41:34",
            "store": 0
        }
    ])
}

pub fn notes(ticket_id: u64) -> Value {
    let creator = contacts()[0].clone();
    json!([
        {
            "id": 1,
            "account_id": ACCOUNT_ID,
            "ticket_id": ticket_id,
            "facebook_message": null,
            "created_by_staff_id": null,
            "created_by_contact_id": creator["id"],
            "scope": "public",
            "created_at": 1387832548,
            "updated_at": "2013-12-23 21:02:28",
            "content": "Content",
            "system": 0,
            "contacts": [creator.clone()],
            "staff_creator": null,
            "contact_creator": creator.clone(),
            "attachments": [],
            "creator": creator
        }
    ])
}
