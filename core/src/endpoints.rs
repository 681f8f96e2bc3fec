//! Resource methods on `SnappyClient`.
//!
//! Each method only picks a path, optional parameters or payload, and a
//! target type; the core operations in `client` do the rest.

use crate::client::SnappyClient;
use crate::error::{ApiError, Result};
use crate::locator::{escape_segment, Locator, Params};
use crate::response::ResponseStream;
use crate::types::{
    Account, Contact, Document, Employee, Mailbox, NewNote, NewWallPost, Note, SearchResults, Ticket,
    WallPost,
};

/// Ticket queues exposed per mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxQueue {
    /// Tickets waiting on a reply.
    Waiting,
    /// New, unassigned tickets.
    Inbox,
    /// Waiting tickets assigned to the authenticated staff member.
    Yours,
}

impl MailboxQueue {
    fn segment(self) -> &'static str {
        match self {
            MailboxQueue::Waiting => "tickets",
            MailboxQueue::Inbox => "inbox",
            MailboxQueue::Yours => "yours",
        }
    }
}

impl SnappyClient {
    // -----------------------------------------------------------------------
    // Accounts
    // -----------------------------------------------------------------------

    /// All accounts the credentials can access.
    pub fn accounts(&self) -> Result<Vec<Account>> {
        self.get_json(&Locator::new("/accounts"))
    }

    pub fn staff(&self, account_id: u64) -> Result<Vec<Employee>> {
        self.get_json(&Locator::new(format!("/account/{account_id}/staff")))
    }

    pub fn mailboxes(&self, account_id: u64) -> Result<Vec<Mailbox>> {
        self.get_json(&Locator::new(format!("/account/{account_id}/mailboxes")))
    }

    pub fn contact_by_id(&self, account_id: u64, contact_id: u64) -> Result<Contact> {
        self.get_json(&Locator::new(format!("/account/{account_id}/contacts/{contact_id}")))
    }

    pub fn contact_by_email(&self, account_id: u64, email: &str) -> Result<Contact> {
        let email = escape_segment(email);
        self.get_json(&Locator::new(format!("/account/{account_id}/contacts/{email}")))
    }

    /// Tickets matching `query`. Pages start at 1; `meta.total` tells how
    /// many results exist overall.
    pub fn search(&self, account_id: u64, query: &str, page: u32) -> Result<SearchResults> {
        let locator = Locator::new(format!("/account/{account_id}/search"))
            .param("page", page.to_string())
            .param("query", query);
        self.get_json(&locator)
    }

    pub fn documents(&self, account_id: u64) -> Result<Vec<Document>> {
        self.get_json(&Locator::new(format!("/account/{account_id}/documents")))
    }

    /// Raw contents of an account document. The returned stream holds the
    /// connection open until it is closed or dropped.
    pub fn download_document(&self, account_id: u64, document_id: u64) -> Result<ResponseStream> {
        self.get_stream(&Locator::new(format!(
            "/account/{account_id}/document/{document_id}/download"
        )))
    }

    // -----------------------------------------------------------------------
    // Wall
    // -----------------------------------------------------------------------

    /// The latest 25 wall posts.
    pub fn wall(&self, account_id: u64) -> Result<Vec<WallPost>> {
        self.get_json(&Locator::new(format!("/account/{account_id}/wall")))
    }

    /// The 25 wall posts that come after `after_post_id`.
    pub fn wall_after(&self, account_id: u64, after_post_id: u64) -> Result<Vec<WallPost>> {
        let locator =
            Locator::new(format!("/account/{account_id}/wall")).param("after", after_post_id.to_string());
        self.get_json(&locator)
    }

    pub fn create_wall_post(&self, account_id: u64, post: &NewWallPost) -> Result<()> {
        self.post_json(&Locator::new(format!("/account/{account_id}/wall")), post)
    }

    pub fn delete_wall_post(&self, account_id: u64, post_id: u64) -> Result<()> {
        self.delete(&Locator::new(format!("/account/{account_id}/wall/{post_id}")))
    }

    pub fn like_wall_post(&self, account_id: u64, post_id: u64) -> Result<()> {
        self.post_empty(&Locator::new(format!("/account/{account_id}/wall/{post_id}/like")))
    }

    pub fn unlike_wall_post(&self, account_id: u64, post_id: u64) -> Result<()> {
        self.delete(&Locator::new(format!("/account/{account_id}/wall/{post_id}/like")))
    }

    pub fn comment_wall_post(&self, account_id: u64, post_id: u64, comment: &str) -> Result<()> {
        let fields = Params::new().with("content", comment);
        self.post_form(
            &Locator::new(format!("/account/{account_id}/wall/{post_id}/comment")),
            &fields,
        )
    }

    pub fn delete_comment(&self, account_id: u64, post_id: u64, comment_id: u64) -> Result<()> {
        self.delete(&Locator::new(format!(
            "/account/{account_id}/wall/{post_id}/comment/{comment_id}"
        )))
    }

    // -----------------------------------------------------------------------
    // Mailboxes
    // -----------------------------------------------------------------------

    pub fn tickets_at_mailbox(&self, mailbox_id: u64, queue: MailboxQueue) -> Result<Vec<Ticket>> {
        self.get_json(&Locator::new(format!("/mailbox/{mailbox_id}/{}", queue.segment())))
    }

    pub fn waiting_at_mailbox(&self, mailbox_id: u64) -> Result<Vec<Ticket>> {
        self.tickets_at_mailbox(mailbox_id, MailboxQueue::Waiting)
    }

    pub fn inbox_at_mailbox(&self, mailbox_id: u64) -> Result<Vec<Ticket>> {
        self.tickets_at_mailbox(mailbox_id, MailboxQueue::Inbox)
    }

    pub fn yours_at_mailbox(&self, mailbox_id: u64) -> Result<Vec<Ticket>> {
        self.tickets_at_mailbox(mailbox_id, MailboxQueue::Yours)
    }

    // -----------------------------------------------------------------------
    // Tickets and notes
    // -----------------------------------------------------------------------

    pub fn ticket(&self, ticket_id: u64) -> Result<Ticket> {
        self.get_json(&Locator::new(format!("/ticket/{ticket_id}")))
    }

    pub fn ticket_notes(&self, ticket_id: u64) -> Result<Vec<Note>> {
        self.get_json(&Locator::new(format!("/ticket/{ticket_id}/notes")))
    }

    /// Raw contents of a ticket attachment. Same ownership rules as
    /// [`SnappyClient::download_document`].
    pub fn download_ticket_attachment(&self, ticket_id: u64, attachment_id: u64) -> Result<ResponseStream> {
        self.get_stream(&Locator::new(format!(
            "/ticket/{ticket_id}/attachment/{attachment_id}/download"
        )))
    }

    /// Replace a ticket's tags. The API takes them as a JSON array inside a
    /// form field.
    pub fn update_tags<S: AsRef<str>>(&self, ticket_id: u64, tags: &[S]) -> Result<()> {
        let tags: Vec<&str> = tags.iter().map(|t| t.as_ref()).collect();
        let encoded = serde_json::to_string(&tags).map_err(ApiError::Encode)?;
        let fields = Params::new().with("tags", encoded);
        self.post_form(&Locator::new(format!("/ticket/{ticket_id}/tags")), &fields)
    }

    pub fn create_note(&self, note: &NewNote) -> Result<()> {
        self.post_json(&Locator::new("/note"), note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_queues_map_to_path_segments() {
        assert_eq!(MailboxQueue::Waiting.segment(), "tickets");
        assert_eq!(MailboxQueue::Inbox.segment(), "inbox");
        assert_eq!(MailboxQueue::Yours.segment(), "yours");
    }
}
