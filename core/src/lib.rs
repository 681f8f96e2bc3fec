//! Blocking client for the Snappy help-desk API.
//!
//! # Overview
//! `SnappyClient` talks to the Snappy REST/JSON API: accounts, staff,
//! contacts, tickets, mailboxes, notes, documents, and wall posts. Every
//! call authenticates with HTTP Basic, runs one exchange on the calling
//! thread, and either decodes the body into a typed record or returns it as
//! a stream.
//!
//! # Design
//! - The client is stateless apart from an immutable `ClientConfig`; calls
//!   share nothing and can run concurrently from several threads.
//! - Requests are built as plain data (`HttpRequest`) before a `Transport`
//!   executes them, so auth and encoding rules are testable offline.
//! - Exactly HTTP 200 is success. Everything else is `ApiError::Remote` and
//!   the body is never shown to the caller.
//! - `ResponseStream` releases its connection on `close` or `Drop`, so
//!   downloads cannot leak even on early returns.
//!
//! ```no_run
//! use snappy_core::SnappyClient;
//!
//! let client = SnappyClient::with_api_key("my-api-key");
//! for account in client.accounts()? {
//!     println!("{} {}", account.id, account.organization);
//! }
//! # Ok::<(), snappy_core::ApiError>(())
//! ```

pub mod auth;
pub mod body;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod locator;
pub mod response;
pub mod transport;
pub mod types;

pub use auth::Credentials;
pub use body::{Body, Encoding};
pub use client::SnappyClient;
pub use config::ClientConfig;
pub use endpoints::MailboxQueue;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use locator::{Locator, Params};
pub use response::ResponseStream;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Account, Contact, Document, Employee, Mailbox, NewNote, NewWallPost, Note, NoteAddress, Recipients,
    SearchMeta, SearchResults, Ticket, WallComment, WallPost,
};
