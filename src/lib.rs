//! # Mail.tm Client
//! Asynchronous wrapper around the Mail.tm disposable email HTTP API plus an interactive console, providing simple methods to create, poll, and delete temporary mailboxes from Rust using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who need throwaway addresses in integration tests, demos, or automation scripts without running mail infrastructure: configure with [`ClientBuilder`], create an account, obtain a token, poll for messages ([`MessageSummary`]), then discard the mailbox when done. The `mailtm-client` binary wraps the same library in a numbered menu for interactive use, persisting generated credentials in a local JSON [`Store`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`, so ensure the chosen Tokio features (`rt-multi-thread` or `current_thread`) are available in your application.
//!
//! ## Out of scope
//! Not a general-purpose mail client, SMTP sender, or durable mailbox. It only proxies the Mail.tm service and inherits its availability, spam filtering, and retention limits.
//!
//! ## Errors
//! Transport failures surface as [`Error::Request`]; an address rejected as taken becomes [`Error::AddressTaken`]; any other unexpected HTTP status becomes [`Error::Status`] with the response body attached. Shape or content issues become [`Error::Json`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use mailtm_client::{Client, generate_password, generate_username};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailtm_client::Error> {
//!     let client = Client::new()?;
//!     let domains = client.list_domains().await?;
//!
//!     let address = format!("{}@{}", generate_username(10), domains[0]);
//!     let password = generate_password(16);
//!     let account = client.create_account(&address, &password).await?;
//!     println!("Created: {address}");
//!
//!     let token = client.get_token(&address, &password).await?;
//!     for msg in client.list_messages(&token).await? {
//!         println!("From: {:?}, Subject: {}", msg.from, msg.subject);
//!     }
//!
//!     client.delete_account(&token, &account.id).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
mod client;
mod credentials;
mod error;
mod models;
mod store;

pub use client::{Client, ClientBuilder};
pub use credentials::{generate_password, generate_username};
pub use error::Error;
pub use models::{
    Account, Attachment, Domain, Mailbox, MessageDetail, MessageSummary, StoredAccount,
};
pub use store::{DEFAULT_STORE_FILE, Store};

/// Result type alias for Mail.tm operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
