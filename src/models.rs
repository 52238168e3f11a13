//! Data model for the Mail.tm wire format and the local account store.
//!
//! Wire types deserialize leniently: the service occasionally omits fields
//! (empty subjects, messages without a plain-text part), so everything
//! optional defaults instead of failing the whole response.

use serde::{Deserialize, Serialize};

/// Generic envelope for the service's Hydra-style list responses.
///
/// List endpoints wrap their payload as `{ "hydra:member": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct HydraCollection<T> {
    #[serde(rename = "hydra:member", default)]
    pub member: Vec<T>,
}

/// A mail domain offered by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Domain name, without the leading `@`.
    pub domain: String,
    /// Whether the service currently accepts new addresses on this domain.
    #[serde(default)]
    pub is_active: bool,
}

/// Remote account object returned by `POST /accounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Identifier assigned by the service.
    pub id: String,
    /// Full email address of the mailbox.
    pub address: String,
}

/// Body of a successful `POST /token` response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// A sender or recipient: address plus optional display name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Mailbox {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
}

/// Lightweight listing view of a message, as returned by `GET /messages`.
///
/// Not persisted; fetched fresh on every inbox check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    /// Message identifier, used to fetch the full detail.
    pub id: String,
    /// Sender, when the service could parse one.
    #[serde(default)]
    pub from: Option<Mailbox>,
    #[serde(default)]
    pub subject: String,
    /// Short preview of the body.
    #[serde(default)]
    pub intro: String,
    /// Whether the message has been opened before.
    #[serde(default)]
    pub seen: bool,
    /// RFC 3339 creation timestamp, as sent by the service.
    #[serde(default)]
    pub created_at: String,
}

/// Full view of a message, as returned by `GET /messages/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDetail {
    pub id: String,
    #[serde(default)]
    pub from: Option<Mailbox>,
    #[serde(default)]
    pub to: Vec<Mailbox>,
    #[serde(default)]
    pub subject: String,
    /// Plain-text body, absent for HTML-only mail.
    #[serde(default)]
    pub text: Option<String>,
    /// HTML body parts, possibly empty.
    #[serde(default)]
    pub html: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Attachment metadata; contents are never downloaded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: u64,
}

/// An account record persisted in the local store file.
///
/// Field names are the on-disk JSON keys; `created_at` is an RFC 3339
/// string taken from the local clock when the account was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    pub id: String,
    pub address: String,
    pub password: String,
    pub created_at: String,
}
