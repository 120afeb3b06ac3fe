//! Domain records shared between the store, the matching heuristic, and the
//! HTTP tier.
//!
//! Field names serialize in camelCase (`itemName`, `contactEmail`,
//! `createdAt`, ...) so the on-disk JSON documents and the wire payloads
//! share one shape. A report's lost/found side is serialized under the
//! `type` key.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fixed category set. Reports must use one of these verbatim; matching
/// compares categories case-sensitively.
pub const CATEGORIES: [&str; 10] = [
    "Electronics",
    "Documents",
    "Jewelry",
    "Clothing",
    "Bags",
    "Keys",
    "Wallet/Purse",
    "Books",
    "Accessories",
    "Other",
];

/// Returns true if `category` is one of [`CATEGORIES`].
pub fn is_valid_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

/// Which side of the lost/found ledger a report belongs to.
///
/// Lost and found reports live in independent collections; ids are unique
/// only within their own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lost,
    Found,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
        }
    }

    /// The opposite side, used when cross-linking a reunited pair.
    pub fn counterpart(&self) -> ItemKind {
        match self {
            ItemKind::Lost => ItemKind::Found,
            ItemKind::Found => ItemKind::Lost,
        }
    }
}

/// Lifecycle state of a report. A report moves active -> resolved exactly
/// once and never back; resolved reports are excluded from matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Resolved,
}

/// Snapshot of the counterpart record taken at resolution time.
///
/// This is a copy, not a live reference: later edits to the counterpart do
/// not propagate into an already-resolved record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedWith {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub item_name: String,
    pub contact_name: String,
    pub contact_email: String,
}

/// A single lost or found item report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReport {
    /// Unique within the report's own collection, assigned at creation.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub item_name: String,
    pub category: String,
    pub description: String,
    /// Date the item was lost or found, not the submission date.
    pub date: NaiveDate,
    pub location: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    #[serde(default)]
    pub image_url: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_with: Option<MatchedWith>,
}

impl ItemReport {
    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    /// The snapshot of this record that gets embedded into its counterpart
    /// when the pair is reunited.
    pub fn snapshot(&self) -> MatchedWith {
        MatchedWith {
            id: self.id.clone(),
            kind: self.kind,
            item_name: self.item_name.clone(),
            contact_name: self.contact_name.clone(),
            contact_email: self.contact_email.clone(),
        }
    }
}

/// Caller-supplied fields for a new report. The store fills in `id`,
/// `status`, and `created_at` on insert.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub item_name: String,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    #[serde(default)]
    pub image_url: String,
}

impl ItemDraft {
    /// Required-field check mirroring the submission contract: every field
    /// except `image_url` must be non-empty.
    pub fn has_required_fields(&self) -> bool {
        !(self.item_name.trim().is_empty()
            || self.category.trim().is_empty()
            || self.description.trim().is_empty()
            || self.location.trim().is_empty()
            || self.contact_name.trim().is_empty()
            || self.contact_email.trim().is_empty()
            || self.contact_phone.trim().is_empty())
    }
}

/// A registered account. Passwords are stored as submitted; hashing is an
/// explicit non-goal of this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Stored lowercased; uniqueness is case-insensitive.
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// User view with the password stripped, safe to return from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
            created_at: self.created_at,
        }
    }
}
