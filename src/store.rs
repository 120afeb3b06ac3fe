//! Flat-file JSON persistence.
//!
//! Three independent collections live under one data directory, each a
//! single wrapped document:
//!
//! - `users.json`       -> `{"users": [...]}`
//! - `lost-items.json`  -> `{"lostItems": [...]}`
//! - `found-items.json` -> `{"foundItems": [...]}`
//!
//! Every write serializes the whole document pretty-printed to a sibling
//! temp file and renames it over the target, so a single file is never left
//! torn. Mutating operations take an internal lock; the store is safe to
//! share behind an `Arc` within one process. Cross-file consistency during
//! [`JsonStore::reunite`] is weaker: the two collections are written one
//! after the other, and a crash between the writes can leave one side
//! resolved (logged at error level when the second write fails).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{ItemDraft, ItemKind, ItemReport, ItemStatus, User};

const USERS_FILE: &str = "users.json";
const LOST_ITEMS_FILE: &str = "lost-items.json";
const FOUND_ITEMS_FILE: &str = "found-items.json";

/// Errors produced by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("lost item not found")]
    LostItemNotFound,

    #[error("found item not found")]
    FoundItemNotFound,

    #[error("report {0} is already resolved")]
    AlreadyResolved(String),

    #[error("user with this email already exists")]
    EmailTaken,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersDoc {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LostItemsDoc {
    #[serde(default, rename = "lostItems")]
    lost_items: Vec<ItemReport>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FoundItemsDoc {
    #[serde(default, rename = "foundItems")]
    found_items: Vec<ItemReport>,
}

/// JSON-file backed store for users and item reports.
pub struct JsonStore {
    data_dir: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    /// Collection files are created lazily on first write; a missing file
    /// reads as the empty collection.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_doc<T: Default + DeserializeOwned>(&self, file: &str) -> T {
        let path = self.data_dir.join(file);
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(doc) => doc,
                Err(err) => {
                    tracing::warn!(file, %err, "unreadable collection file, treating as empty");
                    T::default()
                }
            },
            // Absent file: the collection simply has no records yet.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
            Err(err) => {
                tracing::warn!(file, %err, "failed to read collection file, treating as empty");
                T::default()
            }
        }
    }

    /// Pretty-print the whole document to a temp file and rename it over
    /// the target, so readers never observe a partial write.
    fn write_doc<T: Serialize>(&self, file: &str, doc: &T) -> Result<(), StoreError> {
        let path = self.data_dir.join(file);
        let tmp = self.data_dir.join(format!("{file}.tmp"));
        fs::write(&tmp, serde_json::to_string_pretty(doc)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    // ── Users ────────────────────────────────────────────────────────────

    pub fn list_users(&self) -> Vec<User> {
        self.read_doc::<UsersDoc>(USERS_FILE).users
    }

    /// Case-insensitive lookup by email.
    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let needle = email.to_lowercase();
        self.list_users()
            .into_iter()
            .find(|u| u.email.to_lowercase() == needle)
    }

    /// Register a new account. The email is stored lowercased and must be
    /// unique case-insensitively.
    pub fn add_user(&self, name: &str, email: &str, password: &str) -> Result<User, StoreError> {
        let _guard = self.write_lock.lock().expect("store lock poisoned");

        let mut doc = self.read_doc::<UsersDoc>(USERS_FILE);
        let needle = email.to_lowercase();
        if doc.users.iter().any(|u| u.email.to_lowercase() == needle) {
            return Err(StoreError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: needle,
            password: password.to_string(),
            is_admin: false,
            created_at: Utc::now(),
        };
        doc.users.push(user.clone());
        self.write_doc(USERS_FILE, &doc)?;

        tracing::info!(user_id = %user.id, "registered user");
        Ok(user)
    }

    // ── Item reports ─────────────────────────────────────────────────────

    fn collection_file(kind: ItemKind) -> &'static str {
        match kind {
            ItemKind::Lost => LOST_ITEMS_FILE,
            ItemKind::Found => FOUND_ITEMS_FILE,
        }
    }

    fn read_items(&self, kind: ItemKind) -> Vec<ItemReport> {
        match kind {
            ItemKind::Lost => self.read_doc::<LostItemsDoc>(LOST_ITEMS_FILE).lost_items,
            ItemKind::Found => self.read_doc::<FoundItemsDoc>(FOUND_ITEMS_FILE).found_items,
        }
    }

    fn write_items(&self, kind: ItemKind, items: Vec<ItemReport>) -> Result<(), StoreError> {
        match kind {
            ItemKind::Lost => self.write_doc(LOST_ITEMS_FILE, &LostItemsDoc { lost_items: items }),
            ItemKind::Found => {
                self.write_doc(FOUND_ITEMS_FILE, &FoundItemsDoc { found_items: items })
            }
        }
    }

    /// All reports of the given kind, in insertion order.
    pub fn list(&self, kind: ItemKind) -> Vec<ItemReport> {
        self.read_items(kind)
    }

    /// Reports of the given kind still eligible for matching.
    pub fn list_active(&self, kind: ItemKind) -> Vec<ItemReport> {
        self.read_items(kind)
            .into_iter()
            .filter(ItemReport::is_active)
            .collect()
    }

    /// Append a new report. Assigns the id, stamps `created_at`, and sets
    /// the status to active.
    pub fn insert(&self, kind: ItemKind, draft: ItemDraft) -> Result<ItemReport, StoreError> {
        let _guard = self.write_lock.lock().expect("store lock poisoned");

        let report = ItemReport {
            id: Uuid::new_v4().to_string(),
            kind,
            item_name: draft.item_name,
            category: draft.category,
            description: draft.description,
            date: draft.date,
            location: draft.location,
            contact_name: draft.contact_name,
            contact_email: draft.contact_email,
            contact_phone: draft.contact_phone,
            image_url: draft.image_url,
            status: ItemStatus::Active,
            created_at: Utc::now(),
            resolved_at: None,
            matched_with: None,
        };

        let mut items = self.read_items(kind);
        items.push(report.clone());
        self.write_items(kind, items)?;

        tracing::info!(kind = kind.as_str(), report_id = %report.id, "stored item report");
        Ok(report)
    }

    /// Mark a lost/found pair as reunited.
    ///
    /// Both records are located first; if either id is absent (or either
    /// record already resolved) nothing is mutated. On success both records
    /// get `status = resolved`, a shared `resolved_at` stamp, and a
    /// snapshot of their counterpart in `matched_with`. The lost collection
    /// is persisted before the found collection; each write is atomic on
    /// its own, the pair of writes is not.
    pub fn reunite(
        &self,
        lost_id: &str,
        found_id: &str,
    ) -> Result<(ItemReport, ItemReport), StoreError> {
        let _guard = self.write_lock.lock().expect("store lock poisoned");

        let mut lost_items = self.read_items(ItemKind::Lost);
        let mut found_items = self.read_items(ItemKind::Found);

        let lost_idx = lost_items
            .iter()
            .position(|item| item.id == lost_id)
            .ok_or(StoreError::LostItemNotFound)?;
        let found_idx = found_items
            .iter()
            .position(|item| item.id == found_id)
            .ok_or(StoreError::FoundItemNotFound)?;

        if !lost_items[lost_idx].is_active() {
            return Err(StoreError::AlreadyResolved(lost_items[lost_idx].id.clone()));
        }
        if !found_items[found_idx].is_active() {
            return Err(StoreError::AlreadyResolved(
                found_items[found_idx].id.clone(),
            ));
        }

        // Snapshots are taken before either side is mutated.
        let lost_snapshot = lost_items[lost_idx].snapshot();
        let found_snapshot = found_items[found_idx].snapshot();
        let resolved_at = Utc::now();

        {
            let lost = &mut lost_items[lost_idx];
            lost.status = ItemStatus::Resolved;
            lost.resolved_at = Some(resolved_at);
            lost.matched_with = Some(found_snapshot);
        }
        {
            let found = &mut found_items[found_idx];
            found.status = ItemStatus::Resolved;
            found.resolved_at = Some(resolved_at);
            found.matched_with = Some(lost_snapshot);
        }

        let lost_record = lost_items[lost_idx].clone();
        let found_record = found_items[found_idx].clone();

        self.write_items(ItemKind::Lost, lost_items)?;
        if let Err(err) = self.write_items(ItemKind::Found, found_items) {
            tracing::error!(
                lost_id,
                found_id,
                %err,
                "found collection write failed after lost collection was persisted"
            );
            return Err(err);
        }

        tracing::info!(lost_id, found_id, "reunited item pair");
        Ok((lost_record, found_record))
    }
}
