//! Bookmark store
//!
//! The persistence collaborator of the reorder engine: plain JSON CRUD over
//! a bookmark file, plus [`BookmarkStore::apply_order`], which translates an
//! order snapshot into rewritten sequential positions. The engine itself
//! never touches this module; the app wires the two together through the
//! `on_reorder` callback.

use crate::error::{LinkdeckError, Result};
use crate::reorder::OrderEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One bookmark row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Stable identity, assigned at load time and kept across reorders.
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub url: String,
    /// Persisted order index, rewritten sequentially on every commit.
    #[serde(default)]
    pub position: u64,
}

/// Bookmark collection backed by a JSON file.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    path: PathBuf,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    /// Load a store from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let bookmarks: Vec<Bookmark> = serde_json::from_str(&raw)?;
        let mut store = Self {
            path: path.to_path_buf(),
            bookmarks,
        };
        store.normalize();
        debug!(path = %path.display(), count = store.len(), "bookmark store loaded");
        Ok(store)
    }

    /// Load a store, falling back to a small starter list when the file
    /// does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "no store file, starting with defaults");
            let mut store = Self {
                path: path.to_path_buf(),
                bookmarks: Self::starter(),
            };
            store.normalize();
            Ok(store)
        }
    }

    fn starter() -> Vec<Bookmark> {
        let titles = [
            ("Rust stdlib", "https://doc.rust-lang.org/std/"),
            ("crates.io", "https://crates.io"),
            ("docs.rs", "https://docs.rs"),
            ("This Week in Rust", "https://this-week-in-rust.org"),
            ("Lobsters", "https://lobste.rs"),
        ];
        titles
            .iter()
            .enumerate()
            .map(|(i, (title, url))| Bookmark {
                id: i as u64,
                title: (*title).to_string(),
                url: (*url).to_string(),
                position: i as u64,
            })
            .collect()
    }

    /// Sort by position, repair non-unique ids, and compact positions to a
    /// dense 0..n sequence.
    fn normalize(&mut self) {
        self.bookmarks.sort_by_key(|b| b.position);
        let unique: HashSet<u64> = self.bookmarks.iter().map(|b| b.id).collect();
        if unique.len() != self.bookmarks.len() {
            debug!("non-unique bookmark ids, reassigning");
            for (i, b) in self.bookmarks.iter_mut().enumerate() {
                b.id = i as u64;
            }
        }
        for (i, b) in self.bookmarks.iter_mut().enumerate() {
            b.position = i as u64;
        }
    }

    /// Write the store back to its file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.bookmarks)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "bookmark store saved");
        Ok(())
    }

    /// Check store invariants: non-empty titles and urls.
    pub fn validate(&self) -> Result<()> {
        for b in &self.bookmarks {
            if b.title.trim().is_empty() {
                return Err(LinkdeckError::store(format!(
                    "bookmark {} has an empty title",
                    b.id
                )));
            }
            if b.url.trim().is_empty() {
                return Err(LinkdeckError::store(format!(
                    "bookmark '{}' has an empty url",
                    b.title
                )));
            }
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn by_id(&self, id: u64) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// Translate an order snapshot into the persisted order.
    ///
    /// Each entry's `sort_key` carries the bookmark id the container row was
    /// built from. Bookmarks are rearranged to the snapshot's order and
    /// positions are rewritten as a dense sequential index.
    pub fn apply_order(&mut self, snapshot: &[OrderEntry]) -> Result<()> {
        if snapshot.len() != self.bookmarks.len() {
            return Err(LinkdeckError::store(format!(
                "order snapshot covers {} rows, store has {}",
                snapshot.len(),
                self.bookmarks.len()
            )));
        }
        let mut reordered = Vec::with_capacity(self.bookmarks.len());
        for entry in snapshot {
            let bookmark = self
                .by_id(entry.sort_key)
                .cloned()
                .ok_or_else(|| {
                    LinkdeckError::store(format!("no bookmark with id {}", entry.sort_key))
                })?;
            reordered.push(bookmark);
        }
        for (i, b) in reordered.iter_mut().enumerate() {
            b.position = i as u64;
        }
        self.bookmarks = reordered;
        info!(count = self.len(), "bookmark order committed");
        Ok(())
    }
}
