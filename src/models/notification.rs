// src/models/notification.rs

//! Notification feed and its entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A notification linked from the information list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    /// Value of the `id=` query parameter in the notification link
    pub id: String,

    /// Link text
    pub display_name: String,
}

impl NotificationEntry {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for NotificationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Ordered notification slots.
///
/// The length is fixed at construction; a slot whose item could not be read
/// stays `None` so later entries keep their position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFeed {
    slots: Vec<Option<NotificationEntry>>,
}

impl NotificationFeed {
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NotificationEntry> {
        self.slots.get(index)?.as_ref()
    }

    /// Store an entry; returns `false` when `index` is past the end.
    pub fn set(&mut self, index: usize, entry: Option<NotificationEntry>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    /// Every slot in order, absent ones included.
    pub fn slots(&self) -> &[Option<NotificationEntry>] {
        &self.slots
    }

    /// Populated slots only.
    pub fn entries(&self) -> impl Iterator<Item = &NotificationEntry> {
        self.slots.iter().flatten()
    }
}

impl fmt::Display for NotificationFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            match slot {
                Some(entry) => writeln!(f, "{entry}")?,
                None => writeln!(f, "None")?,
            }
        }
        Ok(())
    }
}
