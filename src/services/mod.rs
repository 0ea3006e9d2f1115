// src/services/mod.rs

//! Service layer for the portal client.
//!
//! This module contains the business logic for:
//! - Credential exchange (`Authenticator`)
//! - Session probing (`TokenValidator`)
//! - Session-checked page retrieval (`GuardedFetcher`)
//! - Timetable extraction (`TimetableExtractor`)
//! - Notification extraction (`NotificationExtractor`)

use std::fmt;

mod auth;
mod fetch;
mod notifications;
mod timetable;

pub use auth::{Authenticator, TokenValidator};
pub use fetch::GuardedFetcher;
pub use notifications::NotificationExtractor;
pub use timetable::TimetableExtractor;

/// Why an extractor left a slot empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unmatched {
    NoAnchor,
    NoLink,
    Identifier,
    DisplayName,
}

impl fmt::Display for Unmatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NoAnchor => "no link",
            Self::NoLink => "link has no href",
            Self::Identifier => "identifier pattern did not match",
            Self::DisplayName => "display name pattern did not match",
        };
        f.write_str(reason)
    }
}
