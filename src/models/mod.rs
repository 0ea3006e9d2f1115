// src/models/mod.rs

//! Domain models for the portal client.
//!
//! Value types produced by the extractors plus the configuration they are
//! driven by.

mod config;
mod course;
mod notification;
mod session;

// Re-export all public types
pub use config::{
    Config, Credentials, Endpoints, LoggingConfig, PASSWORD_ENV, PortalConfig, USERNAME_ENV,
};
pub use course::{CourseEntry, TimetableGrid};
pub use notification::{NotificationEntry, NotificationFeed};
pub use session::SessionToken;
