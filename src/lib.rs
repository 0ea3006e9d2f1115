// src/lib.rs

//! WebClass portal client library
//!
//! Authenticates against the portal, checks session tokens, and extracts
//! the weekly timetable and notification list into structured records.

pub mod client;
pub mod error;
pub mod models;
pub mod services;
pub mod transport;
pub mod utils;

pub use client::PortalClient;
pub use error::{AppError, FailureKind, FailureReason, Result};
