// src/transport.rs

//! HTTP transport seam.
//!
//! Portal services never talk to `reqwest` directly; they build a
//! [`PortalRequest`] and hand it to a [`Transport`]. Production code uses
//! [`crate::utils::http::ReqwestTransport`].

use std::collections::HashMap;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

/// Name of the session token cookie.
pub const SESSION_COOKIE: &str = "WBT_Session";

/// Name of the status cookie.
pub const STATUS_COOKIE: &str = "WCAC";

/// Status cookie value of an accepted session.
pub const AUTHENTICATED: &str = "Authenticated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A single request to the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalRequest {
    pub method: Method,
    pub url: Url,
    pub cookies: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
}

impl PortalRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            cookies: Vec::new(),
            form: Vec::new(),
        }
    }

    pub fn post_form(url: Url, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            url,
            cookies: Vec::new(),
            form,
        }
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    /// Value for the `Cookie` header, `None` without cookies.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        Some(pairs.join("; "))
    }
}

/// What came back from the portal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalResponse {
    pub status: u16,
    /// Cookies set by the response, by name
    pub cookies: HashMap<String, String>,
    pub body: String,
}

impl PortalResponse {
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Sends portal requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: PortalRequest) -> Result<PortalResponse>;
}
