// src/services/fetch.rs

//! Session-checked page retrieval.

use std::sync::Arc;

use crate::error::{AppError, FailureReason, Result};
use crate::models::{Endpoints, SessionToken};
use crate::services::TokenValidator;
use crate::transport::{AUTHENTICATED, PortalRequest, SESSION_COOKIE, STATUS_COOKIE, Transport};

/// Fetches portal pages, validating the session first.
///
/// Each fetch costs two sequential round trips: the validity probe, then the
/// page itself. A rejected token never reaches the content request.
#[derive(Clone)]
pub struct GuardedFetcher {
    transport: Arc<dyn Transport>,
    endpoints: Arc<Endpoints>,
    validator: TokenValidator,
}

impl GuardedFetcher {
    pub fn new(transport: Arc<dyn Transport>, endpoints: Arc<Endpoints>) -> Self {
        let validator = TokenValidator::new(Arc::clone(&transport), Arc::clone(&endpoints));
        Self {
            transport,
            endpoints,
            validator,
        }
    }

    /// Retrieve the markup at `relative_path` under the portal base URL.
    ///
    /// Paths that would leave the base URL are refused before any request,
    /// so the session cookies only ever go to the portal.
    pub async fn fetch(&self, token: &SessionToken, relative_path: &str) -> Result<String> {
        let url = self.endpoints.resolve(relative_path).map_err(|e| {
            log::debug!("Not fetching {relative_path}: {e}");
            AppError::fetch(
                relative_path,
                FailureReason::InvalidPath(relative_path.to_string()),
            )
        })?;

        if let Err(e) = self.validator.check(token).await {
            log::debug!("Not fetching {relative_path}: {e}");
            return Err(AppError::fetch(relative_path, FailureReason::TokenRejected));
        }

        let request = PortalRequest::get(url)
            .cookie(SESSION_COOKIE, token.as_str())
            .cookie(STATUS_COOKIE, AUTHENTICATED);
        log::debug!("GET {}", request.url);

        let response = self.transport.send(request).await.map_err(|e| {
            AppError::fetch(relative_path, FailureReason::Transport(e.to_string()))
        })?;

        if !response.is_ok() {
            return Err(AppError::fetch(
                relative_path,
                FailureReason::Status(response.status),
            ));
        }
        Ok(response.body)
    }
}
