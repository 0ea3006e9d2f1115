// src/client.rs

//! High-level portal client.
//!
//! Wires the session services and extractors together behind one handle.
//! Every call runs its requests strictly one after another.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{NotificationFeed, PortalConfig, SessionToken, TimetableGrid};
use crate::services::{
    Authenticator, GuardedFetcher, NotificationExtractor, TimetableExtractor, TokenValidator,
};
use crate::transport::Transport;
use crate::utils::http::ReqwestTransport;

/// Client for one portal instance.
#[derive(Clone)]
pub struct PortalClient {
    config: Arc<PortalConfig>,
    authenticator: Authenticator,
    validator: TokenValidator,
    fetcher: GuardedFetcher,
    timetable: TimetableExtractor,
    notifications: NotificationExtractor,
}

impl PortalClient {
    /// Create a client talking HTTP to the configured portal.
    pub fn new(config: PortalConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of a custom transport.
    pub fn with_transport(config: PortalConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let endpoints = Arc::new(config.endpoints()?);

        Ok(Self {
            authenticator: Authenticator::new(Arc::clone(&transport), Arc::clone(&endpoints)),
            validator: TokenValidator::new(Arc::clone(&transport), Arc::clone(&endpoints)),
            fetcher: GuardedFetcher::new(transport, endpoints),
            timetable: TimetableExtractor::new()?,
            notifications: NotificationExtractor::new()?,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<SessionToken> {
        self.authenticator.authenticate(username, password).await
    }

    pub async fn is_valid(&self, token: &SessionToken) -> bool {
        self.validator.is_valid(token).await
    }

    pub async fn fetch(&self, token: &SessionToken, relative_path: &str) -> Result<String> {
        self.fetcher.fetch(token, relative_path).await
    }

    /// Fetch and extract the weekly timetable.
    pub async fn extract_timetable(&self, token: &SessionToken) -> Result<TimetableGrid> {
        let markup = self.fetch(token, &self.config.timetable_path).await?;
        Ok(self.timetable.extract(&markup))
    }

    /// Fetch and extract the notification list.
    pub async fn extract_notifications(&self, token: &SessionToken) -> Result<NotificationFeed> {
        let markup = self.fetch(token, &self.config.notifications_path).await?;
        Ok(self.notifications.extract(&markup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::models::{CourseEntry, NotificationEntry};
    use crate::transport::testing::{MockTransport, response};

    const TIMETABLE: &str = r#"<table class="schedule-table">
        <tr><td>1</td><td><a href="/webclass/course.php/M101/login">月1 » Calculus</a></td></tr>
    </table>"#;

    const NOTIFICATIONS: &str = r#"<ul class="info-list">
        <li class="odd"><a href="informations.php?id=55">Holiday</a></li>
    </ul>"#;

    fn client() -> (PortalClient, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new(|request| {
            Some(match request.url.path() {
                "/webclass/login.php" => response(200, &[("WCAC", "Authenticated")], ""),
                "/webclass/index.php" => response(200, &[], TIMETABLE),
                "/webclass/informations.php" => response(200, &[], NOTIFICATIONS),
                _ => response(404, &[], ""),
            })
        }));
        let client = PortalClient::with_transport(PortalConfig::default(), transport.clone())
            .unwrap();
        (client, transport)
    }

    #[tokio::test]
    async fn test_extract_timetable() {
        let (client, transport) = client();
        let grid = client
            .extract_timetable(&SessionToken::from("t"))
            .await
            .unwrap();

        assert_eq!(grid.get(0, 0), Some(&CourseEntry::new("M101", "Calculus")));
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_extract_notifications() {
        let (client, _) = client();
        let feed = client
            .extract_notifications(&SessionToken::from("t"))
            .await
            .unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed.get(0), Some(&NotificationEntry::new("55", "Holiday")));
    }

    #[tokio::test]
    async fn test_rejected_token_yields_fetch_failure() {
        let transport = Arc::new(MockTransport::new(|_| Some(response(200, &[], ""))));
        let client =
            PortalClient::with_transport(PortalConfig::default(), transport.clone()).unwrap();

        let err = client
            .extract_timetable(&SessionToken::from("expired"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::Fetch));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let transport = Arc::new(MockTransport::new(|_| None));
        let config = PortalConfig::with_base_url("not a url");
        assert!(PortalClient::with_transport(config, transport).is_err());
    }
}
