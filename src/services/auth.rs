// src/services/auth.rs

//! Credential exchange and session validity checks.
//!
//! Both talk to the login endpoint and share its cookie contract: a
//! response is only accepted when it is `200 OK` and sets `WCAC` to
//! `Authenticated`.

use std::sync::Arc;

use crate::error::{AppError, FailureReason, Result};
use crate::models::{Endpoints, SessionToken};
use crate::transport::{
    AUTHENTICATED, PortalRequest, PortalResponse, SESSION_COOKIE, STATUS_COOKIE, Transport,
};

/// Exchanges a user name and password for a session token.
#[derive(Clone)]
pub struct Authenticator {
    transport: Arc<dyn Transport>,
    endpoints: Arc<Endpoints>,
}

impl Authenticator {
    pub fn new(transport: Arc<dyn Transport>, endpoints: Arc<Endpoints>) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Submit the login form and read the issued `WBT_Session` cookie.
    ///
    /// Wrong credentials, an unreachable portal and a malformed response all
    /// end in [`AppError::Auth`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<SessionToken> {
        let form = vec![
            ("username".to_string(), username.to_string()),
            ("val".to_string(), password.to_string()),
        ];
        let request = PortalRequest::post_form(self.endpoints.login().clone(), form);
        log::debug!("POST {}", request.url);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| AppError::Auth(FailureReason::Transport(e.to_string())))?;

        let token = read_session(&response).map_err(AppError::Auth)?;
        log::info!("Authenticated as {username}");
        Ok(token)
    }
}

/// Asks the portal whether a session token is still accepted.
///
/// Nothing is cached: every call is one round trip.
#[derive(Clone)]
pub struct TokenValidator {
    transport: Arc<dyn Transport>,
    endpoints: Arc<Endpoints>,
}

impl TokenValidator {
    pub fn new(transport: Arc<dyn Transport>, endpoints: Arc<Endpoints>) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// `true` iff the portal currently accepts `token`.
    pub async fn is_valid(&self, token: &SessionToken) -> bool {
        match self.check(token).await {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{e}");
                false
            }
        }
    }

    /// Like [`is_valid`](Self::is_valid), keeping the reason for a rejection.
    pub async fn check(&self, token: &SessionToken) -> Result<()> {
        let request = PortalRequest::get(self.endpoints.login().clone())
            .cookie(SESSION_COOKIE, token.as_str());
        log::debug!("GET {} (session probe)", request.url);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| AppError::Validation(FailureReason::Transport(e.to_string())))?;

        check_status(&response).map_err(AppError::Validation)
    }
}

fn check_status(response: &PortalResponse) -> std::result::Result<(), FailureReason> {
    if !response.is_ok() {
        return Err(FailureReason::Status(response.status));
    }
    match response.cookie(STATUS_COOKIE) {
        Some(AUTHENTICATED) => Ok(()),
        Some(other) => Err(FailureReason::NotAuthenticated(other.to_string())),
        None => Err(FailureReason::MissingCookie(STATUS_COOKIE)),
    }
}

fn read_session(response: &PortalResponse) -> std::result::Result<SessionToken, FailureReason> {
    if !response.is_ok() {
        return Err(FailureReason::Status(response.status));
    }
    let token = response
        .cookie(SESSION_COOKIE)
        .ok_or(FailureReason::MissingCookie(SESSION_COOKIE))?;
    check_status(response)?;
    Ok(SessionToken::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::models::PortalConfig;
    use crate::transport::Method;
    use crate::transport::testing::{MockTransport, response};

    fn endpoints() -> Arc<Endpoints> {
        Arc::new(PortalConfig::default().endpoints().unwrap())
    }

    fn login_mock() -> Arc<MockTransport> {
        Arc::new(MockTransport::new(|request| {
            let ok = request.form.contains(&("username".into(), "student".into()))
                && request.form.contains(&("val".into(), "secret".into()));
            Some(if ok {
                response(
                    200,
                    &[("WCAC", "Authenticated"), ("WBT_Session", "token-1")],
                    "",
                )
            } else {
                response(200, &[("WCAC", "Failed")], "")
            })
        }))
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let transport = login_mock();
        let auth = Authenticator::new(transport.clone(), endpoints());

        let token = auth.authenticate("student", "secret").await.unwrap();
        assert_eq!(token.as_str(), "token-1");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert!(requests[0].url.path().ends_with("/login.php"));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_credentials() {
        let auth = Authenticator::new(login_mock(), endpoints());
        let err = auth.authenticate("wrong_user", "wrong_password").await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::Auth));
    }

    #[tokio::test]
    async fn test_authenticate_requires_status_value() {
        let transport = Arc::new(MockTransport::new(|_| {
            Some(response(
                200,
                &[("WCAC", "Expired"), ("WBT_Session", "token-1")],
                "",
            ))
        }));
        let auth = Authenticator::new(transport, endpoints());
        let err = auth.authenticate("student", "secret").await.unwrap_err();
        assert_eq!(
            err.reason(),
            Some(&FailureReason::NotAuthenticated("Expired".to_string()))
        );
    }

    #[tokio::test]
    async fn test_authenticate_folds_status_and_transport_errors() {
        let transport = Arc::new(MockTransport::new(|_| {
            Some(response(
                503,
                &[("WCAC", "Authenticated"), ("WBT_Session", "t")],
                "",
            ))
        }));
        let err = Authenticator::new(transport, endpoints())
            .authenticate("student", "secret")
            .await
            .unwrap_err();
        assert_eq!(err.reason(), Some(&FailureReason::Status(503)));

        let offline = Arc::new(MockTransport::new(|_| None));
        let err = Authenticator::new(offline, endpoints())
            .authenticate("student", "secret")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::Auth));
        assert!(matches!(err.reason(), Some(FailureReason::Transport(_))));
    }

    fn probe_mock() -> Arc<MockTransport> {
        Arc::new(MockTransport::new(|request| {
            let valid = request.cookies.contains(&("WBT_Session".into(), "good".into()));
            Some(if valid {
                response(200, &[("WCAC", "Authenticated")], "")
            } else {
                response(200, &[], "")
            })
        }))
    }

    #[tokio::test]
    async fn test_is_valid() {
        let transport = probe_mock();
        let validator = TokenValidator::new(transport.clone(), endpoints());

        assert!(validator.is_valid(&SessionToken::from("good")).await);
        assert!(validator.is_valid(&SessionToken::from("good")).await);
        assert!(!validator.is_valid(&SessionToken::from("wrong_token")).await);
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_check_reports_missing_cookie() {
        let validator = TokenValidator::new(probe_mock(), endpoints());
        let err = validator.check(&SessionToken::from("bad")).await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::Validation));
        assert_eq!(err.reason(), Some(&FailureReason::MissingCookie("WCAC")));
    }
}
