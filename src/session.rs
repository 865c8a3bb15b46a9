/// Credentials and the cached `api_key` of a client.
use std::fmt;

/// Login credentials, fixed for the lifetime of a client.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub user_key: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str, user_key: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            user_key: user_key.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("user_key", &"<redacted>")
            .finish()
    }
}

/// Authentication state of a client.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated { api_key: String },
}

impl Session {
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Session::Authenticated { api_key } => Some(api_key),
            Session::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Replace any cached key with a freshly issued one.
    pub fn authenticate(&mut self, api_key: String) {
        *self = Session::Authenticated { api_key };
    }

    /// Drop the cached key after the server rejected it.
    pub fn invalidate(&mut self) {
        *self = Session::Unauthenticated;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Unauthenticated => f.write_str("Unauthenticated"),
            Session::Authenticated { .. } => f.write_str("Authenticated { api_key: <redacted> }"),
        }
    }
}

/// One-shot allowance for re-logging in after a token-expiry response.
///
/// A request starts with `Available`; the first expiry spends it, and a
/// second expiry on the same request is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relogin {
    Available,
    Spent,
}

impl Relogin {
    /// Consume the allowance, returning whether a re-login may happen.
    pub fn take(&mut self) -> bool {
        match self {
            Relogin::Available => {
                *self = Relogin::Spent;
                true
            }
            Relogin::Spent => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_transitions() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.api_key(), None);

        session.authenticate("k1".into());
        assert_eq!(session.api_key(), Some("k1"));

        session.authenticate("k2".into());
        assert_eq!(session.api_key(), Some("k2"));

        session.invalidate();
        assert_eq!(session, Session::Unauthenticated);
    }

    #[test]
    fn test_relogin_is_one_shot() {
        let mut relogin = Relogin::Available;
        assert!(relogin.take());
        assert_eq!(relogin, Relogin::Spent);
        assert!(!relogin.take());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::new("me@example.com", "hunter2", "user-key-123");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("user-key-123"));
        assert!(rendered.contains("me@example.com"));

        let mut session = Session::default();
        session.authenticate("secret-key".into());
        assert!(!format!("{session:?}").contains("secret-key"));
    }
}
