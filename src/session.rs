//! Authentication state passed explicitly to anything that needs it.

use chrono::{DateTime, Utc};

use crate::api::types::UserProfile;

/// A login session.
///
/// Created from a token returned by login, refreshed when a new token is
/// issued, and invalidated on logout or when the backend rejects the token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
    issued_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A session with no credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn create(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
            issued_at: Some(Utc::now()),
        }
    }

    /// Replaces the token and keeps the cached profile.
    pub fn refresh(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
        self.issued_at = Some(Utc::now());
    }

    /// Drops the token and cached profile.
    pub fn invalidate(&mut self) {
        self.token = None;
        self.user = None;
        self.issued_at = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Caches the profile. Ignored on an anonymous session.
    pub fn set_user(&mut self, user: UserProfile) {
        if self.is_authenticated() {
            self.user = Some(user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        serde_json::from_str(r#"{"id": 1, "username": "u", "email": "u@example.com"}"#).unwrap()
    }

    #[test]
    fn test_anonymous_session() {
        let s = Session::anonymous();
        assert!(!s.is_authenticated());
        assert_eq!(s.token(), None);
        assert_eq!(s.issued_at(), None);
    }

    #[test]
    fn test_create_refresh_invalidate() {
        let mut s = Session::create("abc");
        assert!(s.is_authenticated());
        assert_eq!(s.token(), Some("abc"));
        let first = s.issued_at().unwrap();

        s.set_user(profile());
        s.refresh("def");
        assert_eq!(s.token(), Some("def"));
        assert!(s.issued_at().unwrap() >= first);
        assert_eq!(s.user().map(|u| u.username.as_str()), Some("u"));

        s.invalidate();
        assert!(!s.is_authenticated());
        assert!(s.user().is_none());
    }

    #[test]
    fn test_set_user_requires_token() {
        let mut s = Session::anonymous();
        s.set_user(profile());
        assert!(s.user().is_none());
    }
}
