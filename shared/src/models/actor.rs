//! Authenticated caller identity

use std::fmt;

/// Identity supplied by the authentication service
///
/// Passed explicitly into every Parcel API call; the bearer token is
/// attached as the `Authorization` header and never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Actor {
    pub email: String,
    pub display_name: Option<String>,
    token: String,
}

impl Actor {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            token: token.into(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Bearer token for the `Authorization` header
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Display name, falling back to the email
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let actor = Actor::new("sender@zap.test", "secret-token");
        let debug = format!("{:?}", actor);
        assert!(debug.contains("sender@zap.test"));
        assert!(!debug.contains("secret-token"));
        assert_eq!(actor.token(), "secret-token");
    }

    #[test]
    fn test_label_fallback() {
        let actor = Actor::new("sender@zap.test", "t");
        assert_eq!(actor.label(), "sender@zap.test");
        let actor = actor.with_display_name("Karim");
        assert_eq!(actor.label(), "Karim");
    }
}
