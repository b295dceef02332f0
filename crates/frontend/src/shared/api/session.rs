use std::sync::RwLock;

/// Where the bearer token lives.
///
/// Injected into [`super::ApiClient`] so tests can run without a browser.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn clear(&self);
}

/// In-memory session (tests, non-browser callers)
#[derive(Debug, Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_session_lifecycle() {
        let session = MemorySession::default();
        assert_eq!(session.token(), None);
        session.set_token("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));
        session.clear();
        assert_eq!(session.token(), None);
    }
}
