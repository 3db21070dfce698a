//! Shared session context.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use crate::session::{BearerToken, SessionError, TokenStore};

#[derive(Debug, Default)]
struct SessionState {
    token: Option<BearerToken>,
    expired: bool,
    location: Option<String>,
    return_to: Option<String>,
}

/// The single owner of session state, shared by every backend call.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &*self.read())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Create a session with no token, backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            store,
        }
    }

    /// Create a session from whatever token `store` holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: Arc<dyn TokenStore>) -> Result<Self, SessionError> {
        let token = store.load()?;
        let session = Self::new(store);

        session.write().token = token;

        Ok(session)
    }

    /// Current token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<BearerToken> {
        self.read().token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Whether the backend rejected the last token.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.read().expired
    }

    /// Store a freshly issued token and lift any expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted; the in-memory
    /// session is left unchanged in that case.
    pub fn set_token(&self, token: BearerToken) -> Result<(), SessionError> {
        self.store.save(&token)?;

        let mut state = self.write();

        state.token = Some(token);
        state.expired = false;

        Ok(())
    }

    /// Log out: forget the token locally and in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared; the in-memory token is
    /// dropped regardless.
    pub fn clear(&self) -> Result<(), SessionError> {
        {
            let mut state = self.write();

            state.token = None;
            state.expired = false;
            state.return_to = None;
        }

        self.store.clear()
    }

    /// Reset the session after the backend answered 401.
    ///
    /// The current location becomes the post-login return path. Requests
    /// needing a token are refused until [`Self::set_token`] is called.
    pub fn expire(&self) {
        {
            let mut state = self.write();

            state.token = None;
            state.expired = true;
            state.return_to = state.location.clone();

            info!(return_to = ?state.return_to, "session expired");
        }

        if let Err(error) = self.store.clear() {
            warn!(%error, "failed to clear stored token after expiry");
        }
    }

    /// Record the path the user is currently on.
    pub fn set_location(&self, path: impl Into<String>) {
        self.write().location = Some(path.into());
    }

    /// Take the path recorded when the session expired, if any.
    #[must_use]
    pub fn take_return_path(&self) -> Option<String> {
        self.write().return_to.take()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::session::{MemoryTokenStore, MockTokenStore};

    use super::*;

    fn session_with(token: &str) -> Result<SessionContext, SessionError> {
        let store = MemoryTokenStore::new(Some(BearerToken::parse(token)?));

        SessionContext::load(Arc::new(store))
    }

    #[test]
    fn load_picks_up_stored_token() -> TestResult {
        let session = session_with("abc")?;

        assert!(session.is_authenticated());
        assert_eq!(session.token().as_ref().map(BearerToken::expose), Some("abc"));

        Ok(())
    }

    #[test]
    fn expire_records_location_and_drops_token() -> TestResult {
        let store = Arc::new(MemoryTokenStore::new(Some(BearerToken::parse("abc")?)));
        let session = SessionContext::load(store.clone())?;

        session.set_location("/checkout");
        session.expire();

        assert!(session.is_expired());
        assert!(session.token().is_none());
        assert_eq!(store.load()?, None);
        assert_eq!(session.take_return_path().as_deref(), Some("/checkout"));
        assert_eq!(session.take_return_path(), None);

        Ok(())
    }

    #[test]
    fn set_token_lifts_expiry() -> TestResult {
        let session = session_with("old")?;

        session.expire();
        session.set_token(BearerToken::parse("new")?)?;

        assert!(!session.is_expired());
        assert_eq!(session.token().as_ref().map(BearerToken::expose), Some("new"));

        Ok(())
    }

    #[test]
    fn failed_save_leaves_session_unchanged() -> TestResult {
        let mut store = MockTokenStore::new();

        store
            .expect_save()
            .once()
            .returning(|_| Err(SessionError::EmptyToken));

        let session = SessionContext::new(Arc::new(store));

        assert!(session.set_token(BearerToken::parse("abc")?).is_err());
        assert!(!session.is_authenticated());

        Ok(())
    }

    #[test]
    fn clones_share_state() -> TestResult {
        let session = session_with("abc")?;
        let other = session.clone();

        other.clear()?;

        assert!(!session.is_authenticated());

        Ok(())
    }
}
