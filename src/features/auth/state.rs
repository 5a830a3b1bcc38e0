//! Session state shared by the console. The context restores the persisted
//! credential once on start and is the only writer of the session afterwards;
//! the API client and workflows only read snapshots of it.

use super::{session::Session, store::CredentialStore, types::Role};
use crate::app_lib::AppError;
use secrecy::SecretString;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

#[derive(Clone)]
/// Auth session context shared through the console.
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
    session: Arc<RwLock<Session>>,
}

impl SessionContext {
    /// Builds a context from whatever the store holds. A store that cannot be
    /// read yields a signed-out session.
    pub fn restore(store: Arc<dyn CredentialStore>) -> Self {
        let session = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "failed to restore session; starting signed out");
            Session::Anonymous
        });

        Self {
            store,
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.read().clone()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.read().role()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// Signs in as `role`. The durable record is written first so memory
    /// never runs ahead of what a restart would restore.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the record cannot be written; the
    /// in-memory session is left unchanged in that case.
    pub fn login(&self, token: SecretString, role: Role) -> Result<(), AppError> {
        self.store.save(&token, role)?;
        *self.write() = Session::new(token, role);
        info!(%role, "signed in");
        Ok(())
    }

    /// Signs out. Memory is cleared before the durable record so a storage
    /// failure still leaves this process signed out.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the record exists but cannot be removed.
    pub fn logout(&self) -> Result<(), AppError> {
        *self.write() = Session::Anonymous;
        self.store.clear()?;
        info!("signed out");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}
