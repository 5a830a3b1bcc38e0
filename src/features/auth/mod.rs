//! Auth feature module covering login/signup, the persisted credential, the
//! in-memory session and role gating. It touches security boundaries and must
//! avoid logging secrets or token material.
//!
//! Flow Overview: `authenticate` posts credentials to `/auth/login`, stores the
//! returned `{access_token, role}` pair through the [`SessionContext`] in one
//! durable write, and hands back the role's home route. Every later request
//! reads the token from the context at call time. `logout` clears memory first
//! and then the durable record.

pub mod client;
mod guards;
mod session;
mod state;
mod store;
pub mod types;

pub use guards::{Navigation, guard, navigate};
pub use session::Session;
pub use state::SessionContext;
pub use store::{CredentialRecord, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use types::Role;
