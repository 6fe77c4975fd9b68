//! Client core of the CRM console: the HTTP gateway, bearer credential
//! persistence, the session manager, and the yewdux stores fed by the
//! backend.
//!
//! Everything here runs in the browser as well as natively, so the whole
//! flow can be exercised against a local mock backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod credentials;
pub mod session;
pub mod stores;

pub use api::{ApiClient, ApiError, HookId};
pub use credentials::{CredentialError, CredentialStore, MemoryCredentialStore};
pub use session::{SessionAction, SessionManager, SessionState};
