//! Client-side caches of backend data.
//!
//! Each store is a yewdux [`Store`](yewdux::Store) changed only through its
//! reducer actions. The async operations in the submodules issue the request,
//! then apply the server's answer; the local input is never written back.

pub mod collection;
pub mod customers;
pub mod dashboard;
pub mod tasks;

pub use collection::{CollectionAction, CollectionState};
pub use customers::CustomerStore;
pub use dashboard::{DashboardAction, DashboardState};
pub use tasks::TaskStore;
