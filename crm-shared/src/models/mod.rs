pub mod auth;
pub mod customer;
pub mod dashboard;
pub mod errors;
pub mod page;
pub mod task;
pub mod timestamp;
pub mod user;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use customer::{Customer, CustomerRequest};
pub use dashboard::{AdminStats, DashboardStats, MonthlyTrends, TaskStatusChart, UserStats};
pub use errors::ErrorResponse;
pub use page::{Page, TaskListing};
pub use task::{Task, TaskCreateRequest, TaskStatus, TaskUpdateRequest};
pub use timestamp::ServerTimestamp;
pub use user::{User, UserRole};

/// Identity shared by every entity a collection store can hold.
///
/// Collections reconcile server responses by primary key, so the key must be
/// cheap to copy and compare.
pub trait Entity: Clone + PartialEq + 'static {
    /// Primary key type.
    type Id: Copy + Eq + std::fmt::Debug + std::fmt::Display + 'static;

    /// Primary key of this entity.
    fn id(&self) -> Self::Id;
}
