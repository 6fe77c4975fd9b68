mod customer_form;
mod customers;
mod dashboard;
mod error;
mod login;
mod profile;
mod register;
mod task_form;
mod tasks;

pub use customer_form::CustomerFormPage;
pub use customers::CustomersPage;
pub use dashboard::DashboardPage;
pub use error::{NotFoundPage, UnauthorizedPage};
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
pub use task_form::TaskFormPage;
pub use tasks::TasksPage;
