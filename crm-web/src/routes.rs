use client::SessionState;
use shared::models::UserRole;
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

use crate::containers::layout::Layout;
use crate::pages::{
    CustomerFormPage, CustomersPage, DashboardPage, LoginPage, NotFoundPage, ProfilePage,
    RegisterPage, TaskFormPage, TasksPage, UnauthorizedPage,
};
use crate::services::Services;

/// The app routes
#[derive(Debug, Clone, PartialEq, Eq, Routable, EnumIter)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/profile")]
    Profile,
    #[at("/customers")]
    Customers,
    #[at("/customers/new")]
    NewCustomer,
    #[at("/customers/:id")]
    EditCustomer { id: i64 },
    #[at("/tasks")]
    Tasks,
    #[at("/tasks/new")]
    NewTask,
    #[at("/tasks/:id")]
    EditTask { id: i64 },
    #[at("/unauthorized")]
    Unauthorized,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Role required beyond being signed in.
    pub fn required_role(&self) -> Option<UserRole> {
        match self {
            Self::Customers | Self::NewCustomer | Self::EditCustomer { .. } | Self::NewTask => {
                Some(UserRole::Admin)
            }
            _ => None,
        }
    }

    /// Entry shown in the header navigation, if any.
    pub fn nav_label(&self) -> Option<&'static str> {
        match self {
            Self::Dashboard => Some("Dashboard"),
            Self::Customers => Some("Customers"),
            Self::Tasks => Some("Tasks"),
            _ => None,
        }
    }
}

/// Outcome of checking a route against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
    RedirectToUnauthorized,
}

pub fn access(route: &Route, authenticated: bool, role: Option<UserRole>) -> Access {
    match route {
        Route::Login | Route::Register if authenticated => Access::RedirectToDashboard,
        Route::Login | Route::Register => Access::Allow,
        Route::Home if authenticated => Access::RedirectToDashboard,
        _ if !authenticated => Access::RedirectToLogin,
        _ => match route.required_role() {
            Some(required) if role != Some(required) => Access::RedirectToUnauthorized,
            _ => Access::Allow,
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteViewProps {
    pub route: Route,
    pub services: Services,
}

#[function_component(RouteView)]
fn route_view(props: &RouteViewProps) -> Html {
    let session = use_selector(|state: &SessionState| {
        (state.authenticated, state.user.as_ref().map(|user| user.role))
    });
    let (authenticated, role) = *session;
    let services = props.services.clone();

    match access(&props.route, authenticated, role) {
        Access::RedirectToLogin => return html! { <Redirect<Route> to={Route::Login} /> },
        Access::RedirectToDashboard => return html! { <Redirect<Route> to={Route::Dashboard} /> },
        Access::RedirectToUnauthorized => {
            return html! { <Redirect<Route> to={Route::Unauthorized} /> };
        }
        Access::Allow => {}
    }

    let page = match props.route.clone() {
        Route::Login => return html! { <LoginPage {services} /> },
        Route::Register => return html! { <RegisterPage {services} /> },
        Route::Home | Route::Dashboard => html! { <DashboardPage {services} /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::Customers => html! { <CustomersPage {services} /> },
        Route::NewCustomer => html! { <CustomerFormPage {services} /> },
        Route::EditCustomer { id } => html! { <CustomerFormPage {services} id={Some(id)} /> },
        Route::Tasks => html! { <TasksPage {services} /> },
        Route::NewTask => html! { <TaskFormPage {services} /> },
        Route::EditTask { id } => html! { <TaskFormPage {services} id={Some(id)} /> },
        Route::Unauthorized => html! { <UnauthorizedPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };

    html! {
        <Layout current_route={props.route.clone()} services={props.services.clone()}>
            {page}
        </Layout>
    }
}

/// Switch function for the app routes.
pub fn switch(route: Route, services: Services) -> Html {
    log::debug!("switching to route: {route:?}");
    html! { <RouteView {route} {services} /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.to_path(), "/");
        assert_eq!(Route::EditCustomer { id: 7 }.to_path(), "/customers/7");
        assert_eq!(Route::EditTask { id: 12 }.to_path(), "/tasks/12");
        assert_eq!(Route::NewTask.to_path(), "/tasks/new");
    }

    #[test]
    fn test_anonymous_visitors_only_reach_auth_pages() {
        for route in Route::iter() {
            let expected = match route {
                Route::Login | Route::Register => Access::Allow,
                _ => Access::RedirectToLogin,
            };
            assert_eq!(access(&route, false, None), expected, "{route:?}");
        }
    }

    #[test]
    fn test_signed_in_users_skip_auth_pages() {
        for route in [Route::Login, Route::Register, Route::Home] {
            assert_eq!(
                access(&route, true, Some(UserRole::User)),
                Access::RedirectToDashboard
            );
        }
    }

    #[test]
    fn test_admin_only_routes() {
        let admin_only = [
            Route::Customers,
            Route::NewCustomer,
            Route::EditCustomer { id: 1 },
            Route::NewTask,
        ];
        for route in &admin_only {
            assert_eq!(access(route, true, Some(UserRole::Admin)), Access::Allow);
            assert_eq!(
                access(route, true, Some(UserRole::Manager)),
                Access::RedirectToUnauthorized
            );
            assert_eq!(
                access(route, true, Some(UserRole::User)),
                Access::RedirectToUnauthorized
            );
        }
    }

    #[test]
    fn test_shared_routes_allow_every_role() {
        for route in [Route::Dashboard, Route::Profile, Route::Tasks, Route::EditTask { id: 3 }] {
            for role in [UserRole::Admin, UserRole::Manager, UserRole::User] {
                assert_eq!(access(&route, true, Some(role)), Access::Allow);
            }
        }
    }

    #[test]
    fn test_nav_entries() {
        let labels: Vec<_> = Route::iter().filter_map(|route| route.nav_label()).collect();
        assert_eq!(labels, vec!["Dashboard", "Customers", "Tasks"]);
    }
}
