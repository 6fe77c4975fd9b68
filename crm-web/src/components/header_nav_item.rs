use yew::{Html, Properties, classes, function_component, html};
use yew_router::prelude::{Link, Routable};

use crate::routes::Route;

#[derive(Properties, PartialEq, Eq)]
pub struct HeaderNavItemProps {
    pub route: Route,
    pub current_route: Route,
}

/// A nav entry stays highlighted on its nested pages, e.g. `/tasks/12`.
fn is_active(route: &Route, current_route: &Route) -> bool {
    current_route.to_path().starts_with(&route.to_path())
}

#[function_component(HeaderNavItem)]
pub fn header_nav_item(props: &HeaderNavItemProps) -> Html {
    let label = props.route.nav_label().unwrap_or_default();
    let active_route_class = if is_active(&props.route, &props.current_route) {
        "btn-soft"
    } else {
        ""
    };

    html! {
      <li>
          <Link<Route> to={props.route.clone()} classes={classes!("btn", "btn-ghost", active_route_class)}>
              {label}
          </Link<Route>>
      </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_pages_keep_their_section_active() {
        assert!(is_active(&Route::Tasks, &Route::Tasks));
        assert!(is_active(&Route::Tasks, &Route::EditTask { id: 12 }));
        assert!(is_active(&Route::Customers, &Route::NewCustomer));
        assert!(!is_active(&Route::Customers, &Route::Dashboard));
        assert!(!is_active(&Route::Dashboard, &Route::Tasks));
    }
}
