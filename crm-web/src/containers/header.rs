use client::SessionState;
use client::stores::{CustomerStore, DashboardAction, DashboardState, TaskStore};
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::{use_dispatch, use_selector};

use crate::components::header_nav_item::HeaderNavItem;
use crate::routes::{Access, Route, access};
use crate::services::Services;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current_route: Route,
    pub services: Services,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let user = use_selector(|state: &SessionState| state.user.clone());
    let customers = use_dispatch::<CustomerStore>();
    let tasks = use_dispatch::<TaskStore>();
    let dashboard = use_dispatch::<DashboardState>();
    let navigator = use_navigator();

    let on_logout = {
        let session = props.services.session().clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            let session = session.clone();
            let (customers, tasks, dashboard) = (customers.clone(), tasks.clone(), dashboard.clone());
            let navigator = navigator.clone();
            spawn_local(async move {
                session.logout().await;
                customers.set(CustomerStore::default());
                tasks.set(TaskStore::default());
                dashboard.apply(DashboardAction::Reset);
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Login);
                }
            });
        })
    };

    let Some(user) = (*user).clone() else {
        return html! {};
    };

    let nav_items = Route::iter()
        .filter(|route| route.nav_label().is_some())
        .filter(|route| access(route, true, Some(user.role)) == Access::Allow)
        .map(|route| {
            html! { <HeaderNavItem {route} current_route={props.current_route.clone()} /> }
        })
        .collect::<Html>();

    html! {
        <nav class="navbar justify-between bg-base-300">
            <Link<Route> to={Route::Dashboard} classes="btn btn-ghost text-lg">
                {"CRM"}
            </Link<Route>>
            <ul class="menu menu-horizontal gap-1">
                {nav_items}
            </ul>
            <div class="dropdown dropdown-end">
                <div tabindex="0" role="button" class="btn btn-ghost">
                    <span class="text-sm">{ &user.display_name }</span>
                </div>
                <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-52">
                    <li class="px-2 py-1 text-left">
                        <div class="text-xs text-base-content/70">{ &user.email }</div>
                        <div class="badge badge-outline">{ user.role.label() }</div>
                    </li>
                    <li>
                        <Link<Route> to={Route::Profile}>{"Profile"}</Link<Route>>
                    </li>
                    <li><a onclick={on_logout}>{"Sign out"}</a></li>
                </ul>
            </div>
        </nav>
    }
}
