use client::SessionState;
use wasm_bindgen_futures::spawn_local;
use yew::{Html, function_component, html, use_effect_with, use_memo, use_state};
use yew_router::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::components::loading::Loading;
use crate::config::FrontendConfig;
use crate::routes::{Route, switch};
use crate::services::Services;

#[function_component(App)]
pub fn app() -> Html {
    let session = use_dispatch::<SessionState>();
    let services = use_memo((), move |_| {
        Services::new(&FrontendConfig::new(), session).map_err(|err| {
            log::error!("could not initialize the API client: {err}");
            err.to_string()
        })
    });
    // Routes render only once the persisted credential has been checked.
    let resolved = use_state(|| false);

    {
        let services = services.clone();
        let resolved = resolved.clone();
        use_effect_with((), move |_| {
            match &*services {
                Ok(services) => {
                    let session = services.session().clone();
                    spawn_local(async move {
                        session.resolve_current_session().await;
                        resolved.set(true);
                    });
                }
                Err(_) => resolved.set(true),
            }
            || ()
        });
    }

    let services = match &*services {
        Ok(services) => services.clone(),
        Err(message) => {
            return html! {
                <div class="alert alert-error m-4">
                    <span>{format!("The application could not start: {message}")}</span>
                </div>
            };
        }
    };

    if !*resolved {
        return html! { <Loading /> };
    }

    html! {
        <BrowserRouter>
            <Switch<Route> render={move |route| switch(route, services.clone())} />
        </BrowserRouter>
    }
}
