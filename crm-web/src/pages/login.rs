use client::SessionState;
use shared::validation::ValidationErrors;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

use crate::components::field::{TextField, field_error};
use crate::routes::Route;
use crate::services::Services;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub services: Services,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let field_errors = use_state(|| None::<ValidationErrors>);
    let server_error = use_selector(|state: &SessionState| state.last_error.clone());
    let busy = use_selector(|state: &SessionState| state.loading);
    let navigator = use_navigator();

    {
        let session = props.services.session().clone();
        use_effect_with((), move |_| {
            session.clear_error();
            || ()
        });
    }

    let onsubmit = {
        let session = props.services.session().clone();
        let email = email.clone();
        let password = password.clone();
        let field_errors = field_errors.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let session = session.clone();
            let (email_value, password_value) = ((*email).clone(), (*password).clone());
            let field_errors = field_errors.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match session.login(&email_value, &password_value).await {
                    Ok(_) => {
                        field_errors.set(None);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => field_errors.set(err.validation().cloned()),
                }
            });
        })
    };

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |value: String| email.set(value))
    };
    let on_password_change = {
        let password = password.clone();
        Callback::from(move |value: String| password.set(value))
    };

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit} novalidate=true>
                    <h2 class="card-title text-2xl">{"Sign in"}</h2>
                    if let Some(message) = &*server_error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <TextField
                        id="email"
                        label="Email"
                        input_type="email"
                        value={(*email).clone()}
                        on_change={on_email_change}
                        error={field_error(&field_errors, "email")}
                    />
                    <TextField
                        id="password"
                        label="Password"
                        input_type="password"
                        value={(*password).clone()}
                        on_change={on_password_change}
                        error={field_error(&field_errors, "password")}
                    />
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={*busy}>
                            {if *busy { "Signing in..." } else { "Sign in" }}
                        </button>
                    </div>
                    <p class="text-sm text-center">
                        {"No account yet? "}
                        <Link<Route> to={Route::Register} classes="link link-primary">{"Register"}</Link<Route>>
                    </p>
                </form>
            </div>
        </div>
    }
}
