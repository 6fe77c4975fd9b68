use client::stores::{CollectionAction, CustomerStore, customers};
use shared::models::CustomerRequest;
use shared::validation::ValidationErrors;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_store;

use crate::components::field::{TextField, field_error};
use crate::components::loading::Loading;
use crate::routes::Route;
use crate::services::Services;

#[derive(Properties, PartialEq)]
pub struct CustomerFormPageProps {
    pub services: Services,
    /// Customer being edited; creates a new one when absent.
    #[prop_or_default]
    pub id: Option<i64>,
}

#[function_component(CustomerFormPage)]
pub fn customer_form_page(props: &CustomerFormPageProps) -> Html {
    let form = use_state(CustomerRequest::default);
    let loaded = use_state(|| props.id.is_none());
    let field_errors = use_state(|| None::<ValidationErrors>);
    let (state, dispatch) = use_store::<CustomerStore>();
    let navigator = use_navigator();

    {
        let api = props.services.api().clone();
        let dispatch = dispatch.clone();
        let form = form.clone();
        let loaded = loaded.clone();
        use_effect_with(props.id, move |id| {
            dispatch.apply(CollectionAction::ClearError);
            if let Some(id) = *id {
                spawn_local(async move {
                    if let Ok(customer) = customers::fetch_by_id(&api, &dispatch, id).await {
                        form.set(CustomerRequest::from(&customer));
                        loaded.set(true);
                    }
                });
            }
            || ()
        });
    }

    let update = |apply: fn(&mut CustomerRequest, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let on_active_change = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*form).clone();
                next.is_active = input.checked();
                form.set(next);
            }
        })
    };

    let onsubmit = {
        let api = props.services.api().clone();
        let dispatch = dispatch.clone();
        let form = form.clone();
        let field_errors = field_errors.clone();
        let id = props.id;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let (api, dispatch) = (api.clone(), dispatch.clone());
            let request = (*form).clone();
            let field_errors = field_errors.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = match id {
                    Some(id) => customers::update(&api, &dispatch, id, &request).await,
                    None => customers::create(&api, &dispatch, &request).await,
                };
                match result {
                    Ok(_) => {
                        field_errors.set(None);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Customers);
                        }
                    }
                    Err(err) => field_errors.set(err.validation().cloned()),
                }
            });
        })
    };

    let title = if props.id.is_some() { "Edit customer" } else { "New customer" };

    html! {
        <div class="max-w-xl space-y-4">
            <h1 class="text-2xl font-bold">{title}</h1>
            if let Some(message) = &state.last_error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }
            if !*loaded {
                if state.last_error.is_none() {
                    <Loading />
                }
            } else {
                <form class="space-y-2" {onsubmit} novalidate=true>
                    <TextField
                        id="name"
                        label="Name"
                        value={form.name.clone()}
                        on_change={update(|form, value| form.name = value)}
                        error={field_error(&field_errors, "name")}
                    />
                    <TextField
                        id="email"
                        label="Email"
                        input_type="email"
                        value={form.email.clone()}
                        on_change={update(|form, value| form.email = value)}
                        error={field_error(&field_errors, "email")}
                    />
                    <TextField
                        id="phone"
                        label="Phone"
                        input_type="tel"
                        value={form.phone.clone()}
                        on_change={update(|form, value| form.phone = value)}
                        error={field_error(&field_errors, "phone")}
                    />
                    <label class="label cursor-pointer justify-start gap-3">
                        <input
                            type="checkbox"
                            class="checkbox"
                            checked={form.is_active}
                            onchange={on_active_change}
                        />
                        <span class="label-text">{"Active"}</span>
                    </label>
                    <div class="flex gap-2 pt-4">
                        <button class="btn btn-primary" type="submit" disabled={state.loading}>
                            {"Save"}
                        </button>
                        <Link<Route> to={Route::Customers} classes="btn btn-ghost">{"Cancel"}</Link<Route>>
                    </div>
                </form>
            }
        </div>
    }
}
