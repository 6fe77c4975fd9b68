use client::stores::{CollectionAction, CustomerStore, customers};
use shared::models::Customer;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_store;

use crate::components::loading::Loading;
use crate::routes::Route;
use crate::services::Services;

/// Ask before a destructive action. Without a window there is nobody to ask.
pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[derive(Properties, PartialEq)]
pub struct CustomersPageProps {
    pub services: Services,
}

#[function_component(CustomersPage)]
pub fn customers_page(props: &CustomersPageProps) -> Html {
    let (state, dispatch) = use_store::<CustomerStore>();
    let navigator = use_navigator();

    {
        let api = props.services.api().clone();
        let dispatch = dispatch.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let _ = customers::fetch_all(&api, &dispatch).await;
            });
            || ()
        });
    }

    let on_delete = {
        let api = props.services.api().clone();
        let dispatch = dispatch.clone();
        Callback::from(move |customer: Customer| {
            if !confirm(&format!("Delete {}?", customer.name)) {
                return;
            }
            let (api, dispatch) = (api.clone(), dispatch.clone());
            spawn_local(async move {
                let _ = customers::delete(&api, &dispatch, customer.id).await;
            });
        })
    };
    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.apply(CollectionAction::ClearError))
    };

    let rows = state
        .items
        .iter()
        .map(|customer| {
            let edit = {
                let navigator = navigator.clone();
                let id = customer.id;
                Callback::from(move |_: MouseEvent| {
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::EditCustomer { id });
                    }
                })
            };
            let delete = {
                let on_delete = on_delete.clone();
                let customer = customer.clone();
                Callback::from(move |_: MouseEvent| on_delete.emit(customer.clone()))
            };
            html! {
                <tr key={customer.id}>
                    <td>{&customer.name}</td>
                    <td>{&customer.email}</td>
                    <td>{&customer.phone}</td>
                    <td>{customer.created_at.map(|at| at.display_date()).unwrap_or_default()}</td>
                    <td>
                        if customer.is_active {
                            <span class="badge badge-success">{"Active"}</span>
                        } else {
                            <span class="badge badge-ghost">{"Inactive"}</span>
                        }
                    </td>
                    <td class="flex gap-2">
                        <button class="btn btn-xs" onclick={edit}>{"Edit"}</button>
                        <button class="btn btn-xs btn-error" onclick={delete} disabled={state.loading}>
                            {"Delete"}
                        </button>
                    </td>
                </tr>
            }
        })
        .collect::<Html>();

    html! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Customers"}</h1>
                <Link<Route> to={Route::NewCustomer} classes="btn btn-primary btn-sm">
                    {"New customer"}
                </Link<Route>>
            </div>
            if let Some(message) = &state.last_error {
                <div class="alert alert-error">
                    <span>{message.clone()}</span>
                    <button class="btn btn-ghost btn-xs" onclick={on_dismiss}>{"Dismiss"}</button>
                </div>
            }
            if state.loading && state.items.is_empty() {
                <Loading />
            } else if state.items.is_empty() {
                <p class="text-base-content/70">{"No customers yet."}</p>
            } else {
                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>{"Name"}</th>
                                <th>{"Email"}</th>
                                <th>{"Phone"}</th>
                                <th>{"Created"}</th>
                                <th>{"Status"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                </div>
            }
        </div>
    }
}
