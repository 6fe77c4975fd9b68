use chrono::Local;
use client::SessionState;
use client::stores::{CollectionAction, TaskStore, tasks};
use shared::models::{Task, User, UserRole};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::{use_selector, use_store};

use super::customers::confirm;
use crate::components::loading::Loading;
use crate::components::status_badge::StatusBadge;
use crate::routes::Route;
use crate::services::Services;

#[derive(Properties, PartialEq)]
pub struct TasksPageProps {
    pub services: Services,
}

#[function_component(TasksPage)]
pub fn tasks_page(props: &TasksPageProps) -> Html {
    let user = use_selector(|state: &SessionState| state.user.clone());
    let (state, dispatch) = use_store::<TaskStore>();
    let navigator = use_navigator();
    let is_admin = (*user).as_ref().is_some_and(User::is_admin);

    {
        let api = props.services.api().clone();
        let dispatch = dispatch.clone();
        let user = (*user).clone();
        use_effect_with(user.as_ref().map(|user| (user.id, user.role)), move |identity| {
            if let Some((user_id, role)) = *identity {
                spawn_local(async move {
                    // Admins see every task, everyone else their own.
                    let _ = if role == UserRole::Admin {
                        tasks::fetch_all(&api, &dispatch).await
                    } else {
                        tasks::fetch_assigned(&api, &dispatch, user_id).await
                    };
                });
            }
            || ()
        });
    }

    let on_advance = {
        let api = props.services.api().clone();
        let dispatch = dispatch.clone();
        Callback::from(move |task: Task| {
            let (api, dispatch) = (api.clone(), dispatch.clone());
            spawn_local(async move {
                let _ = tasks::advance_status(&api, &dispatch, &task).await;
            });
        })
    };
    let on_delete = {
        let api = props.services.api().clone();
        let dispatch = dispatch.clone();
        Callback::from(move |task: Task| {
            if !confirm(&format!("Delete \"{}\"?", task.title)) {
                return;
            }
            let (api, dispatch) = (api.clone(), dispatch.clone());
            spawn_local(async move {
                let _ = tasks::delete(&api, &dispatch, task.id).await;
            });
        })
    };
    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.apply(CollectionAction::ClearError))
    };

    let now = Local::now().naive_local();
    let rows = state
        .items
        .iter()
        .map(|task| {
            let advance = {
                let on_advance = on_advance.clone();
                let task = task.clone();
                Callback::from(move |()| on_advance.emit(task.clone()))
            };
            let edit = {
                let navigator = navigator.clone();
                let id = task.id;
                Callback::from(move |_: MouseEvent| {
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::EditTask { id });
                    }
                })
            };
            let delete = {
                let on_delete = on_delete.clone();
                let task = task.clone();
                Callback::from(move |_: MouseEvent| on_delete.emit(task.clone()))
            };
            let overdue = task.is_overdue(now);
            html! {
                <tr key={task.id}>
                    <td>{&task.title}</td>
                    <td>{task.customer_name.clone().unwrap_or_default()}</td>
                    <td>{task.assigned_user_name.clone().unwrap_or_default()}</td>
                    <td class={classes!(overdue.then_some("text-error"))}>
                        {task.due_date.map(|due| due.display()).unwrap_or_default()}
                        if overdue {
                            <span class="badge badge-error badge-sm ml-2">{"Overdue"}</span>
                        }
                    </td>
                    <td>
                        <StatusBadge status={task.status} on_advance={Some(advance)} busy={state.loading} />
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
                <h1 class="text-2xl font-bold">
                    {if is_admin { "Tasks" } else { "My tasks" }}
                </h1>
                if is_admin {
                    <Link<Route> to={Route::NewTask} classes="btn btn-primary btn-sm">
                        {"New task"}
                    </Link<Route>>
                }
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
                <p class="text-base-content/70">{"No tasks."}</p>
            } else {
                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>{"Title"}</th>
                                <th>{"Customer"}</th>
                                <th>{"Assignee"}</th>
                                <th>{"Due"}</th>
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
