use chrono::Local;
use client::SessionState;
use client::stores::{CollectionAction, CustomerStore, TaskStore, customers, tasks};
use shared::models::{ServerTimestamp, Task, TaskCreateRequest, TaskStatus, TaskUpdateRequest, User};
use shared::validation::{ValidationError, ValidationErrors};
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::{use_selector, use_store};

use crate::components::field::{TextField, field_error};
use crate::components::loading::Loading;
use crate::routes::Route;
use crate::services::Services;

/// Value format of `<input type="datetime-local">`.
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const PRIORITIES: [(i32, &str); 4] = [(0, "None"), (1, "Low"), (2, "Medium"), (3, "High")];

/// Raw form input, kept as text until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub customer_id: String,
    pub assigned_user_id: String,
    pub due_date: String,
    pub priority: i32,
    pub status: TaskStatus,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            customer_id: String::new(),
            assigned_user_id: String::new(),
            due_date: String::new(),
            priority: PRIORITIES[0].0,
            status: TaskStatus::Pending,
        }
    }
}

impl From<&Task> for TaskForm {
    fn from(task: &Task) -> Self {
        let id_text = |id: Option<i64>| id.map(|id| id.to_string()).unwrap_or_default();
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            customer_id: id_text(task.customer_id),
            assigned_user_id: id_text(task.assigned_user_id),
            due_date: task
                .due_date
                .map(|due| due.0.format(INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            priority: task.priority.unwrap_or(PRIORITIES[0].0),
            status: task.status,
        }
    }
}

impl TaskForm {
    /// Unparseable references read as 0 and are rejected by validation.
    fn reference(text: &str) -> i64 {
        text.trim().parse().unwrap_or(0)
    }

    fn due_date(&self) -> Result<ServerTimestamp, ValidationError> {
        if self.due_date.trim().is_empty() {
            return Err(ValidationError::Required);
        }
        ServerTimestamp::parse(&self.due_date).map_err(|_| ValidationError::Required)
    }

    pub fn to_create(&self) -> Result<TaskCreateRequest, ValidationErrors> {
        let due_date = self.due_date().map_err(|err| {
            let mut errors = ValidationErrors::new();
            errors.check("dueDate", Err(err));
            errors
        })?;
        Ok(TaskCreateRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            customer_id: Self::reference(&self.customer_id),
            assigned_user_id: Self::reference(&self.assigned_user_id),
            due_date,
            priority: self.priority,
            estimated_hours: None,
        })
    }

    /// Every editable field is sent; a blank due date leaves it unchanged.
    pub fn to_update(&self) -> TaskUpdateRequest {
        TaskUpdateRequest {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            customer_id: Some(Self::reference(&self.customer_id)),
            assigned_user_id: Some(Self::reference(&self.assigned_user_id)),
            due_date: self.due_date().ok(),
            priority: Some(self.priority),
            estimated_hours: None,
            status: Some(self.status),
        }
    }
}

/// Admins edit any task; everyone else only tasks assigned to them.
pub fn can_edit(user: Option<&User>, task: &Task) -> bool {
    user.is_some_and(|user| user.is_admin() || task.assigned_user_id == Some(user.id))
}

#[derive(Properties, PartialEq)]
pub struct TaskFormPageProps {
    pub services: Services,
    /// Task being edited; creates a new one when absent.
    #[prop_or_default]
    pub id: Option<i64>,
}

#[function_component(TaskFormPage)]
pub fn task_form_page(props: &TaskFormPageProps) -> Html {
    let form = use_state(TaskForm::default);
    let field_errors = use_state(|| None::<ValidationErrors>);
    let user = use_selector(|state: &SessionState| state.user.clone());
    let (state, dispatch) = use_store::<TaskStore>();
    let (customer_state, customer_dispatch) = use_store::<CustomerStore>();
    let navigator = use_navigator();

    {
        let api = props.services.api().clone();
        let dispatch = dispatch.clone();
        let customer_dispatch = customer_dispatch.clone();
        let form = form.clone();
        use_effect_with(props.id, move |id| {
            dispatch.apply(CollectionAction::ClearError);
            dispatch.apply(CollectionAction::ClearSelected);
            let id = *id;
            spawn_local(async move {
                // Only fills the customer picker.
                let _ = customers::fetch_all(&api, &customer_dispatch).await;
                if let Some(id) = id {
                    if let Ok(task) = tasks::fetch_by_id(&api, &dispatch, id).await {
                        form.set(TaskForm::from(&task));
                    }
                }
            });
            || ()
        });
    }

    let update = |apply: fn(&mut TaskForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let on_select = |apply: fn(&mut TaskForm, String)| {
        let form = form.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                let mut next = (*form).clone();
                apply(&mut next, select.value());
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
            let form = (*form).clone();
            let field_errors = field_errors.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = match id {
                    Some(id) => tasks::update(&api, &dispatch, id, &form.to_update()).await,
                    None => match form.to_create() {
                        Ok(request) => tasks::create(&api, &dispatch, &request).await,
                        Err(errors) => {
                            field_errors.set(Some(errors));
                            return;
                        }
                    },
                };
                match result {
                    Ok(_) => {
                        field_errors.set(None);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Tasks);
                        }
                    }
                    Err(err) => field_errors.set(err.validation().cloned()),
                }
            });
        })
    };

    let editing = props.id.is_some();
    let loaded_task = state.selected.as_ref().filter(|task| Some(task.id) == props.id);
    if editing {
        match loaded_task {
            None if state.last_error.is_none() => return html! { <Loading /> },
            Some(task) if !can_edit((*user).as_ref(), task) => {
                return html! {
                    <div class="alert alert-warning">
                        <span>{"You can only edit tasks assigned to you."}</span>
                        <Link<Route> to={Route::Tasks} classes="btn btn-sm">{"Back to tasks"}</Link<Route>>
                    </div>
                };
            }
            _ => {}
        }
    }

    let min_due = Local::now().naive_local().format(INPUT_FORMAT).to_string();
    let customer_options = customer_state
        .items
        .iter()
        .map(|customer| {
            let value = customer.id.to_string();
            let selected = form.customer_id == value;
            html! { <option {value} {selected}>{&customer.name}</option> }
        })
        .collect::<Html>();

    html! {
        <div class="max-w-xl space-y-4">
            <h1 class="text-2xl font-bold">{if editing { "Edit task" } else { "New task" }}</h1>
            if let Some(message) = &state.last_error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }
            <form class="space-y-2" {onsubmit} novalidate=true>
                <TextField
                    id="title"
                    label="Title"
                    value={form.title.clone()}
                    on_change={update(|form, value| form.title = value)}
                    error={field_error(&field_errors, "title")}
                />
                <TextField
                    id="description"
                    label="Description"
                    multiline=true
                    value={form.description.clone()}
                    on_change={update(|form, value| form.description = value)}
                    error={field_error(&field_errors, "description")}
                />
                <div class="form-control">
                    <label class="label" for="customerId"><span class="label-text">{"Customer"}</span></label>
                    <select
                        id="customerId"
                        class={classes!("select", "select-bordered", field_error(&field_errors, "customerId").map(|_| "select-error"))}
                        onchange={on_select(|form, value| form.customer_id = value)}
                    >
                        <option value="" selected={form.customer_id.is_empty()}>{"Select a customer"}</option>
                        {customer_options}
                    </select>
                    if let Some(message) = field_error(&field_errors, "customerId") {
                        <label class="label"><span class="label-text-alt text-error">{message}</span></label>
                    }
                </div>
                <TextField
                    id="assignedUserId"
                    label="Assignee (user ID)"
                    input_type="number"
                    value={form.assigned_user_id.clone()}
                    on_change={update(|form, value| form.assigned_user_id = value)}
                    error={field_error(&field_errors, "assignedUserId")}
                />
                <div class="form-control">
                    <label class="label" for="dueDate"><span class="label-text">{"Due date"}</span></label>
                    <input
                        id="dueDate"
                        type="datetime-local"
                        class="input input-bordered"
                        min={(!editing).then_some(min_due)}
                        value={form.due_date.clone()}
                        oninput={update(|form, value| form.due_date = value).reform(|event: InputEvent| {
                            event
                                .target_dyn_into::<web_sys::HtmlInputElement>()
                                .map(|input| input.value())
                                .unwrap_or_default()
                        })}
                    />
                    if let Some(message) = field_error(&field_errors, "dueDate") {
                        <label class="label"><span class="label-text-alt text-error">{message}</span></label>
                    }
                </div>
                <div class="form-control">
                    <label class="label" for="priority"><span class="label-text">{"Priority"}</span></label>
                    <select
                        id="priority"
                        class="select select-bordered"
                        onchange={on_select(|form, value| form.priority = value.parse().unwrap_or(form.priority))}
                    >
                        { for PRIORITIES.iter().map(|(value, label)| html! {
                            <option value={value.to_string()} selected={form.priority == *value}>{*label}</option>
                        }) }
                    </select>
                </div>
                if editing {
                    <div class="form-control">
                        <label class="label" for="status"><span class="label-text">{"Status"}</span></label>
                        <select
                            id="status"
                            class="select select-bordered"
                            onchange={on_select(|form, value| form.status = value.parse().unwrap_or(form.status))}
                        >
                            { for TaskStatus::iter().filter(|status| *status != TaskStatus::Cancelled).map(|status| html! {
                                <option value={status.as_str()} selected={form.status == status}>{status.label()}</option>
                            }) }
                        </select>
                        if let Some(message) = field_error(&field_errors, "status") {
                            <label class="label"><span class="label-text-alt text-error">{message}</span></label>
                        }
                    </div>
                }
                <div class="flex gap-2 pt-4">
                    <button class="btn btn-primary" type="submit" disabled={state.loading}>{"Save"}</button>
                    <Link<Route> to={Route::Tasks} classes="btn btn-ghost">{"Cancel"}</Link<Route>>
                </div>
            </form>
        </div>
    }
}
