//! Tasks: `/tasks`, including the status endpoint and per-user listing.

use chrono::Local;
use shared::models::{Task, TaskCreateRequest, TaskListing, TaskStatus, TaskUpdateRequest};
use shared::validation::{validate_task_create, validate_task_update};
use tracing::info;
use yewdux::Dispatch;

use super::collection::{CollectionAction, CollectionState, track};
use crate::api::{ApiClient, ApiError};

pub type TaskStore = CollectionState<Task>;

pub const PAGE_SIZE: &str = "500";
pub const SORT: &str = "createdAt,desc";

pub async fn fetch_all(api: &ApiClient, dispatch: &Dispatch<TaskStore>) -> Result<Vec<Task>, ApiError> {
    let request = async {
        let listing: TaskListing = api
            .get_with_query("/tasks", &[("page", "0"), ("size", PAGE_SIZE), ("sort", SORT)])
            .await?;
        Ok::<_, ApiError>(listing.into_tasks())
    };
    track(dispatch, "Tasks could not be loaded", request, |tasks| {
        CollectionAction::Loaded(tasks.clone())
    })
    .await
}

/// Tasks assigned to `user_id`; replaces the list like [`fetch_all`].
pub async fn fetch_assigned(
    api: &ApiClient,
    dispatch: &Dispatch<TaskStore>,
    user_id: i64,
) -> Result<Vec<Task>, ApiError> {
    let path = format!("/tasks/assigned/{user_id}");
    let request = async {
        let listing: TaskListing = api.get(&path).await?;
        Ok::<_, ApiError>(listing.into_tasks())
    };
    track(dispatch, "Assigned tasks could not be loaded", request, |tasks| {
        CollectionAction::Loaded(tasks.clone())
    })
    .await
}

pub async fn fetch_by_id(
    api: &ApiClient,
    dispatch: &Dispatch<TaskStore>,
    id: i64,
) -> Result<Task, ApiError> {
    let path = format!("/tasks/{id}");
    let request = api.get::<Task>(&path);
    track(dispatch, "Task could not be loaded", request, |task| {
        CollectionAction::Selected(task.clone())
    })
    .await
}

pub async fn create(
    api: &ApiClient,
    dispatch: &Dispatch<TaskStore>,
    input: &TaskCreateRequest,
) -> Result<Task, ApiError> {
    validate_task_create(input, Local::now().naive_local())?;
    let request = api.post::<_, Task>("/tasks", input);
    let created = track(dispatch, "Task could not be created", request, |task| {
        CollectionAction::Created(task.clone())
    })
    .await?;
    info!(task_id = created.id, "task created");
    Ok(created)
}

pub async fn update(
    api: &ApiClient,
    dispatch: &Dispatch<TaskStore>,
    id: i64,
    input: &TaskUpdateRequest,
) -> Result<Task, ApiError> {
    validate_task_update(input)?;
    let path = format!("/tasks/{id}");
    let request = api.put::<_, Task>(&path, input);
    track(dispatch, "Task could not be updated", request, |task| {
        CollectionAction::Updated(task.clone())
    })
    .await
}

pub async fn update_status(
    api: &ApiClient,
    dispatch: &Dispatch<TaskStore>,
    id: i64,
    status: TaskStatus,
) -> Result<Task, ApiError> {
    let path = format!("/tasks/{id}/status");
    let query = [("status", status.as_str())];
    let request = api.put_with_query::<Task>(&path, &query);
    let updated = track(dispatch, "Task status could not be updated", request, |task| {
        CollectionAction::Updated(task.clone())
    })
    .await?;
    info!(task_id = id, status = %updated.status, "task status changed");
    Ok(updated)
}

/// Move `task` one step along the status cycle.
pub async fn advance_status(
    api: &ApiClient,
    dispatch: &Dispatch<TaskStore>,
    task: &Task,
) -> Result<Task, ApiError> {
    update_status(api, dispatch, task.id, task.status.advance()).await
}

pub async fn delete(api: &ApiClient, dispatch: &Dispatch<TaskStore>, id: i64) -> Result<(), ApiError> {
    let path = format!("/tasks/{id}");
    let request = api.delete(&path);
    track(dispatch, "Task could not be deleted", request, |_| {
        CollectionAction::Deleted(id)
    })
    .await?;
    info!(task_id = id, "task deleted");
    Ok(())
}
