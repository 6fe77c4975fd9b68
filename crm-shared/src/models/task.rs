use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::EnumIter;

use super::{Entity, ServerTimestamp};

/// Lifecycle state of a task.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Status reached by one click on the status badge.
    ///
    /// Cycles `PENDING -> IN_PROGRESS -> COMPLETED -> PENDING`; a cancelled
    /// task re-enters the cycle at `PENDING`.
    #[must_use]
    pub fn advance(self) -> Self {
        match self {
            Self::Pending => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed | Self::Cancelled => Self::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err("unknown task status"),
        }
    }
}

/// A task as returned by the task endpoints, normalized from whichever
/// response shape the endpoint used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "TaskWire")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<i32>,
    pub estimated_hours: Option<f32>,
    pub actual_hours: Option<f32>,
    pub due_date: Option<ServerTimestamp>,
    pub created_at: Option<ServerTimestamp>,
    pub updated_at: Option<ServerTimestamp>,
    pub completed_at: Option<ServerTimestamp>,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub assigned_user_id: Option<i64>,
    pub assigned_user_name: Option<String>,
}

impl Task {
    /// A task is overdue when it is not completed and its due date has passed.
    #[must_use]
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.status != TaskStatus::Completed
            && self.due_date.is_some_and(|due| due.0 < now)
    }
}

impl Entity for Task {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerRef {
    id: i64,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssigneeRef {
    id: i64,
    #[serde(default)]
    full_name: Option<String>,
}

/// Union of the flat `TaskResponse`, the nested entity form, and the list
/// DTO. Flat fields win over nested ones when both are present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskWire {
    id: i64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    priority: Option<i32>,
    #[serde(default)]
    estimated_hours: Option<f32>,
    #[serde(default)]
    actual_hours: Option<f32>,
    #[serde(default)]
    due_date: Option<ServerTimestamp>,
    #[serde(default)]
    created_at: Option<ServerTimestamp>,
    #[serde(default)]
    updated_at: Option<ServerTimestamp>,
    #[serde(default)]
    completed_at: Option<ServerTimestamp>,
    #[serde(default)]
    customer_id: Option<i64>,
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    assigned_user_id: Option<i64>,
    #[serde(default)]
    assigned_user_name: Option<String>,
    #[serde(default)]
    customer: Option<CustomerRef>,
    #[serde(default)]
    assigned_to: Option<AssigneeRef>,
}

impl From<TaskWire> for Task {
    fn from(wire: TaskWire) -> Self {
        let (nested_customer_id, nested_customer_name) = wire
            .customer
            .map_or((None, None), |customer| (Some(customer.id), customer.name));
        let (nested_assignee_id, nested_assignee_name) = wire
            .assigned_to
            .map_or((None, None), |assignee| (Some(assignee.id), assignee.full_name));

        Self {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            status: wire.status,
            priority: wire.priority,
            estimated_hours: wire.estimated_hours,
            actual_hours: wire.actual_hours,
            due_date: wire.due_date,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            completed_at: wire.completed_at,
            customer_id: wire.customer_id.or(nested_customer_id),
            customer_name: wire.customer_name.or(nested_customer_name),
            assigned_user_id: wire.assigned_user_id.or(nested_assignee_id),
            assigned_user_name: wire.assigned_user_name.or(nested_assignee_name),
        }
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateRequest {
    pub title: String,
    pub description: String,
    pub customer_id: i64,
    pub assigned_user_id: i64,
    pub due_date: ServerTimestamp,
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f32>,
}

/// Body of `PUT /tasks/:id`; absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<ServerTimestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}
