use serde::{Deserialize, Serialize};

use super::Task;

/// Spring `Page<T>` envelope used by paged list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}

/// `GET /tasks` answers either a bare list or a page depending on the
/// backend build.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TaskListing {
    List(Vec<Task>),
    Paged(Page<Task>),
}

impl TaskListing {
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            Self::List(tasks) => tasks,
            Self::Paged(page) => page.into_content(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    #[test]
    fn task_listing_accepts_bare_list() {
        let json = r#"[
            {"id": 1, "title": "Call", "status": "PENDING", "dueDate": "2024-02-15 09:30:00.000",
             "customerName": "Acme", "assignedUserName": "Ayse", "priority": 2}
        ]"#;
        let tasks = serde_json::from_str::<TaskListing>(json).unwrap().into_tasks();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].customer_name.as_deref(), Some("Acme"));
        assert_eq!(tasks[0].assigned_user_name.as_deref(), Some("Ayse"));
    }

    #[test]
    fn task_listing_accepts_page() {
        let json = r#"{
            "content": [
                {"id": 5, "title": "Contract", "status": "IN_PROGRESS",
                 "customer": {"id": 9, "name": "Globex"}, "assignedTo": {"id": 3, "fullName": "Mehmet"}}
            ],
            "totalElements": 1, "totalPages": 1, "number": 0, "size": 500
        }"#;
        let tasks = serde_json::from_str::<TaskListing>(json).unwrap().into_tasks();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert_eq!(tasks[0].customer_id, Some(9));
        assert_eq!(tasks[0].assigned_user_id, Some(3));
    }

    #[test]
    fn empty_page_has_no_content() {
        let page: Page<Task> = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(page.into_content().is_empty());
    }
}
