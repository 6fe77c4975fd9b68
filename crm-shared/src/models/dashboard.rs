//! Read-only aggregates served by the dashboard endpoints.
//!
//! None of these carry an identity; a fetch always replaces the previous
//! snapshot wholesale.

use serde::{Deserialize, Serialize};

/// `GET /dashboard/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_customers: u64,
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
    pub in_progress_tasks: u64,
}

/// `GET /dashboard/stats/user`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub assigned_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
    pub in_progress_tasks: u64,
}

/// `GET /dashboard/stats/admin`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(flatten)]
    pub overview: DashboardStats,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub active_customers: u64,
    #[serde(default)]
    pub overdue_tasks: u64,
}

/// `GET /dashboard/chart/task-status`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskStatusChart {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
}

impl TaskStatusChart {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.pending + self.in_progress + self.completed
    }

    /// Share of each status in whole percent, in `(pending, in_progress,
    /// completed)` order. All zero when there are no tasks.
    #[must_use]
    pub fn percentages(&self) -> (u64, u64, u64) {
        let total = self.total();
        if total == 0 {
            return (0, 0, 0);
        }
        (
            self.pending * 100 / total,
            self.in_progress * 100 / total,
            self.completed * 100 / total,
        )
    }
}

/// `GET /dashboard/chart/monthly-trends`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MonthlyTrends {
    pub labels: Vec<String>,
    pub completed: Vec<u64>,
    pub created: Vec<u64>,
}

impl MonthlyTrends {
    /// Rows of `(label, created, completed)`; series shorter than `labels`
    /// read as zero.
    #[must_use]
    pub fn rows(&self) -> Vec<(String, u64, u64)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                (
                    label.clone(),
                    self.created.get(index).copied().unwrap_or(0),
                    self.completed.get(index).copied().unwrap_or(0),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_stats_flatten_overview() {
        let json = r#"{
            "totalCustomers": 12, "totalTasks": 30, "completedTasks": 10,
            "pendingTasks": 15, "inProgressTasks": 5,
            "totalUsers": 4, "activeUsers": 3, "activeCustomers": 11, "overdueTasks": 2
        }"#;
        let stats: AdminStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.overview.total_customers, 12);
        assert_eq!(stats.overview.in_progress_tasks, 5);
        assert_eq!(stats.overdue_tasks, 2);
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let stats: UserStats = serde_json::from_str(r#"{"assignedTasks": 3}"#).unwrap();
        assert_eq!(stats.assigned_tasks, 3);
        assert_eq!(stats.completed_tasks, 0);
    }

    #[test]
    fn chart_percentages() {
        let chart = TaskStatusChart {
            pending: 1,
            in_progress: 1,
            completed: 2,
        };
        assert_eq!(chart.total(), 4);
        assert_eq!(chart.percentages(), (25, 25, 50));
        assert_eq!(TaskStatusChart::default().percentages(), (0, 0, 0));
    }

    #[test]
    fn trend_rows_pad_short_series() {
        let trends = MonthlyTrends {
            labels: vec!["Jan".to_string(), "Feb".to_string()],
            completed: vec![4],
            created: vec![6, 8],
        };
        assert_eq!(
            trends.rows(),
            vec![("Jan".to_string(), 6, 4), ("Feb".to_string(), 8, 0)]
        );
    }
}
