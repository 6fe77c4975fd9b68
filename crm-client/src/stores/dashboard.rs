//! Read-only aggregates for the dashboard page.
//!
//! The five fetches run independently, so loading is a count of requests in
//! flight rather than a flag. A reset starts a new epoch; responses to
//! requests issued before it are dropped.

use serde::de::DeserializeOwned;
use shared::models::{AdminStats, DashboardStats, MonthlyTrends, TaskStatusChart, UserStats};
use std::rc::Rc;
use tracing::{debug, warn};
use yewdux::{Dispatch, Reducer, Store};

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct DashboardState {
    pub stats: Option<DashboardStats>,
    pub user_stats: Option<UserStats>,
    pub admin_stats: Option<AdminStats>,
    pub task_status_chart: Option<TaskStatusChart>,
    pub monthly_trends: Option<MonthlyTrends>,
    pub pending: u32,
    pub last_error: Option<String>,
    /// Incremented by every reset.
    pub epoch: u32,
}

impl DashboardState {
    pub fn loading(&self) -> bool {
        self.pending > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    Pending,
    Stats(DashboardStats),
    UserStats(UserStats),
    AdminStats(AdminStats),
    TaskStatusChart(TaskStatusChart),
    MonthlyTrends(MonthlyTrends),
    Failed(String),
    Reset,
}

impl Reducer<DashboardState> for DashboardAction {
    fn apply(self, mut state: Rc<DashboardState>) -> Rc<DashboardState> {
        let dashboard = Rc::make_mut(&mut state);
        if !matches!(self, Self::Pending | Self::Reset) {
            dashboard.pending = dashboard.pending.saturating_sub(1);
        }
        match self {
            Self::Pending => {
                dashboard.pending += 1;
                dashboard.last_error = None;
            }
            Self::Stats(stats) => dashboard.stats = Some(stats),
            Self::UserStats(stats) => dashboard.user_stats = Some(stats),
            Self::AdminStats(stats) => dashboard.admin_stats = Some(stats),
            Self::TaskStatusChart(chart) => dashboard.task_status_chart = Some(chart),
            Self::MonthlyTrends(trends) => dashboard.monthly_trends = Some(trends),
            Self::Failed(message) => dashboard.last_error = Some(message),
            Self::Reset => {
                *dashboard = DashboardState {
                    epoch: dashboard.epoch.wrapping_add(1),
                    ..DashboardState::default()
                };
            }
        }
        state
    }
}

async fn load<T, F>(
    api: &ApiClient,
    dispatch: &Dispatch<DashboardState>,
    path: &str,
    fallback: &str,
    into_action: F,
) -> Result<T, ApiError>
where
    T: DeserializeOwned + Clone,
    F: FnOnce(T) -> DashboardAction,
{
    let epoch = dispatch.get().epoch;
    dispatch.apply(DashboardAction::Pending);
    let result = api.get::<T>(path).await;
    if dispatch.get().epoch != epoch {
        debug!(path, "dashboard was reset while loading, dropping response");
        return result;
    }
    match result {
        Ok(value) => {
            dispatch.apply(into_action(value.clone()));
            Ok(value)
        }
        Err(err) => {
            warn!(error = %err, path, "{fallback}");
            dispatch.apply(DashboardAction::Failed(err.user_message(fallback)));
            Err(err)
        }
    }
}

pub async fn fetch_stats(
    api: &ApiClient,
    dispatch: &Dispatch<DashboardState>,
) -> Result<DashboardStats, ApiError> {
    load(api, dispatch, "/dashboard/stats", "Statistics could not be loaded", DashboardAction::Stats).await
}

pub async fn fetch_user_stats(
    api: &ApiClient,
    dispatch: &Dispatch<DashboardState>,
) -> Result<UserStats, ApiError> {
    load(
        api,
        dispatch,
        "/dashboard/stats/user",
        "Your statistics could not be loaded",
        DashboardAction::UserStats,
    )
    .await
}

pub async fn fetch_admin_stats(
    api: &ApiClient,
    dispatch: &Dispatch<DashboardState>,
) -> Result<AdminStats, ApiError> {
    load(
        api,
        dispatch,
        "/dashboard/stats/admin",
        "Admin statistics could not be loaded",
        DashboardAction::AdminStats,
    )
    .await
}

pub async fn fetch_task_status_chart(
    api: &ApiClient,
    dispatch: &Dispatch<DashboardState>,
) -> Result<TaskStatusChart, ApiError> {
    load(
        api,
        dispatch,
        "/dashboard/chart/task-status",
        "Task status chart could not be loaded",
        DashboardAction::TaskStatusChart,
    )
    .await
}

pub async fn fetch_monthly_trends(
    api: &ApiClient,
    dispatch: &Dispatch<DashboardState>,
) -> Result<MonthlyTrends, ApiError> {
    load(
        api,
        dispatch,
        "/dashboard/chart/monthly-trends",
        "Monthly trends could not be loaded",
        DashboardAction::MonthlyTrends,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use yewdux::Context;

    #[test]
    fn overlapping_fetches_keep_loading_until_all_settle() {
        let dispatch: Dispatch<DashboardState> = Dispatch::new(&Context::new());
        dispatch.apply(DashboardAction::Pending);
        dispatch.apply(DashboardAction::Pending);
        assert!(dispatch.get().loading());

        dispatch.apply(DashboardAction::Stats(DashboardStats {
            total_customers: 3,
            ..DashboardStats::default()
        }));
        assert!(dispatch.get().loading());

        dispatch.apply(DashboardAction::Failed("Monthly trends could not be loaded".to_string()));
        let state = dispatch.get();
        assert!(!state.loading());
        assert_eq!(state.stats.as_ref().map(|s| s.total_customers), Some(3));
        assert!(state.last_error.is_some());
    }

    #[test]
    fn fetch_replaces_previous_snapshot() {
        let dispatch: Dispatch<DashboardState> = Dispatch::new(&Context::new());
        for completed in [1, 5] {
            dispatch.apply(DashboardAction::Pending);
            dispatch.apply(DashboardAction::TaskStatusChart(TaskStatusChart {
                completed,
                ..TaskStatusChart::default()
            }));
        }
        assert_eq!(
            dispatch.get().task_status_chart.as_ref().map(|c| c.completed),
            Some(5)
        );
    }

    #[test]
    fn reset_clears_everything() {
        let dispatch: Dispatch<DashboardState> = Dispatch::new(&Context::new());
        dispatch.apply(DashboardAction::Pending);
        dispatch.apply(DashboardAction::UserStats(UserStats::default()));
        dispatch.apply(DashboardAction::Reset);

        assert_eq!(
            *dispatch.get(),
            DashboardState {
                epoch: 1,
                ..DashboardState::default()
            }
        );
        assert!(!dispatch.get().loading());
    }
}
