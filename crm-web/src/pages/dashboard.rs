use client::SessionState;
use client::stores::{DashboardState, dashboard};
use shared::models::{MonthlyTrends, TaskStatus, TaskStatusChart};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{use_selector, use_store};

use crate::components::loading::Loading;
use crate::components::status_badge::status_class;
use crate::services::Services;

#[derive(Properties, PartialEq)]
struct StatCardProps {
    title: AttrValue,
    value: u64,
    #[prop_or(AttrValue::Static("text-primary"))]
    tone: AttrValue,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat">
            <div class="stat-title">{props.title.clone()}</div>
            <div class={classes!("stat-value", props.tone.to_string())}>{props.value}</div>
        </div>
    }
}

fn status_breakdown(chart: &TaskStatusChart) -> Html {
    let (pending, in_progress, completed) = chart.percentages();
    let rows = [
        (TaskStatus::Pending, chart.pending, pending),
        (TaskStatus::InProgress, chart.in_progress, in_progress),
        (TaskStatus::Completed, chart.completed, completed),
    ];
    html! {
        <div class="card bg-base-200 shadow">
            <div class="card-body">
                <h2 class="card-title">{"Tasks by status"}</h2>
                { for rows.into_iter().map(|(status, count, percent)| html! {
                    <div class="flex items-center gap-3">
                        <span class={classes!("badge", "w-28", status_class(status))}>{status.label()}</span>
                        <progress class="progress flex-grow" value={percent.to_string()} max="100"></progress>
                        <span class="w-20 text-right">{format!("{count} ({percent}%)")}</span>
                    </div>
                }) }
            </div>
        </div>
    }
}

fn trend_table(trends: &MonthlyTrends) -> Html {
    html! {
        <div class="card bg-base-200 shadow">
            <div class="card-body">
                <h2 class="card-title">{"Monthly trend"}</h2>
                <table class="table table-sm">
                    <thead>
                        <tr><th>{"Month"}</th><th>{"Created"}</th><th>{"Completed"}</th></tr>
                    </thead>
                    <tbody>
                        { for trends.rows().into_iter().map(|(label, created, completed)| html! {
                            <tr><td>{label}</td><td>{created}</td><td>{completed}</td></tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub services: Services,
}

/// Dashboard page component
#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let is_admin = use_selector(SessionState::is_admin);
    let (state, dispatch) = use_store::<DashboardState>();

    {
        let api = props.services.api().clone();
        use_effect_with(*is_admin, move |is_admin| {
            let is_admin = *is_admin;
            spawn_local(async move {
                // Each failure is recorded on the store.
                if is_admin {
                    let _ = dashboard::fetch_admin_stats(&api, &dispatch).await;
                } else {
                    let _ = dashboard::fetch_user_stats(&api, &dispatch).await;
                }
                let _ = dashboard::fetch_task_status_chart(&api, &dispatch).await;
                let _ = dashboard::fetch_monthly_trends(&api, &dispatch).await;
            });
            || ()
        });
    }

    let cards = if *is_admin {
        state.admin_stats.as_ref().map(|stats| html! {
            <div class="stats shadow w-full">
                <StatCard title="Customers" value={stats.overview.total_customers} />
                <StatCard title="Tasks" value={stats.overview.total_tasks} />
                <StatCard title="Completed" value={stats.overview.completed_tasks} tone="text-success" />
                <StatCard title="Pending" value={stats.overview.pending_tasks} tone="text-warning" />
            </div>
        })
    } else {
        state.user_stats.as_ref().map(|stats| html! {
            <div class="stats shadow w-full">
                <StatCard title="Assigned to me" value={stats.assigned_tasks} />
                <StatCard title="Completed" value={stats.completed_tasks} tone="text-success" />
                <StatCard title="Pending" value={stats.pending_tasks} tone="text-warning" />
            </div>
        })
    };
    let nothing_yet = cards.is_none() && state.task_status_chart.is_none();

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{"Dashboard"}</h1>
            if let Some(message) = &state.last_error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }
            if state.loading() && nothing_yet {
                <Loading />
            }
            {cards.unwrap_or_default()}
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                { state.task_status_chart.as_ref().map(status_breakdown).unwrap_or_default() }
                { state.monthly_trends.as_ref().map(trend_table).unwrap_or_default() }
            </div>
        </div>
    }
}
