use shared::models::TaskStatus;
use yew::prelude::*;

pub fn status_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "badge-warning",
        TaskStatus::InProgress => "badge-info",
        TaskStatus::Completed => "badge-success",
        TaskStatus::Cancelled => "badge-ghost",
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: TaskStatus,
    /// Clicking advances the status when set.
    #[prop_or_default]
    pub on_advance: Option<Callback<()>>,
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let class = classes!("badge", status_class(props.status));
    match props.on_advance.clone() {
        Some(on_advance) => {
            let onclick = Callback::from(move |event: MouseEvent| {
                event.prevent_default();
                on_advance.emit(());
            });
            html! {
                <button
                    class={classes!(class, "cursor-pointer")}
                    title={format!("Change to {}", props.status.advance().label())}
                    disabled={props.busy}
                    {onclick}
                >
                    {props.status.label()}
                </button>
            }
        }
        None => html! { <span {class}>{props.status.label()}</span> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_status_has_a_distinct_class() {
        let classes: Vec<_> = TaskStatus::iter().map(status_class).collect();
        let mut unique = classes.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(classes.len(), unique.len());
    }
}
