//! Labelled form inputs with an inline validation message.

use shared::validation::ValidationErrors;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub multiline: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                on_change.emit(input.value());
            } else if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
                on_change.emit(area.value());
            }
        })
    };
    let invalid = props.error.is_some();

    html! {
        <div class="form-control">
            <label class="label" for={props.id.clone()}>
                <span class="label-text">{props.label.clone()}</span>
            </label>
            if props.multiline {
                <textarea
                    id={props.id.clone()}
                    class={classes!("textarea", "textarea-bordered", invalid.then_some("textarea-error"))}
                    value={props.value.clone()}
                    disabled={props.disabled}
                    {oninput}
                />
            } else {
                <input
                    id={props.id.clone()}
                    class={classes!("input", "input-bordered", invalid.then_some("input-error"))}
                    type={props.input_type.clone()}
                    value={props.value.clone()}
                    disabled={props.disabled}
                    {oninput}
                />
            }
            if let Some(message) = &props.error {
                <label class="label">
                    <span class="label-text-alt text-error">{message.clone()}</span>
                </label>
            }
        </div>
    }
}

/// Message for `field`, if validation rejected it.
pub fn field_error(errors: &Option<ValidationErrors>, field: &str) -> Option<String> {
    errors
        .as_ref()
        .and_then(|errors| errors.get(field))
        .map(ToString::to_string)
}
