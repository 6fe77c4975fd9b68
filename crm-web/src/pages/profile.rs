use client::SessionState;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let user = use_selector(|state: &SessionState| state.user.clone());

    let Some(user) = (*user).clone() else {
        return html! {};
    };

    html! {
        <div class="card max-w-lg bg-base-200 shadow">
            <div class="card-body">
                <h1 class="card-title text-2xl">{"Profile"}</h1>
                <dl class="grid grid-cols-3 gap-2">
                    <dt class="font-semibold">{"Name"}</dt>
                    <dd class="col-span-2">{&user.display_name}</dd>
                    <dt class="font-semibold">{"Email"}</dt>
                    <dd class="col-span-2">{&user.email}</dd>
                    <dt class="font-semibold">{"Role"}</dt>
                    <dd class="col-span-2">
                        <span class="badge badge-outline">{user.role.label()}</span>
                    </dd>
                </dl>
            </div>
        </div>
    }
}
