use yew::prelude::*;
use yew_router::prelude::Link;

use crate::routes::Route;

#[derive(Properties, PartialEq)]
struct ErrorViewProps {
    code: AttrValue,
    message: AttrValue,
}

#[function_component(ErrorView)]
fn error_view(props: &ErrorViewProps) -> Html {
    html! {
        <div class="hero min-h-[50vh]">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-5xl font-bold">{props.code.clone()}</h1>
                    <p>{props.message.clone()}</p>
                    <Link<Route> to={Route::Dashboard} classes="btn btn-primary">
                        {"Back to dashboard"}
                    </Link<Route>>
                </div>
            </div>
        </div>
    }
}

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! { <ErrorView code="404" message="The page you are looking for does not exist." /> }
}

#[function_component(UnauthorizedPage)]
pub fn unauthorized_page() -> Html {
    html! { <ErrorView code="403" message="You do not have permission to view this page." /> }
}
