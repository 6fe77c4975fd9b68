use yew::{Children, Html, Properties, classes, function_component, html};

use crate::containers::header::Header;
use crate::routes::Route;
use crate::services::Services;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub current_route: Route,
    pub services: Services,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
    <>
        <Header current_route={props.current_route.clone()} services={props.services.clone()} />
        <div class="min-h-screen bg-base-100 flex flex-col">
            <main class={classes!("flex-grow", "p-4", "max-w-7xl", "w-full", "mx-auto")}>
                {props.children.clone()}
            </main>
            <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                <p>{"CRM Console"}</p>
            </footer>
        </div>
    </>
    }
}
