use super::floating_logo::FloatingLogo;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <header style="position:relative; width:100vw; height:220px;">
            <FloatingLogo />
        </header>
    }
}
