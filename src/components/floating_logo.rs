use yew::prelude::*;

use super::interactive_logo::InteractiveLogo;

#[function_component(FloatingLogo)]
pub fn floating_logo() -> Html {
    html! {
        <div style="position:absolute; top:16px; left:50%; transform:translateX(-50%); z-index:30;">
            <InteractiveLogo />
        </div>
    }
}
