mod components;
mod driver;
mod error;
mod model;
mod state;
mod surface;
mod util;

use components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
