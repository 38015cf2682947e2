pub mod app;
pub mod floating_logo;
pub mod interactive_logo;

pub use app::App;
