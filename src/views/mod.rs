pub mod app;
pub mod location_selector;
pub mod map_error;
pub mod diagnostics;
pub mod toasts;

pub use app::render_app;
pub use location_selector::{ensure_map_container, render_location_selector};
pub use map_error::render_map_error;
pub use diagnostics::render_diagnostics;
pub use toasts::render_toasts;
