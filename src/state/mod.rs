// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod map_lifecycle;

pub use app_state::*;
pub use map_lifecycle::*;
