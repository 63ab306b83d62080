pub mod diagnostics_viewmodel;
pub mod map_viewmodel;
pub mod saved_locations_viewmodel;
pub mod search_viewmodel;
pub mod toast_viewmodel;

pub use diagnostics_viewmodel::DiagnosticsViewModel;
pub use map_viewmodel::MapViewModel;
pub use saved_locations_viewmodel::SavedLocationsViewModel;
pub use search_viewmodel::SearchViewModel;
pub use toast_viewmodel::ToastViewModel;
