pub mod geocoding_service;
pub mod network_monitor;
pub mod leaflet_loader;
pub mod location_store;
pub mod geolocation_service;
pub mod diagnostics_service;

pub use geocoding_service::{GeocodingError, GeocodingService};
pub use network_monitor::{check_connectivity, NetworkMonitor, NetworkStatus};
pub use leaflet_loader::{LeafletLoader, LoaderError};
pub use location_store::LocationStore;
pub use geolocation_service::{GeolocationError, GeolocationOptions, GeolocationService};
pub use diagnostics_service::{DiagnosticsService, Probe};
