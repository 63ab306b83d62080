// Módulo de mapas: trait común + implementación web sobre Leaflet

pub mod traits;
pub mod web;

pub use crate::config::MapConfig;
pub use traits::{MapHandlers, MapRenderer};
pub use web::LeafletMap;
