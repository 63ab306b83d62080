use std::rc::Rc;

use crate::models::{Coordinates, MapLayer};

/// Operaciones sobre el mapa vivo que necesitan los viewmodels
pub trait MapRenderer {
    /// Mover el marcador sin tocar la vista
    fn set_marker(&mut self, coordinates: Coordinates) -> Result<(), String>;

    /// Desplazar la vista manteniendo el zoom
    fn pan_to(&mut self, coordinates: Coordinates) -> Result<(), String>;

    /// Centrar con zoom explícito
    fn set_view(&mut self, coordinates: Coordinates, zoom: f64) -> Result<(), String>;

    /// Cambiar la capa base; el marcador se conserva
    fn switch_layer(&mut self, layer: MapLayer) -> Result<(), String>;

    /// Recalcular tamaño tras mover el contenedor en el DOM
    fn invalidate_size(&self);

    fn destroy(&mut self);

    fn is_ready(&self) -> bool;
}

/// Callbacks de interacción del usuario con el mapa
#[derive(Clone)]
pub struct MapHandlers {
    /// Clic en el mapa
    pub on_click: Rc<dyn Fn(Coordinates)>,
    /// Fin del arrastre del marcador
    pub on_marker_drag: Rc<dyn Fn(Coordinates)>,
}
