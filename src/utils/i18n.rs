// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

pub const SUPPORTED_LANGUAGES: [&str; 2] = ["ES", "EN"];

/// (clave, español, inglés)
const TRANSLATIONS: &[(&str, &str, &str)] = &[
    // Cabecera
    ("app_titulo", "Selector de Ubicación", "Location Picker"),
    ("app_subtitulo", "Selecciona tu ubicación usando OpenStreetMap - 100% Gratuito", "Pick your location with OpenStreetMap - 100% free"),
    ("powered_by", "Powered by OpenStreetMap & Leaflet.js", "Powered by OpenStreetMap & Leaflet.js"),
    ("mapa_interactivo", "🗺️ Mapa Interactivo", "🗺️ Interactive Map"),
    ("mapa_instrucciones", "Busca una dirección o haz clic en el mapa para seleccionar tu ubicación", "Search for an address or click the map to pick your location"),
    ("nav_diagnostico", "🩺 Diagnóstico", "🩺 Diagnostics"),
    ("nav_volver", "← Volver al mapa", "← Back to map"),
    ("idioma", "Idioma", "Language"),

    // Selector
    ("sin_conexion", "Sin conexión", "Offline"),
    ("sin_conexion_desc", "No hay conexión a internet. Algunas funciones pueden no estar disponibles.", "No internet connection. Some features may be unavailable."),
    ("cargando_mapa", "Cargando mapa...", "Loading map..."),
    ("buscar_placeholder", "Buscar dirección, ciudad o lugar...", "Search address, city or place..."),
    ("buscar", "Buscar", "Search"),
    ("buscando", "Buscando...", "Searching..."),
    ("mi_ubicacion", "📍 Mi ubicación", "📍 My location"),
    ("localizando", "Localizando...", "Locating..."),
    ("guardar", "💾 Guardar ubicación", "💾 Save location"),
    ("tipo_mapa", "Tipo de mapa", "Map type"),
    ("capa_osm", "Mapa estándar", "Standard"),
    ("capa_satelite", "Satélite", "Satellite"),
    ("capa_topo", "Topográfico", "Topographic"),
    ("ubicacion_seleccionada", "Ubicación seleccionada", "Selected location"),
    ("latitud", "Latitud", "Latitude"),
    ("longitud", "Longitud", "Longitude"),
    ("direccion", "Dirección", "Address"),
    ("seleccionada", "Seleccionada", "Selected"),
    ("ninguna_seleccion", "Haz clic en el mapa o busca una dirección", "Click the map or search for an address"),
    ("ubicaciones_guardadas", "Ubicaciones guardadas", "Saved locations"),
    ("sin_guardadas", "No hay ubicaciones guardadas", "No saved locations"),
    ("cargar", "Cargar", "Load"),
    ("eliminar", "Eliminar", "Delete"),

    // Error del mapa
    ("reintentar", "Reintentar", "Retry"),
    ("recargar_pagina", "Recargar página", "Reload page"),
    ("diagnostico_error", "Diagnóstico del Error", "Error diagnosis"),
    ("estado_conexion", "Estado de conexión:", "Connection status:"),
    ("conectado", "Conectado", "Online"),
    ("desconectado", "Desconectado", "Offline"),
    ("tipo_error", "Tipo de error:", "Error type:"),
    ("reintentos", "Reintentos:", "Retries:"),
    ("marca_tiempo", "Fecha:", "Timestamp:"),

    // Toasts
    ("error", "Error", "Error"),
    ("toast_mapa_cargado", "Mapa cargado", "Map loaded"),
    ("toast_mapa_cargado_desc", "El mapa se ha cargado correctamente.", "The map loaded successfully."),
    ("toast_conexion_restaurada", "Conexión restaurada", "Connection restored"),
    ("toast_reintentando", "Reintentando cargar el mapa...", "Retrying to load the map..."),
    ("toast_ubicacion_seleccionada", "Ubicación seleccionada", "Location selected"),
    ("toast_error_actualizar", "No se pudo actualizar la ubicación.", "Could not update the location."),
    ("toast_error_almacenamiento", "Error de almacenamiento", "Storage error"),
    ("toast_error_cargar_guardadas", "No se pudieron cargar las ubicaciones guardadas.", "Saved locations could not be loaded."),
    ("toast_sin_seleccion", "No hay ninguna ubicación seleccionada para guardar.", "There is no selected location to save."),
    ("toast_guardada", "Ubicación guardada", "Location saved"),
    ("toast_guardada_desc", "La ubicación se ha guardado correctamente.", "The location was saved."),
    ("toast_error_guardar", "No se pudo guardar la ubicación.", "The location could not be saved."),
    ("toast_eliminada", "Ubicación eliminada", "Location deleted"),
    ("toast_eliminada_desc", "La ubicación se ha eliminado de la lista.", "The location was removed from the list."),
    ("toast_error_eliminar", "No se pudo eliminar la ubicación.", "The location could not be deleted."),
    ("toast_error_cargar_guardada", "No se pudo cargar la ubicación guardada.", "The saved location could not be loaded."),
    ("toast_no_encontrado", "No encontrado", "Not found"),
    ("toast_no_encontrado_desc", "No se encontraron resultados para la búsqueda.", "No results for this search."),
    ("toast_error_busqueda", "Error de búsqueda", "Search error"),
    ("toast_error_seleccion", "No se pudo seleccionar la ubicación.", "The location could not be selected."),
    ("toast_error_capa", "No se pudo cambiar el tipo de mapa.", "The map type could not be changed."),
    ("toast_error_clic", "No se pudo procesar la selección en el mapa.", "The map selection could not be processed."),
    ("toast_error_arrastre", "No se pudo procesar el movimiento del marcador.", "The marker move could not be processed."),
    ("toast_error_geolocalizacion", "Error de geolocalización", "Geolocation error"),

    // Búsqueda
    ("busqueda_timeout", "La búsqueda tardó demasiado tiempo.", "The search took too long."),
    ("busqueda_servidor", "Error del servidor de búsqueda.", "Search server error."),
    ("busqueda_generico", "No se pudo realizar la búsqueda.", "The search could not be performed."),

    // Geolocalización
    ("geo_no_soportada", "La geolocalización no está soportada en este navegador.", "Geolocation is not supported by this browser."),
    ("geo_permiso_denegado", "Permisos de geolocalización denegados.", "Geolocation permission denied."),
    ("geo_no_disponible", "Información de ubicación no disponible.", "Location information unavailable."),
    ("geo_timeout", "Tiempo de espera agotado para obtener la ubicación.", "Timed out while getting the location."),
    ("geo_generico", "No se pudo obtener tu ubicación actual.", "Your current location could not be determined."),

    // Diagnóstico
    ("diag_titulo", "Diagnóstico del Mapa", "Map Diagnostics"),
    ("diag_subtitulo", "Herramienta de diagnóstico y solución de problemas", "Diagnostics and troubleshooting tool"),
    ("diag_descripcion", "Ejecuta un diagnóstico completo para identificar problemas con el mapa.", "Run a full diagnosis to find problems with the map."),
    ("diag_ejecutar", "Ejecutar Diagnóstico", "Run diagnostics"),
    ("diag_ejecutando", "Ejecutando...", "Running..."),
    ("diag_resultados", "Resultados del Diagnóstico", "Diagnostic results"),
    ("diag_problemas", "Problemas Detectados", "Problems detected"),
    ("diag_problemas_desc", "Se encontraron errores que pueden afectar el funcionamiento del mapa.", "Errors were found that may affect the map."),
    ("diag_advertencias", "Advertencias Encontradas", "Warnings found"),
    ("diag_advertencias_desc", "Se encontraron advertencias que podrían afectar algunas funciones.", "Warnings were found that could affect some features."),
    ("diag_completado", "Diagnóstico Completado", "Diagnostics complete"),
    ("diag_completado_desc", "Todos los componentes están funcionando correctamente.", "All components are working correctly."),
    ("estado_exitoso", "Exitoso", "Passed"),
    ("estado_error", "Error", "Error"),
    ("estado_advertencia", "Advertencia", "Warning"),
    ("estado_cargando", "Cargando", "Loading"),

    // Guía de solución de problemas
    ("guia_titulo", "Guía de Solución de Problemas", "Troubleshooting guide"),
    ("guia_conectividad", "Error de Conectividad", "Connectivity error"),
    ("guia_conectividad_1", "Verifica tu conexión a internet", "Check your internet connection"),
    ("guia_conectividad_2", "Comprueba si hay un firewall bloqueando el acceso", "Check whether a firewall is blocking access"),
    ("guia_conectividad_3", "Intenta usar una red diferente", "Try a different network"),
    ("guia_conectividad_4", "Verifica que no haya problemas con tu proveedor de internet", "Make sure your internet provider has no outage"),
    ("guia_biblioteca", "Error de Biblioteca", "Library error"),
    ("guia_biblioteca_1", "Recarga la página para reintentar la carga", "Reload the page to retry loading"),
    ("guia_biblioteca_2", "Limpia la caché del navegador", "Clear the browser cache"),
    ("guia_biblioteca_3", "Verifica que no haya bloqueadores de contenido activos", "Make sure no content blockers are active"),
    ("guia_biblioteca_4", "Intenta con un navegador diferente", "Try a different browser"),
    ("guia_api", "Error de API", "API error"),
    ("guia_api_1", "El servicio puede estar temporalmente no disponible", "The service may be temporarily unavailable"),
    ("guia_api_2", "Intenta de nuevo en unos minutos", "Try again in a few minutes"),
    ("guia_api_3", "Verifica que no haya restricciones de red", "Make sure there are no network restrictions"),
    ("guia_api_4", "Contacta al soporte si el problema persiste", "Contact support if the problem persists"),
    ("guia_geolocalizacion", "Error de Geolocalización", "Geolocation error"),
    ("guia_geolocalizacion_1", "Permite el acceso a la ubicación en tu navegador", "Allow location access in your browser"),
    ("guia_geolocalizacion_2", "Verifica la configuración de privacidad", "Check your privacy settings"),
    ("guia_geolocalizacion_3", "Asegúrate de estar usando HTTPS", "Make sure you are using HTTPS"),
    ("guia_geolocalizacion_4", "Intenta buscar manualmente tu ubicación", "Try searching for your location manually"),
];

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let english = lang.eq_ignore_ascii_case("EN");
    TRANSLATIONS
        .iter()
        .map(|(key, es, en)| (*key, if english { *en } else { *es }))
        .collect()
}

/// Normaliza el código de idioma; cualquier valor no soportado cae en "ES"
pub fn normalize_language(lang: &str) -> String {
    let upper = lang.trim().to_uppercase();
    if SUPPORTED_LANGUAGES.contains(&upper.as_str()) {
        upper
    } else {
        "ES".to_string()
    }
}

/// Función de traducción
///
/// Devuelve la clave si no hay traducción
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn translates_in_both_languages() {
        assert_eq!(t("buscar", "ES"), "Buscar");
        assert_eq!(t("buscar", "en"), "Search");
        // Idioma desconocido cae en español
        assert_eq!(t("buscar", "FR"), "Buscar");
    }

    #[test]
    fn unknown_key_returns_key() {
        assert_eq!(t("no_existe", "ES"), "no_existe");
    }

    #[test]
    fn keys_are_unique() {
        let mut seen = HashSet::new();
        for (key, _, _) in TRANSLATIONS {
            assert!(seen.insert(*key), "clave duplicada: {}", key);
        }
    }

    #[test]
    fn composed_keys_exist() {
        for section in ["guia_conectividad", "guia_biblioteca", "guia_api", "guia_geolocalizacion"] {
            for n in 1..=4 {
                let key = format!("{}_{}", section, n);
                assert_ne!(t(&key, "ES"), key);
                assert_ne!(t(&key, "EN"), key);
            }
        }
        for layer in crate::models::MapLayer::ALL {
            assert_ne!(t(layer.label_key(), "EN"), layer.label_key());
        }
    }

    #[test]
    fn normalizes_language_codes() {
        assert_eq!(normalize_language("en"), "EN");
        assert_eq!(normalize_language(" es "), "ES");
        assert_eq!(normalize_language("FR"), "ES");
    }
}
