// ============================================================================
// DIAGNOSTICS VIEWMODEL - Ejecuta las pruebas en orden y publica resultados
// ============================================================================

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use crate::models::DiagnosticResult;
use crate::services::diagnostics_service::{DiagnosticsService, Probe};
use crate::state::{AppState, IncrementalUpdate, UpdateType};
use crate::utils::DIAGNOSTIC_PAUSE_MS;

pub struct DiagnosticsViewModel;

impl DiagnosticsViewModel {
    pub fn run_all(state: &AppState) {
        if *state.diagnostics_running.borrow() {
            return;
        }

        log::info!("🩺 [DIAG] Iniciando diagnóstico completo");
        state.diagnostics.borrow_mut().clear();
        *state.diagnostics_running.borrow_mut() = true;
        state.notify_subscribers();

        let state = state.clone();
        spawn_local(async move {
            for probe in Probe::ALL {
                state
                    .diagnostics
                    .borrow_mut()
                    .push(DiagnosticResult::loading(probe.name()));
                state.notify_with_type(UpdateType::Incremental(IncrementalUpdate::Diagnostics));

                let result = DiagnosticsService::run(probe).await;
                replace_result(&mut state.diagnostics.borrow_mut(), result);
                state.notify_with_type(UpdateType::Incremental(IncrementalUpdate::Diagnostics));

                TimeoutFuture::new(DIAGNOSTIC_PAUSE_MS).await;
            }

            *state.diagnostics_running.borrow_mut() = false;
            log::info!("🩺 [DIAG] Diagnóstico terminado");
            state.notify_subscribers();
        });
    }
}

/// Sustituye el registro "Ejecutando..." de la misma prueba (o lo añade)
fn replace_result(results: &mut Vec<DiagnosticResult>, result: DiagnosticResult) {
    match results.iter_mut().rev().find(|r| r.test == result.test) {
        Some(slot) => *slot = result,
        None => results.push(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiagnosticStatus;

    #[test]
    fn final_result_replaces_loading_record() {
        let mut results = vec![
            DiagnosticResult::success("Conectividad de Red", "ok", "x"),
            DiagnosticResult::loading("Biblioteca Leaflet"),
        ];
        replace_result(
            &mut results,
            DiagnosticResult::warning("Biblioteca Leaflet", "Leaflet disponible pero no cargado", "y"),
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].status, DiagnosticStatus::Warning);
        assert_eq!(results[0].status, DiagnosticStatus::Success);
    }

    #[test]
    fn unknown_test_is_appended() {
        let mut results = Vec::new();
        replace_result(&mut results, DiagnosticResult::error("API Nominatim", "x", "y"));
        assert_eq!(results.len(), 1);
    }
}
