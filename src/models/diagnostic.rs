use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticStatus {
    Success,
    Error,
    Warning,
    Loading,
}

/// Resultado de una prueba del panel de diagnóstico
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    pub test: String,
    pub status: DiagnosticStatus,
    pub message: String,
    pub details: Option<String>,
    pub timestamp: String,
}

impl DiagnosticResult {
    pub fn new(
        test: impl Into<String>,
        status: DiagnosticStatus,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            test: test.into(),
            status,
            message: message.into(),
            details,
            timestamp: super::now_iso(),
        }
    }

    pub fn loading(test: impl Into<String>) -> Self {
        Self::new(test, DiagnosticStatus::Loading, "Ejecutando...", None)
    }

    pub fn success(test: impl Into<String>, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(test, DiagnosticStatus::Success, message, Some(details.into()))
    }

    pub fn warning(test: impl Into<String>, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(test, DiagnosticStatus::Warning, message, Some(details.into()))
    }

    pub fn error(test: impl Into<String>, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(test, DiagnosticStatus::Error, message, Some(details.into()))
    }

    /// Añade " (Nms)" al detalle
    pub fn with_duration(mut self, millis: i64) -> Self {
        let details = format!("{} ({}ms)", self.details.as_deref().unwrap_or(""), millis);
        self.details = Some(details.trim().to_string());
        self
    }
}

/// Estado agregado de una ejecución del diagnóstico
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    Unknown,
    Success,
    Warning,
    Error,
}

impl OverallStatus {
    pub fn from_results(results: &[DiagnosticResult]) -> Self {
        if results.is_empty() {
            OverallStatus::Unknown
        } else if results.iter().any(|r| r.status == DiagnosticStatus::Error) {
            OverallStatus::Error
        } else if results.iter().any(|r| r.status == DiagnosticStatus::Warning) {
            OverallStatus::Warning
        } else {
            OverallStatus::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: DiagnosticStatus) -> DiagnosticResult {
        DiagnosticResult::new("t", status, "m", None)
    }

    #[test]
    fn overall_status_priority() {
        assert_eq!(OverallStatus::from_results(&[]), OverallStatus::Unknown);
        assert_eq!(
            OverallStatus::from_results(&[result(DiagnosticStatus::Success)]),
            OverallStatus::Success
        );
        assert_eq!(
            OverallStatus::from_results(&[
                result(DiagnosticStatus::Success),
                result(DiagnosticStatus::Warning)
            ]),
            OverallStatus::Warning
        );
        assert_eq!(
            OverallStatus::from_results(&[
                result(DiagnosticStatus::Warning),
                result(DiagnosticStatus::Error),
                result(DiagnosticStatus::Success)
            ]),
            OverallStatus::Error
        );
    }

    #[test]
    fn loading_only_counts_as_success() {
        // Mientras una prueba corre no hay errores ni advertencias todavía
        assert_eq!(
            OverallStatus::from_results(&[result(DiagnosticStatus::Loading)]),
            OverallStatus::Success
        );
    }

    #[test]
    fn duration_is_appended_to_details() {
        let r = DiagnosticResult::success("Red", "ok", "Acceso confirmado").with_duration(42);
        assert_eq!(r.details.as_deref(), Some("Acceso confirmado (42ms)"));

        let empty = DiagnosticResult::new("Red", DiagnosticStatus::Error, "x", None).with_duration(7);
        assert_eq!(empty.details.as_deref(), Some("(7ms)"));
    }
}
