use crate::config::DashboardConfig;
use crate::events::{Effect, EventKind, HandlerTable, Target, UiEvent};
use crate::models::{
    UploadFile, FILE_INPUT_SELECTOR, HIDDEN_CLASS, SUBMIT_BUTTON_ID, UPLOAD_FORM_ID,
    UPLOAD_PROGRESS_ID,
};
use crate::util::format_mib;
use thiserror::Error;

/// Validation failures; `Display` is the text shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum UploadError {
    #[error("Por favor seleccione un archivo")]
    MissingFile,

    #[error("El archivo es demasiado grande. Máximo: {}MB", format_mib(.max))]
    TooLarge { max: u64 },

    #[error("Tipo de archivo no permitido. Permitidos: {}", .allowed.join(", "))]
    ExtensionNotAllowed { allowed: Vec<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UploadPolicy {
    pub max_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            max_bytes: config.max_upload_bytes,
            allowed_extensions: config.upload_extensions.clone(),
        }
    }

    pub fn check_file(&self, file: &UploadFile) -> Result<(), UploadError> {
        if file.size > self.max_bytes {
            return Err(UploadError::TooLarge {
                max: self.max_bytes,
            });
        }

        if !self.allowed_extensions.is_empty() {
            let allowed = file
                .extension()
                .is_some_and(|ext| self.allowed_extensions.iter().any(|a| *a == ext));
            if !allowed {
                return Err(UploadError::ExtensionNotAllowed {
                    allowed: self.allowed_extensions.clone(),
                });
            }
        }

        Ok(())
    }

    /// Only the first selected file is checked; the form carries one upload.
    pub fn check_selection<'a>(&self, files: &'a [UploadFile]) -> Result<&'a UploadFile, UploadError> {
        let file = files.first().ok_or(UploadError::MissingFile)?;
        self.check_file(file)?;
        Ok(file)
    }
}

/// Gates and decorates the native upload form submission.
pub(crate) struct UploadFormController {
    policy: UploadPolicy,
}

impl UploadFormController {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            policy: UploadPolicy::new(config),
        }
    }

    pub fn handlers() -> HandlerTable<Self> {
        HandlerTable::new()
            .on(Target::Selector(FILE_INPUT_SELECTOR), EventKind::Change, Self::on_change)
            .on(Target::Id(UPLOAD_FORM_ID), EventKind::Submit, Self::on_submit)
    }

    fn on_change(&mut self, event: &UiEvent) -> Vec<Effect> {
        let UiEvent::Change { files } = event else {
            return Vec::new();
        };
        // Deselecting is not an error here; submit catches it.
        let Some(file) = files.first() else {
            return Vec::new();
        };

        match self.policy.check_file(file) {
            Ok(()) => Vec::new(),
            Err(e) => vec![
                Effect::Alert(e.to_string()),
                Effect::ClearValue(Target::Selector(FILE_INPUT_SELECTOR)),
            ],
        }
    }

    fn on_submit(&mut self, event: &UiEvent) -> Vec<Effect> {
        let UiEvent::Submit { files } = event else {
            return Vec::new();
        };

        match self.policy.check_selection(files) {
            Ok(_) => vec![
                Effect::RemoveClass(Target::Id(UPLOAD_PROGRESS_ID), HIDDEN_CLASS),
                Effect::ShowBusy(Target::Id(SUBMIT_BUTTON_ID)),
            ],
            Err(UploadError::MissingFile) => vec![
                Effect::PreventDefault,
                Effect::Alert(UploadError::MissingFile.to_string()),
            ],
            Err(e) => vec![
                Effect::PreventDefault,
                Effect::Alert(e.to_string()),
                Effect::ClearValue(Target::Selector(FILE_INPUT_SELECTOR)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB_20: u64 = 20 * 1024 * 1024;

    fn file(name: &str, size: u64) -> UploadFile {
        UploadFile {
            name: name.to_string(),
            size,
        }
    }

    fn controller() -> (UploadFormController, HandlerTable<UploadFormController>) {
        (
            UploadFormController::new(&DashboardConfig::default()),
            UploadFormController::handlers(),
        )
    }

    fn change(files: Vec<UploadFile>) -> UiEvent {
        UiEvent::Change { files }
    }

    fn submit(files: Vec<UploadFile>) -> UiEvent {
        UiEvent::Submit { files }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UploadError::MissingFile.to_string(),
            "Por favor seleccione un archivo"
        );
        assert_eq!(
            UploadError::TooLarge { max: MIB_20 }.to_string(),
            "El archivo es demasiado grande. Máximo: 20MB"
        );
        assert_eq!(
            UploadError::ExtensionNotAllowed {
                allowed: vec!["xlsx".to_string(), "csv".to_string()],
            }
            .to_string(),
            "Tipo de archivo no permitido. Permitidos: xlsx, csv"
        );
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let policy = UploadPolicy::new(&DashboardConfig::default());
        assert_eq!(policy.check_file(&file("a.csv", 20_971_520)), Ok(()));
        assert_eq!(
            policy.check_file(&file("a.csv", 20_971_521)),
            Err(UploadError::TooLarge { max: 20_971_520 })
        );
    }

    #[test]
    fn test_extension_allow_list() {
        let config = DashboardConfig {
            upload_extensions: vec!["xlsx".to_string(), "xlsm".to_string(), "csv".to_string()],
            ..Default::default()
        };
        let policy = UploadPolicy::new(&config);
        assert!(policy.check_file(&file("Denuncias.XLSX", 10)).is_ok());
        assert!(matches!(
            policy.check_file(&file("notas.pdf", 10)),
            Err(UploadError::ExtensionNotAllowed { .. })
        ));
        assert!(matches!(
            policy.check_file(&file("sin_extension", 10)),
            Err(UploadError::ExtensionNotAllowed { .. })
        ));
    }

    #[test]
    fn test_oversized_change_alerts_and_clears() {
        let (mut upload, table) = controller();
        let effects = table.dispatch(
            &mut upload,
            &Target::Selector(FILE_INPUT_SELECTOR),
            &change(vec![file("grande.xlsx", 20_971_521)]),
        );
        assert_eq!(
            effects,
            vec![
                Effect::Alert("El archivo es demasiado grande. Máximo: 20MB".to_string()),
                Effect::ClearValue(Target::Selector(FILE_INPUT_SELECTOR)),
            ]
        );
    }

    #[test]
    fn test_change_at_limit_or_empty_is_accepted() {
        let (mut upload, table) = controller();
        let target = Target::Selector(FILE_INPUT_SELECTOR);
        assert!(table
            .dispatch(&mut upload, &target, &change(vec![file("ok.csv", 20_971_520)]))
            .is_empty());
        assert!(table.dispatch(&mut upload, &target, &change(vec![])).is_empty());
    }

    #[test]
    fn test_change_checks_only_first_file() {
        let (mut upload, table) = controller();
        let effects = table.dispatch(
            &mut upload,
            &Target::Selector(FILE_INPUT_SELECTOR),
            &change(vec![file("ok.csv", 1), file("grande.csv", MIB_20 * 2)]),
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_submit_without_file_is_cancelled_and_button_untouched() {
        let (mut upload, table) = controller();
        let effects = table.dispatch(&mut upload, &Target::Id(UPLOAD_FORM_ID), &submit(vec![]));
        assert_eq!(
            effects,
            vec![
                Effect::PreventDefault,
                Effect::Alert("Por favor seleccione un archivo".to_string()),
            ]
        );
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::ShowBusy(_) | Effect::RemoveClass(..))));
    }

    #[test]
    fn test_valid_submit_shows_progress_and_busy_button() {
        let (mut upload, table) = controller();
        let effects = table.dispatch(
            &mut upload,
            &Target::Id(UPLOAD_FORM_ID),
            &submit(vec![file("denuncias.xlsx", 2048)]),
        );
        assert_eq!(
            effects,
            vec![
                Effect::RemoveClass(Target::Id(UPLOAD_PROGRESS_ID), HIDDEN_CLASS),
                Effect::ShowBusy(Target::Id(SUBMIT_BUTTON_ID)),
            ]
        );
        assert!(!effects.contains(&Effect::PreventDefault));
    }

    #[test]
    fn test_submit_revalidates_size() {
        let (mut upload, table) = controller();
        let effects = table.dispatch(
            &mut upload,
            &Target::Id(UPLOAD_FORM_ID),
            &submit(vec![file("grande.xlsx", MIB_20 + 1)]),
        );
        assert_eq!(effects.first(), Some(&Effect::PreventDefault));
        assert!(effects.contains(&Effect::ClearValue(Target::Selector(FILE_INPUT_SELECTOR))));
        assert!(!effects.iter().any(|e| matches!(e, Effect::ShowBusy(_))));
    }

    #[test]
    fn test_configured_limit_is_used_in_message() {
        let config = DashboardConfig {
            max_upload_bytes: 5 * 1024 * 1024,
            ..Default::default()
        };
        let policy = UploadPolicy::new(&config);
        let err = policy
            .check_file(&file("a.csv", 5 * 1024 * 1024 + 1))
            .unwrap_err();
        assert_eq!(err.to_string(), "El archivo es demasiado grande. Máximo: 5MB");
    }
}
