//! Application state for the CONFOLD window

use confold_core::config::FileConfig;
use confold_core::{FieldId, FieldIssue, FormController, ValidationReport};
use std::time::Instant;

/// Main application state (domain/persistent)
pub struct AppState {
    /// Configuration from confold-core
    pub config: FileConfig,

    /// Field values and advanced-group visibility
    pub controller: FormController,

    /// Result of the last submit attempt's checks, shown next to fields
    pub last_report: Option<ValidationReport>,

    /// Current submission state
    pub submission: SubmissionState,

    /// Non-fatal problems found while loading config.toml
    pub config_warnings: Vec<String>,
}

impl AppState {
    pub fn new() -> Self {
        let load = confold_core::load_config();
        Self::with_config(load.config, load.warnings)
    }

    pub fn with_config(config: FileConfig, config_warnings: Vec<String>) -> Self {
        Self {
            config,
            controller: FormController::new(),
            last_report: None,
            submission: SubmissionState::Idle,
            config_warnings,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionState::Running { .. })
    }

    /// Issues to show under a field from the last submit attempt.
    pub fn issues_for(&self, field: FieldId) -> Vec<FieldIssue> {
        self.last_report
            .as_ref()
            .map(|report| report.for_field(field).cloned().collect())
            .unwrap_or_default()
    }

    /// Re-check the form after an edit so shown issues follow the values.
    /// Nothing is shown until the first submit attempt.
    pub fn refresh_report(&mut self) {
        if self.last_report.is_some() {
            self.last_report = Some(self.controller.validate());
        }
    }

    /// Save UI preferences, leaving the submission section on disk alone
    pub fn save_ui_preferences(&self) -> Result<(), String> {
        confold_core::save_ui_only(&self.config.ui).map_err(|e| e.to_string())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Current state of a job submission
#[derive(Clone, Debug)]
pub enum SubmissionState {
    /// Nothing sent yet, or the result was dismissed
    Idle,

    /// Request in flight
    Running {
        job_id: String,
        started: Instant,
        message: Option<String>,
    },

    /// Endpoint answered
    Completed {
        status: u16,
        final_url: String,
        body: String,
        elapsed_ms: u64,
    },

    /// Request could not be made or did not complete
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use confold_core::{ExamplePreset, validate};

    #[test]
    fn test_issues_follow_last_report() {
        let mut state = AppState::with_config(FileConfig::default(), Vec::new());
        assert!(state.issues_for(FieldId::Email).is_empty());

        state.controller.fill_example(ExamplePreset::Test);
        state.last_report = Some(validate(&state.controller.form));

        assert_eq!(state.issues_for(FieldId::Email).len(), 1);
        assert!(state.issues_for(FieldId::Sequence).is_empty());
    }

    #[test]
    fn test_issues_clear_once_field_is_filled() {
        let mut state = AppState::with_config(FileConfig::default(), Vec::new());
        state.refresh_report();
        assert!(state.last_report.is_none());

        state.controller.fill_example(ExamplePreset::Test);
        state.last_report = Some(validate(&state.controller.form));
        assert_eq!(state.issues_for(FieldId::Email).len(), 1);

        state.controller.form.email = "me@example.org".to_string();
        state.refresh_report();
        assert!(state.issues_for(FieldId::Email).is_empty());

        state.controller.form.sequence.clear();
        state.refresh_report();
        assert_eq!(state.issues_for(FieldId::Sequence).len(), 1);
    }

    #[test]
    fn test_running_state_counts_as_submitting() {
        let mut state = AppState::with_config(FileConfig::default(), Vec::new());
        assert!(!state.is_submitting());
        state.submission = SubmissionState::Running {
            job_id: "example1".to_string(),
            started: Instant::now(),
            message: None,
        };
        assert!(state.is_submitting());
    }
}
