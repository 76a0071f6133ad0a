//! Core library for the CONFOLD job submission front-end: the form model,
//! input checks, example presets and the HTTP client that posts jobs.

pub mod config;
pub mod contacts;
pub mod controller;
pub mod form;
pub mod help;
pub mod logging;
pub mod options;
pub mod pairing;
pub mod presets;
pub mod submit;
pub mod validation;

pub use config::{
    ConfigError, ConfigLoadResult, ConfigSource, FileConfig, SubmissionPreferences,
    ThemePreference, UiPreferences, config_directory, config_path, load_config, load_config_from,
    save_config, save_config_to, save_ui_only,
};
pub use contacts::{Contact, ContactMap, parse_contacts};
pub use controller::{FieldView, FormController, FormView, GroupVisibility, SectionView};
pub use form::{FieldGroup, FieldId, FieldKind, FieldValueError, SubmissionForm};
pub use help::{DEFAULT_ENDPOINT, HELP_TOPICS, HelpTopic, TOOL_INFO, find_topic, tooltip_for};
pub use options::Choice;
pub use pairing::{PairingError, PairingType, StrandPairing, check_pairings, parse_pairings};
pub use presets::ExamplePreset;
pub use submit::{
    FORM_CONTENT_TYPE, PreparedSubmission, SubmissionClient, SubmissionReceipt, SubmitError, prepare_submission,
};
pub use validation::{FieldIssue, Severity, ValidationReport, validate};
