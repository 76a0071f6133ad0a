//! UI widgets for the CONFOLD window

pub mod example_bar;
pub mod form_sections;
pub mod help_window;
pub mod progress_display;
pub mod technical_log;
