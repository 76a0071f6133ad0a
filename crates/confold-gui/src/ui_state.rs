//! UI-specific state (ephemeral)

use chrono::Local;
use confold_core::ThemePreference;
use std::collections::VecDeque;

pub const MAX_LOG_ENTRIES: usize = 200;

/// UI-specific state that doesn't need to be persisted
#[derive(Clone)]
pub struct UiState {
    /// Current theme (dark/light)
    pub theme: Theme,

    /// Technical log visibility
    pub technical_log_expanded: bool,

    /// Server response preview visibility
    pub response_expanded: bool,

    /// Help topic window, keyed by topic
    pub help_topic: Option<&'static str>,

    /// Tool information window
    pub show_about: bool,

    /// One-line status under the submit button
    pub status_line: Option<(LogLevel, String)>,

    /// Technical log entries (max 200)
    pub technical_log: VecDeque<LogEntry>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            theme: Theme::Light,
            technical_log_expanded: false,
            response_expanded: false,
            help_topic: None,
            show_about: false,
            status_line: None,
            technical_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    /// Add a log entry, maintaining max 200 entries
    pub fn add_log_entry(&mut self, entry: LogEntry) {
        if self.technical_log.len() >= MAX_LOG_ENTRIES {
            self.technical_log.pop_front();
        }
        self.technical_log.push_back(entry);
    }

    /// Add a log entry stamped with the local time
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.add_log_entry(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        });
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Theme selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light | ThemePreference::System => Theme::Light,
        }
    }

    pub fn preference(self) -> ThemePreference {
        match self {
            Theme::Dark => ThemePreference::Dark,
            Theme::Light => ThemePreference::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Technical log entry
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log level for coloring
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "00:00:00".to_string(),
            level: LogLevel::Info,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_log_keeps_latest_entries() {
        let mut state = UiState::new();
        for index in 0..(MAX_LOG_ENTRIES + 5) {
            state.add_log_entry(entry(&index.to_string()));
        }
        assert_eq!(state.technical_log.len(), MAX_LOG_ENTRIES);
        assert_eq!(state.technical_log.front().unwrap().message, "5");
        assert_eq!(
            state.technical_log.back().unwrap().message,
            (MAX_LOG_ENTRIES + 4).to_string()
        );
    }

    #[test]
    fn test_theme_round_trips_through_preference() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(Theme::from_preference(theme.preference()), theme);
        }
        assert_eq!(Theme::from_preference(ThemePreference::System), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
