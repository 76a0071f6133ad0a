//! Client-side checks run before a job is posted.
//!
//! Only empty required fields block a submission. Everything else is reported
//! as a warning and left for the backend to judge.

use crate::contacts::parse_contacts;
use crate::form::{FieldId, SubmissionForm};
use crate::pairing::check_pairings;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

const STANDARD_RESIDUES: &str = "ACDEFGHIKLMNPQRSTVWY";
const STRUCTURE_CODES: &str = "HEC";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: FieldId,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<FieldIssue>,
}

impl ValidationReport {
    /// True when at least one required field is missing.
    pub fn is_blocked(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &FieldIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &FieldIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    pub fn for_field(&self, field: FieldId) -> impl Iterator<Item = &FieldIssue> {
        self.issues.iter().filter(move |issue| issue.field == field)
    }

    /// Required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<FieldId> {
        self.errors().map(|issue| issue.field).collect()
    }

    fn error(&mut self, field: FieldId, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field,
            severity: Severity::Error,
            message: message.into(),
        });
    }

    fn warn(&mut self, field: FieldId, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field,
            severity: Severity::Warning,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<_> = self
            .missing_fields()
            .into_iter()
            .map(|field| field.label())
            .collect();
        if missing.is_empty() {
            write!(f, "no required fields missing")
        } else {
            write!(f, "missing required fields: {}", missing.join(", "))
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

/// Residue letters of a sequence, ignoring FASTA headers, whitespace and digits.
pub fn residues(sequence: &str) -> impl Iterator<Item = char> + '_ {
    sequence
        .lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .flat_map(str::chars)
        .filter(|ch| !ch.is_whitespace() && !ch.is_ascii_digit())
}

/// Run every check against the form.
pub fn validate(form: &SubmissionForm) -> ValidationReport {
    let mut report = ValidationReport::default();

    for field in FieldId::ALL.iter().copied().filter(|f| f.required()) {
        if form.value(field).trim().is_empty() {
            report.error(field, "this field is required");
        }
    }

    let email = form.email.trim();
    if !email.is_empty() && !email_pattern().is_match(email) {
        report.warn(FieldId::Email, format!("'{email}' does not look like an e-mail address"));
    }

    let sequence: String = residues(&form.sequence).collect();
    let unusual: Vec<char> = sequence
        .chars()
        .filter(|ch| !STANDARD_RESIDUES.contains(ch.to_ascii_uppercase()))
        .collect();
    if !unusual.is_empty() {
        let mut letters = unusual.clone();
        letters.sort_unstable();
        letters.dedup();
        report.warn(
            FieldId::Sequence,
            format!(
                "{} non-standard residue character(s): {}",
                unusual.len(),
                letters.into_iter().collect::<String>()
            ),
        );
    }

    let structure: String = form
        .secondary_structure
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    if !structure.is_empty() {
        if !sequence.is_empty() && structure.chars().count() != sequence.chars().count() {
            report.warn(
                FieldId::SecondaryStructure,
                format!(
                    "length {} differs from sequence length {}",
                    structure.chars().count(),
                    sequence.chars().count()
                ),
            );
        }
        if structure
            .chars()
            .any(|ch| !STRUCTURE_CODES.contains(ch.to_ascii_uppercase()))
        {
            report.warn(
                FieldId::SecondaryStructure,
                "expected only H (helix), E (strand) or C (coil) codes",
            );
        }
    }

    let (_, pairing_errors) = check_pairings(&form.pairing);
    for err in pairing_errors {
        report.warn(FieldId::Pairing, err.to_string());
    }

    if !form.contacts.trim().is_empty() {
        let map = parse_contacts(&form.contacts);
        if map.is_empty() {
            report.warn(FieldId::Contacts, "no contact rows recognised");
        }
        for rejected in &map.rejected {
            report.warn(
                FieldId::Contacts,
                format!("line {}: unreadable contact row '{}'", rejected.line, rejected.text),
            );
        }
        if let Some(position) = map.unsorted_positions().first() {
            report.warn(
                FieldId::Contacts,
                format!(
                    "contacts must be sorted by descending confidence (contact {position} ranks above its predecessor)"
                ),
            );
        }
    }

    report
}
