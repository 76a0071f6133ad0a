//! The submission form model: field identities, advanced-option groups and values.

use crate::options::{
    AtomScheme, Choice, ContactSubset, ContactType, ContactWeight, Lambda, RepelRadius,
    SecondaryWeight, SheetThreshold, Stage2Mode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every field the job submission endpoint accepts, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Email,
    JobId,
    Sequence,
    SecondaryStructure,
    Lambda,
    SheetThreshold,
    SecondaryWeight,
    Pairing,
    Contacts,
    ContactSubset,
    ContactType,
    ContactWeight,
    Stage2,
    AtomScheme,
    RepelRadius,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    SingleLine,
    MultiLine,
    Select,
}

impl FieldId {
    pub const ALL: [FieldId; 15] = [
        FieldId::Email,
        FieldId::JobId,
        FieldId::Sequence,
        FieldId::SecondaryStructure,
        FieldId::Lambda,
        FieldId::SheetThreshold,
        FieldId::SecondaryWeight,
        FieldId::Pairing,
        FieldId::Contacts,
        FieldId::ContactSubset,
        FieldId::ContactType,
        FieldId::ContactWeight,
        FieldId::Stage2,
        FieldId::AtomScheme,
        FieldId::RepelRadius,
    ];

    /// Name posted to the endpoint.
    pub fn form_name(self) -> &'static str {
        match self {
            FieldId::Email => "email",
            FieldId::JobId => "id",
            FieldId::Sequence => "protein_sequence",
            FieldId::SecondaryStructure => "protein_sec",
            FieldId::Lambda => "lambda",
            FieldId::SheetThreshold => "sheet_threshold",
            FieldId::SecondaryWeight => "sec_wt",
            FieldId::Pairing => "pairing",
            FieldId::Contacts => "rr",
            FieldId::ContactSubset => "rr_subset",
            FieldId::ContactType => "rr_type",
            FieldId::ContactWeight => "con_wt",
            FieldId::Stage2 => "stage2",
            FieldId::AtomScheme => "atom_scheme",
            FieldId::RepelRadius => "rep2",
        }
    }

    pub fn from_form_name(name: &str) -> Option<FieldId> {
        FieldId::ALL
            .iter()
            .copied()
            .find(|field| field.form_name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Email => "E-mail Address",
            FieldId::JobId => "Job Id",
            FieldId::Sequence => "Sequence",
            FieldId::SecondaryStructure => "Secondary Structure",
            FieldId::Lambda => "lambda",
            FieldId::SheetThreshold => "sheet detection threshold",
            FieldId::SecondaryWeight => "restraints weight",
            FieldId::Pairing => "pairing information",
            FieldId::Contacts => "Contacts",
            FieldId::ContactSubset => "select top-xL contacts",
            FieldId::ContactType => "contact type",
            FieldId::ContactWeight => "contact restraints weight",
            FieldId::Stage2 => "run stage2",
            FieldId::AtomScheme => "atom selection scheme",
            FieldId::RepelRadius => "second repel radius",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::Email | FieldId::JobId => FieldKind::SingleLine,
            FieldId::Sequence
            | FieldId::SecondaryStructure
            | FieldId::Pairing
            | FieldId::Contacts => FieldKind::MultiLine,
            _ => FieldKind::Select,
        }
    }

    pub fn required(self) -> bool {
        matches!(self, FieldId::Email | FieldId::Sequence | FieldId::Contacts)
    }

    /// Advanced-option group the field belongs to; `None` for always-visible fields.
    pub fn group(self) -> Option<FieldGroup> {
        FieldGroup::ALL
            .iter()
            .copied()
            .find(|group| group.fields().contains(&self))
    }

    /// `(value, label)` pairs for select fields, empty for text fields.
    pub fn options(self) -> Vec<(&'static str, &'static str)> {
        match self {
            FieldId::Lambda => Lambda::options(),
            FieldId::SheetThreshold => SheetThreshold::options(),
            FieldId::SecondaryWeight => SecondaryWeight::options(),
            FieldId::ContactSubset => ContactSubset::options(),
            FieldId::ContactType => ContactType::options(),
            FieldId::ContactWeight => ContactWeight::options(),
            FieldId::Stage2 => Stage2Mode::options(),
            FieldId::AtomScheme => AtomScheme::options(),
            FieldId::RepelRadius => RepelRadius::options(),
            _ => Vec::new(),
        }
    }
}

/// Collapsible groups of advanced options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldGroup {
    SecondaryStructure,
    Contacts,
    Cns,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 3] = [
        FieldGroup::SecondaryStructure,
        FieldGroup::Contacts,
        FieldGroup::Cns,
    ];

    pub fn fields(self) -> &'static [FieldId] {
        match self {
            FieldGroup::SecondaryStructure => &[
                FieldId::Lambda,
                FieldId::SheetThreshold,
                FieldId::SecondaryWeight,
                FieldId::Pairing,
            ],
            FieldGroup::Contacts => &[
                FieldId::ContactSubset,
                FieldId::ContactType,
                FieldId::ContactWeight,
            ],
            FieldGroup::Cns => &[FieldId::Stage2, FieldId::AtomScheme, FieldId::RepelRadius],
        }
    }

    /// Text of the link that expands or collapses the group.
    pub fn toggle_label(self) -> &'static str {
        match self {
            FieldGroup::SecondaryStructure => "more SS options",
            FieldGroup::Contacts => "more RR options",
            FieldGroup::Cns => "more options",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            FieldGroup::SecondaryStructure => "ss",
            FieldGroup::Contacts => "rr",
            FieldGroup::Cns => "cns",
        }
    }

    pub fn from_id(id: &str) -> Option<FieldGroup> {
        FieldGroup::ALL.iter().copied().find(|group| group.id() == id)
    }
}

/// Errors raised when a field is written by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldValueError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("'{value}' is not a valid option for {field}; expected one of: {expected}")]
    InvalidOption {
        field: &'static str,
        value: String,
        expected: String,
    },
}

/// Values of one job submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub sequence: String,
    #[serde(default)]
    pub secondary_structure: String,
    #[serde(default)]
    pub lambda: Lambda,
    #[serde(default)]
    pub sheet_threshold: SheetThreshold,
    #[serde(default)]
    pub secondary_weight: SecondaryWeight,
    #[serde(default)]
    pub pairing: String,
    #[serde(default)]
    pub contacts: String,
    #[serde(default)]
    pub contact_subset: ContactSubset,
    #[serde(default)]
    pub contact_type: ContactType,
    #[serde(default)]
    pub contact_weight: ContactWeight,
    #[serde(default)]
    pub stage2: Stage2Mode,
    #[serde(default)]
    pub atom_scheme: AtomScheme,
    #[serde(default)]
    pub repel_radius: RepelRadius,
}

impl SubmissionForm {
    /// Current value of a field as it would be posted.
    pub fn value(&self, field: FieldId) -> String {
        match field {
            FieldId::Email => self.email.clone(),
            FieldId::JobId => self.job_id.clone(),
            FieldId::Sequence => self.sequence.clone(),
            FieldId::SecondaryStructure => self.secondary_structure.clone(),
            FieldId::Lambda => self.lambda.value().to_string(),
            FieldId::SheetThreshold => self.sheet_threshold.value().to_string(),
            FieldId::SecondaryWeight => self.secondary_weight.value().to_string(),
            FieldId::Pairing => self.pairing.clone(),
            FieldId::Contacts => self.contacts.clone(),
            FieldId::ContactSubset => self.contact_subset.value().to_string(),
            FieldId::ContactType => self.contact_type.value().to_string(),
            FieldId::ContactWeight => self.contact_weight.value().to_string(),
            FieldId::Stage2 => self.stage2.value().to_string(),
            FieldId::AtomScheme => self.atom_scheme.value().to_string(),
            FieldId::RepelRadius => self.repel_radius.value().to_string(),
        }
    }

    /// Mutable access to the text behind a free-text field.
    pub fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::Email => Some(&mut self.email),
            FieldId::JobId => Some(&mut self.job_id),
            FieldId::Sequence => Some(&mut self.sequence),
            FieldId::SecondaryStructure => Some(&mut self.secondary_structure),
            FieldId::Pairing => Some(&mut self.pairing),
            FieldId::Contacts => Some(&mut self.contacts),
            _ => None,
        }
    }

    /// Write a field from its posted representation.
    ///
    /// Text fields accept anything; select fields only accept one of their option values.
    pub fn set_value(&mut self, field: FieldId, value: &str) -> Result<(), FieldValueError> {
        match field {
            FieldId::Email => self.email = value.to_string(),
            FieldId::JobId => self.job_id = value.to_string(),
            FieldId::Sequence => self.sequence = value.to_string(),
            FieldId::SecondaryStructure => self.secondary_structure = value.to_string(),
            FieldId::Pairing => self.pairing = value.to_string(),
            FieldId::Contacts => self.contacts = value.to_string(),
            FieldId::Lambda => self.lambda = parse_choice(field, value)?,
            FieldId::SheetThreshold => self.sheet_threshold = parse_choice(field, value)?,
            FieldId::SecondaryWeight => self.secondary_weight = parse_choice(field, value)?,
            FieldId::ContactSubset => self.contact_subset = parse_choice(field, value)?,
            FieldId::ContactType => self.contact_type = parse_choice(field, value)?,
            FieldId::ContactWeight => self.contact_weight = parse_choice(field, value)?,
            FieldId::Stage2 => self.stage2 = parse_choice(field, value)?,
            FieldId::AtomScheme => self.atom_scheme = parse_choice(field, value)?,
            FieldId::RepelRadius => self.repel_radius = parse_choice(field, value)?,
        }
        Ok(())
    }

    /// Write a field addressed by its posted name.
    pub fn set_by_name(&mut self, name: &str, value: &str) -> Result<(), FieldValueError> {
        let field = FieldId::from_form_name(name)
            .ok_or_else(|| FieldValueError::UnknownField(name.to_string()))?;
        self.set_value(field, value)
    }

    /// `(name, value)` pairs for every field in form order, hidden or not.
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        FieldId::ALL
            .iter()
            .map(|field| (field.form_name(), self.value(*field)))
            .collect()
    }

    /// Residue count of the sequence, ignoring whitespace and digits.
    pub fn sequence_length(&self) -> usize {
        crate::validation::residues(&self.sequence).count()
    }
}

fn parse_choice<T: Choice>(field: FieldId, value: &str) -> Result<T, FieldValueError> {
    T::from_value(value).ok_or_else(|| FieldValueError::InvalidOption {
        field: field.form_name(),
        value: value.to_string(),
        expected: T::ALL
            .iter()
            .map(|option| option.value())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_names_match_endpoint_contract() {
        let names: Vec<_> = FieldId::ALL.iter().map(|f| f.form_name()).collect();
        assert_eq!(
            names,
            vec![
                "email",
                "id",
                "protein_sequence",
                "protein_sec",
                "lambda",
                "sheet_threshold",
                "sec_wt",
                "pairing",
                "rr",
                "rr_subset",
                "rr_type",
                "con_wt",
                "stage2",
                "atom_scheme",
                "rep2",
            ]
        );
    }

    #[test]
    fn test_every_group_field_maps_back_to_its_group() {
        for group in FieldGroup::ALL {
            for field in group.fields() {
                assert_eq!(field.group(), Some(group));
            }
        }
        assert_eq!(FieldId::Email.group(), None);
        assert_eq!(FieldId::Contacts.group(), None);
        assert_eq!(FieldId::SecondaryStructure.group(), None);
    }

    #[test]
    fn test_only_email_sequence_contacts_required() {
        let required: Vec<_> = FieldId::ALL.iter().filter(|f| f.required()).collect();
        assert_eq!(
            required,
            vec![&FieldId::Email, &FieldId::Sequence, &FieldId::Contacts]
        );
    }

    #[test]
    fn test_set_value_accepts_options_and_text() {
        let mut form = SubmissionForm::default();
        form.set_value(FieldId::Lambda, "0.7").unwrap();
        form.set_value(FieldId::Stage2, "1").unwrap();
        form.set_by_name("rr_type", "ca").unwrap();
        form.set_by_name("protein_sequence", "MKV").unwrap();

        assert_eq!(form.lambda, Lambda::Tenths7);
        assert_eq!(form.stage2, Stage2Mode::None);
        assert_eq!(form.contact_type, ContactType::Ca);
        assert_eq!(form.sequence, "MKV");
    }

    #[test]
    fn test_set_value_rejects_bad_option() {
        let mut form = SubmissionForm::default();
        let err = form.set_value(FieldId::ContactWeight, "7").unwrap_err();
        match err {
            FieldValueError::InvalidOption {
                field, expected, ..
            } => {
                assert_eq!(field, "con_wt");
                assert_eq!(expected, "10, 1, 5, 50");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(form.contact_weight, ContactWeight::Ten);
        assert!(matches!(
            form.set_by_name("nope", "x"),
            Err(FieldValueError::UnknownField(_))
        ));
    }

    #[test]
    fn test_form_pairs_include_every_field() {
        let form = SubmissionForm::default();
        let pairs = form.form_pairs();
        assert_eq!(pairs.len(), 15);
        assert!(pairs.contains(&("stage2", "4".to_string())));
        assert!(pairs.contains(&("pairing", String::new())));
    }

    #[test]
    fn test_group_ids_round_trip() {
        for group in FieldGroup::ALL {
            assert_eq!(FieldGroup::from_id(group.id()), Some(group));
        }
        assert_eq!(FieldGroup::from_id("other"), None);
    }
}
