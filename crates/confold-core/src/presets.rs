//! Built-in example jobs that demonstrate the form.

use crate::form::SubmissionForm;
use crate::options::{
    AtomScheme, ContactSubset, ContactType, ContactWeight, Lambda, RepelRadius, SecondaryWeight,
    SheetThreshold, Stage2Mode,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TEST_PRESET_NAME: &str = "example1(test)";
pub const TRUE_CONTACTS_PRESET_NAME: &str = "example2(true-rr)";
pub const PREDICTED_CONTACTS_PRESET_NAME: &str = "example3(predicted-rr)";

/// Trp-cage miniprotein (1L2Y).
pub const TRP_CAGE_SEQUENCE: &str = "NLYIQWLKDGGPSSGRPPPS";
pub const TRP_CAGE_SECONDARY: &str = "CHHHHHHHHCCCCCCCCCCC";
pub const TRP_CAGE_CONTACTS: &str = "NLYIQWLKDGGPSSGRPPPS
3 19 0 8 1.00
6 12 0 8 1.00
6 18 0 8 1.00
2 6 0 8 1.00
";

/// Protein G B1 domain (1PGA).
pub const GB1_SEQUENCE: &str = "MTYKLILNGKTLKGETTTEAVDAATAEKVFKQYANDNGVDGEWTYDDATKTFTVTE";
pub const GB1_SECONDARY: &str = "CEEEEEEECCCCEEEEEEEECCHHHHHHHHHHHHHHCCCCCEEEEECCCCEEEEEC";
pub const GB1_TRUE_CONTACTS: &str = "MTYKLILNGKTLKGETTTEAVDAATAEKVFKQYANDNGVDGEWTYDDATKTFTVTE
2 19 0 8 1.00
3 18 0 8 1.00
3 51 0 8 1.00
4 17 0 8 1.00
5 16 0 8 1.00
5 53 0 8 1.00
6 15 0 8 1.00
7 14 0 8 1.00
7 55 0 8 1.00
8 13 0 8 1.00
23 27 0 8 1.00
26 30 0 8 1.00
29 33 0 8 1.00
32 36 0 8 1.00
42 55 0 8 1.00
44 53 0 8 1.00
46 51 0 8 1.00
";
pub const GB1_PREDICTED_CONTACTS: &str = "MTYKLILNGKTLKGETTTEAVDAATAEKVFKQYANDNGVDGEWTYDDATKTFTVTE
10 40 0 8 0.95
44 53 0 8 0.93
26 30 0 8 0.91
26 47 0 8 0.89
7 14 0 8 0.87
6 15 0 8 0.85
5 30 0 8 0.83
4 17 0 8 0.81
42 55 0 8 0.79
2 19 0 8 0.77
8 13 0 8 0.75
5 53 0 8 0.73
46 51 0 8 0.71
7 55 0 8 0.69
32 36 0 8 0.67
3 51 0 8 0.65
3 18 0 8 0.63
29 33 0 8 0.61
5 16 0 8 0.59
23 27 0 8 0.57
";
pub const GB1_PAIRING: &str = "2 8 19 13 A 0.9
3 7 51 55 P 0.8
42 46 55 51 A 0.9
";

/// The three examples offered next to the reset link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExamplePreset {
    /// Small, fast job: Trp-cage without a second stage.
    Test,
    /// Protein G B1 with contacts taken from the native structure.
    TrueContacts,
    /// Protein G B1 with predicted contacts and strand pairing hints.
    PredictedContacts,
}

impl ExamplePreset {
    pub const ALL: [ExamplePreset; 3] = [
        ExamplePreset::Test,
        ExamplePreset::TrueContacts,
        ExamplePreset::PredictedContacts,
    ];

    /// Position of the preset in the example links, starting at 1.
    pub fn number(self) -> u8 {
        match self {
            ExamplePreset::Test => 1,
            ExamplePreset::TrueContacts => 2,
            ExamplePreset::PredictedContacts => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<ExamplePreset> {
        ExamplePreset::ALL
            .iter()
            .copied()
            .find(|preset| preset.number() == number)
    }

    pub fn name(self) -> &'static str {
        match self {
            ExamplePreset::Test => TEST_PRESET_NAME,
            ExamplePreset::TrueContacts => TRUE_CONTACTS_PRESET_NAME,
            ExamplePreset::PredictedContacts => PREDICTED_CONTACTS_PRESET_NAME,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExamplePreset::Test => "Trp-cage (20 residues), a few contacts, no stage 2",
            ExamplePreset::TrueContacts => "Protein G B1 domain (56 residues) with true contacts",
            ExamplePreset::PredictedContacts => {
                "Protein G B1 domain with predicted contacts, top-1.0L and strand pairings"
            }
        }
    }

    /// Every field value of the example. Email is left empty for the user to supply.
    pub fn form(self) -> SubmissionForm {
        match self {
            ExamplePreset::Test => SubmissionForm {
                email: String::new(),
                job_id: "example1".to_string(),
                sequence: TRP_CAGE_SEQUENCE.to_string(),
                secondary_structure: TRP_CAGE_SECONDARY.to_string(),
                lambda: Lambda::One,
                sheet_threshold: SheetThreshold::Angstrom7_0,
                secondary_weight: SecondaryWeight::One,
                pairing: String::new(),
                contacts: TRP_CAGE_CONTACTS.to_string(),
                contact_subset: ContactSubset::All,
                contact_type: ContactType::Cb,
                contact_weight: ContactWeight::Ten,
                stage2: Stage2Mode::None,
                atom_scheme: AtomScheme::ExistingO,
                repel_radius: RepelRadius::R0_80,
            },
            ExamplePreset::TrueContacts => SubmissionForm {
                email: String::new(),
                job_id: "example2".to_string(),
                sequence: GB1_SEQUENCE.to_string(),
                secondary_structure: GB1_SECONDARY.to_string(),
                lambda: Lambda::One,
                sheet_threshold: SheetThreshold::Angstrom7_0,
                secondary_weight: SecondaryWeight::One,
                pairing: String::new(),
                contacts: GB1_TRUE_CONTACTS.to_string(),
                contact_subset: ContactSubset::All,
                contact_type: ContactType::Cb,
                contact_weight: ContactWeight::Ten,
                stage2: Stage2Mode::Both,
                atom_scheme: AtomScheme::ExistingO,
                repel_radius: RepelRadius::R0_80,
            },
            ExamplePreset::PredictedContacts => SubmissionForm {
                email: String::new(),
                job_id: "example3".to_string(),
                sequence: GB1_SEQUENCE.to_string(),
                secondary_structure: GB1_SECONDARY.to_string(),
                lambda: Lambda::One,
                sheet_threshold: SheetThreshold::Angstrom7_0,
                secondary_weight: SecondaryWeight::One,
                pairing: GB1_PAIRING.to_string(),
                contacts: GB1_PREDICTED_CONTACTS.to_string(),
                contact_subset: ContactSubset::Top1_0L,
                contact_type: ContactType::Cb,
                contact_weight: ContactWeight::Ten,
                stage2: Stage2Mode::Both,
                atom_scheme: AtomScheme::ExistingO,
                repel_radius: RepelRadius::R0_80,
            },
        }
    }
}

impl fmt::Display for ExamplePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::parse_contacts;
    use crate::pairing::parse_pairings;
    use crate::validation::validate;

    #[test]
    fn test_numbers_round_trip() {
        for preset in ExamplePreset::ALL {
            assert_eq!(ExamplePreset::from_number(preset.number()), Some(preset));
        }
        assert_eq!(ExamplePreset::from_number(0), None);
        assert_eq!(ExamplePreset::from_number(4), None);
    }

    #[test]
    fn test_secondary_structure_matches_sequence_length() {
        assert_eq!(TRP_CAGE_SEQUENCE.len(), TRP_CAGE_SECONDARY.len());
        assert_eq!(GB1_SEQUENCE.len(), 56);
        assert_eq!(GB1_SEQUENCE.len(), GB1_SECONDARY.len());
    }

    #[test]
    fn test_contact_lists_are_well_formed() {
        for text in [TRP_CAGE_CONTACTS, GB1_TRUE_CONTACTS, GB1_PREDICTED_CONTACTS] {
            let map = parse_contacts(text);
            assert!(!map.is_empty());
            assert!(map.rejected.is_empty());
            assert!(map.is_sorted_by_confidence());
        }
        assert_eq!(parse_contacts(GB1_TRUE_CONTACTS).contacts.len(), 17);
        assert_eq!(parse_contacts(GB1_PREDICTED_CONTACTS).contacts.len(), 20);
    }

    #[test]
    fn test_pairing_hints_parse() {
        let records = parse_pairings(GB1_PAIRING).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_presets_only_miss_email() {
        for preset in ExamplePreset::ALL {
            let report = validate(&preset.form());
            assert_eq!(
                report.missing_fields(),
                vec![crate::form::FieldId::Email],
                "{preset}"
            );
            assert_eq!(report.warnings().count(), 0, "{preset}: {:?}", report.issues);
        }
    }

    #[test]
    fn test_preset_records_hold_their_data() {
        let test = ExamplePreset::Test.form();
        assert_eq!(test.email, "");
        assert_eq!(test.job_id, "example1");
        assert_eq!(test.sequence, TRP_CAGE_SEQUENCE);
        assert_eq!(test.secondary_structure, TRP_CAGE_SECONDARY);
        assert_eq!(test.contacts, TRP_CAGE_CONTACTS);
        assert_eq!(test.pairing, "");
        assert_eq!(test.stage2, Stage2Mode::None);
        assert_eq!(test.contact_subset, ContactSubset::All);

        let true_rr = ExamplePreset::TrueContacts.form();
        assert_eq!(true_rr.job_id, "example2");
        assert_eq!(true_rr.sequence, GB1_SEQUENCE);
        assert_eq!(true_rr.contacts, GB1_TRUE_CONTACTS);
        assert_eq!(true_rr.pairing, "");
        assert_eq!(true_rr.stage2, Stage2Mode::Both);
        assert_eq!(true_rr.contact_subset, ContactSubset::All);

        let predicted = ExamplePreset::PredictedContacts.form();
        assert_eq!(predicted.job_id, "example3");
        assert_eq!(predicted.sequence, GB1_SEQUENCE);
        assert_eq!(predicted.secondary_structure, GB1_SECONDARY);
        assert_eq!(predicted.contacts, GB1_PREDICTED_CONTACTS);
        assert_eq!(predicted.pairing, GB1_PAIRING);
        assert_eq!(predicted.contact_subset, ContactSubset::Top1_0L);
        assert_eq!(predicted.stage2, Stage2Mode::Both);

        for form in [&test, &true_rr, &predicted] {
            assert_eq!(form.lambda, Lambda::One);
            assert_eq!(form.sheet_threshold, SheetThreshold::Angstrom7_0);
            assert_eq!(form.secondary_weight, SecondaryWeight::One);
            assert_eq!(form.contact_type, ContactType::Cb);
            assert_eq!(form.contact_weight, ContactWeight::Ten);
            assert_eq!(form.atom_scheme, AtomScheme::ExistingO);
            assert_eq!(form.repel_radius, RepelRadius::R0_80);
        }
    }

    #[test]
    fn test_presets_are_distinct() {
        let forms: Vec<_> = ExamplePreset::ALL.iter().map(|p| p.form()).collect();
        assert_ne!(forms[0], forms[1]);
        assert_ne!(forms[1], forms[2]);
        assert_ne!(forms[0], forms[2]);
    }
}
