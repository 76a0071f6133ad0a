//! Option sets for the select-style form fields.
//!
//! Every enum mirrors one `<select>` of the submission form: the wire value is
//! what gets posted, the label is what a user picks from, and [`Choice::ALL`]
//! keeps the display order of the original form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of options posted under a single form field.
pub trait Choice: Copy + Eq + Sized + 'static {
    /// Options in display order.
    const ALL: &'static [Self];

    /// Value sent in the form body.
    fn value(self) -> &'static str;

    /// Human readable option text.
    fn label(self) -> &'static str;

    /// Look an option up by its wire value.
    fn from_value(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.value() == trimmed)
    }

    /// `(value, label)` pairs in display order.
    fn options() -> Vec<(&'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|option| (option.value(), option.label()))
            .collect()
    }
}

/// Scale factor applied to secondary structure restraint bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lambda {
    #[serde(rename = "0.5")]
    Tenths5,
    #[serde(rename = "0.6")]
    Tenths6,
    #[serde(rename = "0.7")]
    Tenths7,
    #[serde(rename = "0.8")]
    Tenths8,
    #[serde(rename = "0.9")]
    Tenths9,
    #[serde(rename = "1.0")]
    One,
}

impl Default for Lambda {
    fn default() -> Self {
        Lambda::One
    }
}

impl Choice for Lambda {
    const ALL: &'static [Self] = &[
        Lambda::Tenths5,
        Lambda::Tenths6,
        Lambda::Tenths7,
        Lambda::Tenths8,
        Lambda::Tenths9,
        Lambda::One,
    ];

    fn value(self) -> &'static str {
        match self {
            Lambda::Tenths5 => "0.5",
            Lambda::Tenths6 => "0.6",
            Lambda::Tenths7 => "0.7",
            Lambda::Tenths8 => "0.8",
            Lambda::Tenths9 => "0.9",
            Lambda::One => "1.0",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

impl Lambda {
    pub fn factor(self) -> f64 {
        match self {
            Lambda::Tenths5 => 0.5,
            Lambda::Tenths6 => 0.6,
            Lambda::Tenths7 => 0.7,
            Lambda::Tenths8 => 0.8,
            Lambda::Tenths9 => 0.9,
            Lambda::One => 1.0,
        }
    }
}

/// Distance in Angstroms used to detect beta strand pairs in the stage 1 model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetThreshold {
    #[serde(rename = "7.0")]
    Angstrom7_0,
    #[serde(rename = "6.5")]
    Angstrom6_5,
    #[serde(rename = "7.5")]
    Angstrom7_5,
    #[serde(rename = "8.0")]
    Angstrom8_0,
    #[serde(rename = "8.5")]
    Angstrom8_5,
}

impl Default for SheetThreshold {
    fn default() -> Self {
        SheetThreshold::Angstrom7_0
    }
}

impl Choice for SheetThreshold {
    const ALL: &'static [Self] = &[
        SheetThreshold::Angstrom7_0,
        SheetThreshold::Angstrom6_5,
        SheetThreshold::Angstrom7_5,
        SheetThreshold::Angstrom8_0,
        SheetThreshold::Angstrom8_5,
    ];

    fn value(self) -> &'static str {
        match self {
            SheetThreshold::Angstrom7_0 => "7.0",
            SheetThreshold::Angstrom6_5 => "6.5",
            SheetThreshold::Angstrom7_5 => "7.5",
            SheetThreshold::Angstrom8_0 => "8.0",
            SheetThreshold::Angstrom8_5 => "8.5",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

impl SheetThreshold {
    pub fn angstroms(self) -> f64 {
        match self {
            SheetThreshold::Angstrom7_0 => 7.0,
            SheetThreshold::Angstrom6_5 => 6.5,
            SheetThreshold::Angstrom7_5 => 7.5,
            SheetThreshold::Angstrom8_0 => 8.0,
            SheetThreshold::Angstrom8_5 => 8.5,
        }
    }
}

/// Ratio of secondary structure restraint weight to contact restraint weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecondaryWeight {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "0.5")]
    Half,
    #[serde(rename = "0.1")]
    Tenth,
    #[serde(rename = "5")]
    Five,
}

impl Default for SecondaryWeight {
    fn default() -> Self {
        SecondaryWeight::One
    }
}

impl Choice for SecondaryWeight {
    const ALL: &'static [Self] = &[
        SecondaryWeight::One,
        SecondaryWeight::Half,
        SecondaryWeight::Tenth,
        SecondaryWeight::Five,
    ];

    fn value(self) -> &'static str {
        match self {
            SecondaryWeight::One => "1",
            SecondaryWeight::Half => "0.5",
            SecondaryWeight::Tenth => "0.1",
            SecondaryWeight::Five => "5",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

/// How many of the top ranked contacts to keep, as a multiple of sequence length L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactSubset {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "0.4")]
    Top0_4L,
    #[serde(rename = "0.6")]
    Top0_6L,
    #[serde(rename = "0.8")]
    Top0_8L,
    #[serde(rename = "1.0")]
    Top1_0L,
    #[serde(rename = "1.2")]
    Top1_2L,
    #[serde(rename = "1.4")]
    Top1_4L,
    #[serde(rename = "1.6")]
    Top1_6L,
    #[serde(rename = "1.8")]
    Top1_8L,
    #[serde(rename = "2.0")]
    Top2_0L,
    #[serde(rename = "2.2")]
    Top2_2L,
}

impl Default for ContactSubset {
    fn default() -> Self {
        ContactSubset::All
    }
}

impl Choice for ContactSubset {
    const ALL: &'static [Self] = &[
        ContactSubset::All,
        ContactSubset::Top0_4L,
        ContactSubset::Top0_6L,
        ContactSubset::Top0_8L,
        ContactSubset::Top1_0L,
        ContactSubset::Top1_2L,
        ContactSubset::Top1_4L,
        ContactSubset::Top1_6L,
        ContactSubset::Top1_8L,
        ContactSubset::Top2_0L,
        ContactSubset::Top2_2L,
    ];

    fn value(self) -> &'static str {
        match self {
            ContactSubset::All => "all",
            ContactSubset::Top0_4L => "0.4",
            ContactSubset::Top0_6L => "0.6",
            ContactSubset::Top0_8L => "0.8",
            ContactSubset::Top1_0L => "1.0",
            ContactSubset::Top1_2L => "1.2",
            ContactSubset::Top1_4L => "1.4",
            ContactSubset::Top1_6L => "1.6",
            ContactSubset::Top1_8L => "1.8",
            ContactSubset::Top2_0L => "2.0",
            ContactSubset::Top2_2L => "2.2",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ContactSubset::All => "all",
            ContactSubset::Top0_4L => "top-0.4L",
            ContactSubset::Top0_6L => "top-0.6L",
            ContactSubset::Top0_8L => "top-0.8L",
            ContactSubset::Top1_0L => "top-1.0L",
            ContactSubset::Top1_2L => "top-1.2L",
            ContactSubset::Top1_4L => "top-1.4L",
            ContactSubset::Top1_6L => "top-1.6L",
            ContactSubset::Top1_8L => "top-1.8L",
            ContactSubset::Top2_0L => "top-2.0L",
            ContactSubset::Top2_2L => "top-2.2L",
        }
    }
}

impl ContactSubset {
    /// Multiple of L, or `None` when every contact is used.
    pub fn fraction(self) -> Option<f64> {
        match self {
            ContactSubset::All => None,
            other => other.value().parse().ok(),
        }
    }

    /// Number of contacts kept for a sequence of `sequence_length` residues.
    ///
    /// Fractional cutoffs round down, so top-0.4L of 100 residues keeps 40 contacts.
    pub fn cutoff(self, sequence_length: usize, available: usize) -> usize {
        match self.fraction() {
            None => available,
            Some(fraction) => {
                let wanted = (fraction * sequence_length as f64 + 1e-9).floor() as usize;
                wanted.min(available)
            }
        }
    }
}

/// Atom pair the input contact distances refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Cb,
    Ca,
}

impl Default for ContactType {
    fn default() -> Self {
        ContactType::Cb
    }
}

impl Choice for ContactType {
    const ALL: &'static [Self] = &[ContactType::Cb, ContactType::Ca];

    fn value(self) -> &'static str {
        match self {
            ContactType::Cb => "cb",
            ContactType::Ca => "ca",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

/// Weight given to contact restraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactWeight {
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "50")]
    Fifty,
}

impl Default for ContactWeight {
    fn default() -> Self {
        ContactWeight::Ten
    }
}

impl Choice for ContactWeight {
    const ALL: &'static [Self] = &[
        ContactWeight::Ten,
        ContactWeight::One,
        ContactWeight::Five,
        ContactWeight::Fifty,
    ];

    fn value(self) -> &'static str {
        match self {
            ContactWeight::Ten => "10",
            ContactWeight::One => "1",
            ContactWeight::Five => "5",
            ContactWeight::Fifty => "50",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

/// Which refinements the second modeling stage performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage2Mode {
    None,
    SheetDetectOnly,
    ContactFilterOnly,
    Both,
}

impl Default for Stage2Mode {
    fn default() -> Self {
        Stage2Mode::Both
    }
}

impl Choice for Stage2Mode {
    const ALL: &'static [Self] = &[
        Stage2Mode::None,
        Stage2Mode::SheetDetectOnly,
        Stage2Mode::ContactFilterOnly,
        Stage2Mode::Both,
    ];

    fn value(self) -> &'static str {
        match self {
            Stage2Mode::None => "1",
            Stage2Mode::SheetDetectOnly => "2",
            Stage2Mode::ContactFilterOnly => "3",
            Stage2Mode::Both => "4",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Stage2Mode::None => "no stage 2",
            Stage2Mode::SheetDetectOnly => "sheet detect only",
            Stage2Mode::ContactFilterOnly => "contact filter only",
            Stage2Mode::Both => "sheet detect and contact filter",
        }
    }
}

impl Stage2Mode {
    pub fn detects_sheets(self) -> bool {
        matches!(self, Stage2Mode::SheetDetectOnly | Stage2Mode::Both)
    }

    pub fn filters_contacts(self) -> bool {
        matches!(self, Stage2Mode::ContactFilterOnly | Stage2Mode::Both)
    }
}

/// Atom subset used for distance geometry in CNS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AtomScheme {
    Existing,
    ExistingO,
    ExistingOH,
    Backbone,
    BackboneCb,
    BackboneCbH,
    BackboneCbHCg,
}

impl Default for AtomScheme {
    fn default() -> Self {
        AtomScheme::ExistingO
    }
}

impl Choice for AtomScheme {
    const ALL: &'static [Self] = &[
        AtomScheme::ExistingO,
        AtomScheme::Existing,
        AtomScheme::ExistingOH,
        AtomScheme::Backbone,
        AtomScheme::BackboneCb,
        AtomScheme::BackboneCbH,
        AtomScheme::BackboneCbHCg,
    ];

    fn value(self) -> &'static str {
        match self {
            AtomScheme::Existing => "1",
            AtomScheme::ExistingO => "2",
            AtomScheme::ExistingOH => "3",
            AtomScheme::Backbone => "4",
            AtomScheme::BackboneCb => "5",
            AtomScheme::BackboneCbH => "6",
            AtomScheme::BackboneCbHCg => "7",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AtomScheme::Existing => "existing (ca, ha, n, hn, c, cb, cg)",
            AtomScheme::ExistingO => "existing, o",
            AtomScheme::ExistingOH => "existing, o, h",
            AtomScheme::Backbone => "backbone atoms (c, ca, n, o)",
            AtomScheme::BackboneCb => "backbone atoms, cb",
            AtomScheme::BackboneCbH => "backbone atoms, cb, h",
            AtomScheme::BackboneCbHCg => "backbone atoms, cb, h, cg",
        }
    }
}

/// Second repel radius of the CNS DGSA script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepelRadius {
    #[serde(rename = "0.8")]
    R0_80,
    #[serde(rename = "0.85")]
    R0_85,
}

impl Default for RepelRadius {
    fn default() -> Self {
        RepelRadius::R0_80
    }
}

impl Choice for RepelRadius {
    const ALL: &'static [Self] = &[RepelRadius::R0_80, RepelRadius::R0_85];

    fn value(self) -> &'static str {
        match self {
            RepelRadius::R0_80 => "0.8",
            RepelRadius::R0_85 => "0.85",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

macro_rules! display_as_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.value())
                }
            }
        )*
    };
}

display_as_value!(
    Lambda,
    SheetThreshold,
    SecondaryWeight,
    ContactSubset,
    ContactType,
    ContactWeight,
    Stage2Mode,
    AtomScheme,
    RepelRadius,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unique_values<T: Choice + fmt::Debug>() {
        let mut seen = std::collections::HashSet::new();
        for option in T::ALL {
            assert!(
                seen.insert(option.value()),
                "duplicate wire value {:?}",
                option
            );
            assert_eq!(T::from_value(option.value()), Some(*option));
        }
    }

    #[test]
    fn test_wire_values_unique_and_parseable() {
        assert_unique_values::<Lambda>();
        assert_unique_values::<SheetThreshold>();
        assert_unique_values::<SecondaryWeight>();
        assert_unique_values::<ContactSubset>();
        assert_unique_values::<ContactType>();
        assert_unique_values::<ContactWeight>();
        assert_unique_values::<Stage2Mode>();
        assert_unique_values::<AtomScheme>();
        assert_unique_values::<RepelRadius>();
    }

    #[test]
    fn test_defaults_match_documented_values() {
        assert_eq!(Lambda::default().value(), "1.0");
        assert_eq!(SheetThreshold::default().value(), "7.0");
        assert_eq!(SecondaryWeight::default().value(), "1");
        assert_eq!(ContactSubset::default().value(), "all");
        assert_eq!(ContactType::default().value(), "cb");
        assert_eq!(ContactWeight::default().value(), "10");
        assert_eq!(Stage2Mode::default(), Stage2Mode::Both);
        assert_eq!(Stage2Mode::default().value(), "4");
        assert_eq!(AtomScheme::default().value(), "2");
        assert_eq!(RepelRadius::default().value(), "0.8");
    }

    #[test]
    fn test_option_order_follows_form() {
        let lambdas: Vec<_> = Lambda::options().into_iter().map(|(v, _)| v).collect();
        assert_eq!(lambdas, vec!["0.5", "0.6", "0.7", "0.8", "0.9", "1.0"]);

        let schemes: Vec<_> = AtomScheme::options().into_iter().map(|(v, _)| v).collect();
        assert_eq!(schemes, vec!["2", "1", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_from_value_rejects_unknown() {
        assert_eq!(Lambda::from_value("0.4"), None);
        assert_eq!(ContactType::from_value("CB"), None);
        assert_eq!(Stage2Mode::from_value(" 3 "), Some(Stage2Mode::ContactFilterOnly));
    }

    #[test]
    fn test_contact_subset_cutoff() {
        assert_eq!(ContactSubset::All.cutoff(100, 250), 250);
        assert_eq!(ContactSubset::Top0_4L.cutoff(100, 250), 40);
        assert_eq!(ContactSubset::Top2_2L.cutoff(100, 150), 150);
        assert_eq!(ContactSubset::Top0_6L.cutoff(56, 200), 33);
    }

    #[test]
    fn test_stage2_flags() {
        assert!(!Stage2Mode::None.detects_sheets());
        assert!(!Stage2Mode::None.filters_contacts());
        assert!(Stage2Mode::SheetDetectOnly.detects_sheets());
        assert!(Stage2Mode::ContactFilterOnly.filters_contacts());
        assert!(Stage2Mode::Both.detects_sheets() && Stage2Mode::Both.filters_contacts());
    }

    #[test]
    fn test_display_uses_wire_value() {
        assert_eq!(ContactSubset::Top1_2L.to_string(), "1.2");
        assert_eq!(AtomScheme::BackboneCbHCg.to_string(), "7");
    }
}
