//! Form controller shared by the CLI and GUI front-ends.
//!
//! Holds the field values together with the collapsed/expanded state of each
//! advanced-option group. Visibility never affects what gets submitted.

use crate::form::{FieldGroup, FieldId, FieldKind, SubmissionForm};
use crate::help::tooltip_for;
use crate::presets::ExamplePreset;
use crate::validation::{ValidationReport, validate};
use std::collections::BTreeMap;
use tracing::debug;

/// Expanded flag per advanced-option group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupVisibility {
    expanded: BTreeMap<FieldGroup, bool>,
}

impl Default for GroupVisibility {
    fn default() -> Self {
        Self {
            expanded: FieldGroup::ALL.iter().map(|group| (*group, false)).collect(),
        }
    }
}

impl GroupVisibility {
    pub fn is_expanded(&self, group: FieldGroup) -> bool {
        self.expanded.get(&group).copied().unwrap_or(false)
    }

    /// Flip one group and return its new state.
    pub fn toggle(&mut self, group: FieldGroup) -> bool {
        let entry = self.expanded.entry(group).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn is_visible(&self, field: FieldId) -> bool {
        field.group().is_none_or(|group| self.is_expanded(group))
    }
}

/// One field as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub id: FieldId,
    pub name: &'static str,
    pub label: &'static str,
    pub tooltip: Option<String>,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    pub visible: bool,
    pub options: Vec<(&'static str, &'static str)>,
}

/// A block of the form, optionally ending with a group toggle link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: &'static str,
    pub fields: Vec<FieldView>,
    pub toggle: Option<GroupToggleView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupToggleView {
    pub group: FieldGroup,
    pub label: &'static str,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub sections: Vec<SectionView>,
}

impl FormView {
    pub fn field(&self, id: FieldId) -> Option<&FieldView> {
        self.sections
            .iter()
            .flat_map(|section| section.fields.iter())
            .find(|field| field.id == id)
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldView> {
        self.sections
            .iter()
            .flat_map(|section| section.fields.iter())
            .filter(|field| field.visible)
    }
}

struct SectionLayout {
    title: &'static str,
    fields: &'static [FieldId],
    toggle: Option<FieldGroup>,
}

const LAYOUT: &[SectionLayout] = &[
    SectionLayout {
        title: "Job",
        fields: &[FieldId::Email, FieldId::JobId, FieldId::Sequence],
        toggle: None,
    },
    SectionLayout {
        title: "Secondary Structure",
        fields: &[
            FieldId::SecondaryStructure,
            FieldId::Lambda,
            FieldId::SheetThreshold,
            FieldId::SecondaryWeight,
            FieldId::Pairing,
        ],
        toggle: Some(FieldGroup::SecondaryStructure),
    },
    SectionLayout {
        title: "Contacts",
        fields: &[
            FieldId::Contacts,
            FieldId::ContactSubset,
            FieldId::ContactType,
            FieldId::ContactWeight,
        ],
        toggle: Some(FieldGroup::Contacts),
    },
    SectionLayout {
        title: "CONFOLD and CNS",
        fields: &[FieldId::Stage2, FieldId::AtomScheme, FieldId::RepelRadius],
        toggle: Some(FieldGroup::Cns),
    },
];

/// Values plus group visibility for one form session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    pub form: SubmissionForm,
    pub visibility: GroupVisibility,
}

impl FormController {
    /// Fresh form: defaults everywhere and every group collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self) -> FormView {
        let sections = LAYOUT
            .iter()
            .map(|layout| SectionView {
                title: layout.title,
                fields: layout
                    .fields
                    .iter()
                    .map(|field| self.field_view(*field))
                    .collect(),
                toggle: layout.toggle.map(|group| GroupToggleView {
                    group,
                    label: group.toggle_label(),
                    expanded: self.visibility.is_expanded(group),
                }),
            })
            .collect();
        FormView { sections }
    }

    fn field_view(&self, id: FieldId) -> FieldView {
        FieldView {
            id,
            name: id.form_name(),
            label: id.label(),
            tooltip: tooltip_for(id),
            kind: id.kind(),
            value: self.form.value(id),
            required: id.required(),
            visible: self.visibility.is_visible(id),
            options: id.options(),
        }
    }

    /// Expand or collapse one group. Values are untouched.
    pub fn toggle_group(&mut self, group: FieldGroup) -> bool {
        let expanded = self.visibility.toggle(group);
        debug!(group = group.id(), expanded, "Toggled option group");
        expanded
    }

    /// Replace every value with the example's values.
    pub fn fill_example(&mut self, preset: ExamplePreset) {
        self.form = preset.form();
        debug!(preset = preset.name(), "Filled form from example");
    }

    /// Back to the state of a fresh render, groups collapsed.
    pub fn clear_form(&mut self) {
        *self = Self::new();
        debug!("Cleared form");
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{
        ContactSubset, ContactType, ContactWeight, Lambda, RepelRadius, SecondaryWeight,
        SheetThreshold, Stage2Mode,
    };

    #[test]
    fn test_render_defaults() {
        let controller = FormController::new();
        let view = controller.render();

        let value = |id| view.field(id).unwrap().value.clone();
        assert_eq!(value(FieldId::Lambda), "1.0");
        assert_eq!(value(FieldId::SheetThreshold), "7.0");
        assert_eq!(value(FieldId::SecondaryWeight), "1");
        assert_eq!(value(FieldId::ContactSubset), "all");
        assert_eq!(value(FieldId::ContactType), "cb");
        assert_eq!(value(FieldId::ContactWeight), "10");
        assert_eq!(value(FieldId::Stage2), "4");
        assert_eq!(value(FieldId::RepelRadius), "0.8");

        let form = &controller.form;
        assert_eq!(form.lambda, Lambda::One);
        assert_eq!(form.sheet_threshold, SheetThreshold::Angstrom7_0);
        assert_eq!(form.secondary_weight, SecondaryWeight::One);
        assert_eq!(form.contact_subset, ContactSubset::All);
        assert_eq!(form.contact_type, ContactType::Cb);
        assert_eq!(form.contact_weight, ContactWeight::Ten);
        assert_eq!(form.stage2, Stage2Mode::Both);
        assert_eq!(form.repel_radius, RepelRadius::R0_80);
    }

    #[test]
    fn test_render_collapses_every_group() {
        let view = FormController::new().render();
        for group in FieldGroup::ALL {
            for field in group.fields() {
                assert!(!view.field(*field).unwrap().visible, "{field:?}");
            }
        }
        let visible: Vec<_> = view.visible_fields().map(|f| f.id).collect();
        assert_eq!(
            visible,
            vec![
                FieldId::Email,
                FieldId::JobId,
                FieldId::Sequence,
                FieldId::SecondaryStructure,
                FieldId::Contacts,
            ]
        );
    }

    #[test]
    fn test_render_lists_every_field_once() {
        let view = FormController::new().render();
        let mut ids: Vec<_> = view
            .sections
            .iter()
            .flat_map(|s| s.fields.iter().map(|f| f.id))
            .collect();
        ids.sort();
        assert_eq!(ids, FieldId::ALL.to_vec());
    }

    #[test]
    fn test_toggle_twice_restores_visibility_and_keeps_values() {
        let mut controller = FormController::new();
        controller.fill_example(ExamplePreset::PredictedContacts);
        let before = controller.render();

        for group in FieldGroup::ALL {
            assert!(controller.toggle_group(group));
            let expanded = controller.render();
            for field in group.fields() {
                assert!(expanded.field(*field).unwrap().visible);
            }
            assert!(!controller.toggle_group(group));
        }

        assert_eq!(controller.render(), before);
        assert_eq!(controller.form, ExamplePreset::PredictedContacts.form());
    }

    #[test]
    fn test_groups_toggle_independently() {
        let mut controller = FormController::new();
        controller.toggle_group(FieldGroup::Contacts);
        assert!(controller.visibility.is_expanded(FieldGroup::Contacts));
        assert!(!controller.visibility.is_expanded(FieldGroup::SecondaryStructure));
        assert!(!controller.visibility.is_expanded(FieldGroup::Cns));
    }

    #[test]
    fn test_fill_example_replaces_rather_than_merges() {
        let mut controller = FormController::new();
        controller.form.email = "me@example.org".to_string();
        controller.form.pairing = "2 7 20 25 P 0.9".to_string();
        controller.form.lambda = Lambda::Tenths5;

        controller.fill_example(ExamplePreset::Test);
        assert!(controller.form.email.is_empty());
        assert!(controller.form.pairing.is_empty());
        assert_eq!(controller.form.lambda, Lambda::One);
        assert_eq!(controller.form.sequence, crate::presets::TRP_CAGE_SEQUENCE);

        controller.fill_example(ExamplePreset::PredictedContacts);
        assert_eq!(controller.form.pairing, crate::presets::GB1_PAIRING);
        assert_eq!(controller.form.contact_subset, ContactSubset::Top1_0L);

        for preset in ExamplePreset::ALL {
            controller.fill_example(preset);
            assert_eq!(controller.form, preset.form());
        }
    }

    #[test]
    fn test_clear_matches_fresh_render() {
        let initial = FormController::new().render();

        let mut controller = FormController::new();
        controller.fill_example(ExamplePreset::TrueContacts);
        controller.toggle_group(FieldGroup::Cns);
        controller.form.email = "me@example.org".to_string();
        controller.clear_form();

        assert_eq!(controller.render(), initial);
        controller.clear_form();
        assert_eq!(controller.render(), initial);
    }

    #[test]
    fn test_hidden_fields_keep_tooltips_and_options() {
        let view = FormController::new().render();
        let stage2 = view.field(FieldId::Stage2).unwrap();
        assert_eq!(stage2.options.len(), 4);
        assert!(stage2.tooltip.as_deref().unwrap().contains("second stage"));
        let section = view
            .sections
            .iter()
            .find(|s| s.toggle.as_ref().map(|t| t.group) == Some(FieldGroup::Cns))
            .unwrap();
        assert_eq!(section.toggle.as_ref().unwrap().label, "more options");
    }
}
