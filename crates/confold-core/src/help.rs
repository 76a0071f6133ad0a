//! Parameter help text and tool information.

use crate::form::FieldId;
use serde::Serialize;

pub const DEFAULT_ENDPOINT: &str = "http://protein.rnet.missouri.edu/cgi-bin/confold/main.cgi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HelpTopic {
    /// Short key used on the command line.
    pub key: &'static str,
    pub title: &'static str,
    pub section: &'static str,
    pub field: Option<FieldId>,
    pub lines: &'static [&'static str],
}

impl HelpTopic {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

const JOB_SECTION: &str = "Job Submission";
const SS_SECTION: &str = "Secondary Structure Related Parameters";
const RR_SECTION: &str = "Contact Related Parameters";
const CNS_SECTION: &str = "CONFOLD and CNS Parameters";

pub const HELP_TOPICS: &[HelpTopic] = &[
    HelpTopic {
        key: "job",
        title: "Job Submission",
        section: JOB_SECTION,
        field: None,
        lines: &[
            "After you submit your job, open the job log history and find your input at the end of the file to make sure the job was submitted.",
            "Your job folder can be browsed online at the location shown on the page opened after submission; the URL is also in the e-mail sent to you.",
            "Refresh the folder and check that files are being created.",
        ],
    },
    HelpTopic {
        key: "lambda",
        title: "Lambda",
        section: SS_SECTION,
        field: Some(FieldId::Lambda),
        lines: &[
            "Lambda is the parameter to loosen the secondary structure restraints.",
            "The upper bounds and lower bounds of all secondary structure restraints are multiplied by lambda.",
        ],
    },
    HelpTopic {
        key: "sheet-threshold",
        title: "Sheet-detection threshold",
        section: SS_SECTION,
        field: Some(FieldId::SheetThreshold),
        lines: &[
            "How far to go to detect beta strand pairs in stage 1 model? (distance in Angstroms)",
            "Selecting a lower value like 6.5 will pair really close strands.",
            "Selecting a high value like 8.5 will pair many strands, possibly false positives.",
            "Default value of 7.0 works best for true as well as predicted contacts.",
        ],
    },
    HelpTopic {
        key: "sec-wt",
        title: "Restraints Weight",
        section: SS_SECTION,
        field: Some(FieldId::SecondaryWeight),
        lines: &[
            "This value controls the ratio of contact restraints and secondary structure restraints weight.",
            "For example, selecting 0.5 sets half of contact restraints weight to secondary structure restraints.",
        ],
    },
    HelpTopic {
        key: "pairing",
        title: "Pairing Information :: Pairing File Format",
        section: SS_SECTION,
        field: Some(FieldId::Pairing),
        lines: &[
            "6 columns a, b, c, d, t, and f in each row",
            "a-b and c-d are residue strands, for example 2-7 and 20-25",
            "t is the pairing type (A or P), and f is the confidence of pairing",
            "a must always be less than b",
            "c must be less than d if parallel and greater than d if anti-parallel",
        ],
    },
    HelpTopic {
        key: "rr",
        title: "Contacts",
        section: RR_SECTION,
        field: Some(FieldId::Contacts),
        lines: &[
            "Contacts in CASP RR format.",
            "Must be sorted by confidence (highest conf on top).",
        ],
    },
    HelpTopic {
        key: "rr-subset",
        title: "Select top-xL Contacts",
        section: RR_SECTION,
        field: Some(FieldId::ContactSubset),
        lines: &[
            "How many contacts should be used as restraints?",
            "For example, selecting top-0.4L will use only top-40 contacts if the sequence is 100 residues long.",
        ],
    },
    HelpTopic {
        key: "rr-type",
        title: "Contact Type",
        section: RR_SECTION,
        field: Some(FieldId::ContactType),
        lines: &[
            "Select cb if the input contacts are between Carbon-beta atoms of the residues in contact, otherwise select ca.",
        ],
    },
    HelpTopic {
        key: "con-wt",
        title: "Contact Restraints Weight",
        section: RR_SECTION,
        field: Some(FieldId::ContactWeight),
        lines: &["Weight given to the contact restraints."],
    },
    HelpTopic {
        key: "stage2",
        title: "Run Stage2 Flag",
        section: CNS_SECTION,
        field: Some(FieldId::Stage2),
        lines: &[
            "How to build models in the second stage?",
            "no stage 2 - don't run stage 2 at all (reduces the execution time by half)",
            "sheet detect - detect beta-strand pairings but don't filter any unsatisfied contacts",
            "contact filter - filter any unsatisfied contacts but don't detect strand pairings",
            "both - filter any unsatisfied contacts and detect beta-pairings",
        ],
    },
    HelpTopic {
        key: "atom-scheme",
        title: "Atom Selection Scheme",
        section: CNS_SECTION,
        field: Some(FieldId::AtomScheme),
        lines: &[
            "What atoms to use for distance geometry?",
            "'existing' refers to the existing list of atoms in the CNS suite.",
        ],
    },
    HelpTopic {
        key: "rep2",
        title: "Second Repel Radius",
        section: CNS_SECTION,
        field: Some(FieldId::RepelRadius),
        lines: &[
            "Second repel radius in the CNS DGSA script.",
            "Default value of 0.8 usually gives best results.",
        ],
    },
];

pub fn find_topic(key: &str) -> Option<&'static HelpTopic> {
    let wanted = key.trim().to_ascii_lowercase();
    HELP_TOPICS.iter().find(|topic| {
        topic.key == wanted || topic.field.is_some_and(|field| field.form_name() == wanted)
    })
}

pub fn topic_for_field(field: FieldId) -> Option<&'static HelpTopic> {
    HELP_TOPICS.iter().find(|topic| topic.field == Some(field))
}

/// Hover text for a field, taken from its help topic.
pub fn tooltip_for(field: FieldId) -> Option<String> {
    topic_for_field(field).map(HelpTopic::text)
}

/// Static facts shown on the tool information page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    pub download_url: &'static str,
    pub assessment_tip: &'static str,
    pub assessment_url: &'static str,
    pub execution_time_chart_url: &'static str,
    pub history_log_url: &'static str,
}

pub const TOOL_INFO: ToolInfo = ToolInfo {
    download_url: "https://github.com/multicom-toolbox/CONFOLD",
    assessment_tip: "Before building models from predicted contacts, assess the contacts with a contact assessment tool such as CONASSESS.",
    assessment_url: "http://sysbio.rnet.missouri.edu/conassess/",
    execution_time_chart_url: "http://protein.rnet.missouri.edu/confold/exec_time.png",
    history_log_url: "http://protein.rnet.missouri.edu/confold/logs/history.log",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldGroup;

    #[test]
    fn test_every_advanced_field_has_a_tooltip() {
        for group in FieldGroup::ALL {
            for field in group.fields() {
                assert!(tooltip_for(*field).is_some(), "{field:?}");
            }
        }
        assert!(tooltip_for(FieldId::Contacts).is_some());
        assert!(tooltip_for(FieldId::Email).is_none());
    }

    #[test]
    fn test_find_topic_by_key_or_form_name() {
        assert_eq!(find_topic("stage2").unwrap().title, "Run Stage2 Flag");
        assert_eq!(find_topic("SEC_WT").unwrap().key, "sec-wt");
        assert_eq!(find_topic(" rr ").unwrap().field, Some(FieldId::Contacts));
        assert!(find_topic("unknown").is_none());
    }

    #[test]
    fn test_topic_keys_unique() {
        let mut keys: Vec<_> = HELP_TOPICS.iter().map(|t| t.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), HELP_TOPICS.len());
    }

    #[test]
    fn test_pairing_help_states_orientation_rule() {
        let text = topic_for_field(FieldId::Pairing).unwrap().text();
        assert!(text.contains("c must be less than d if parallel"));
    }
}
