//! Reading CASP RR contact lists for advisory summaries.
//!
//! The contact text is always submitted untouched; this module only counts
//! rows, checks the confidence ordering and works out top-xL cutoffs.

use crate::options::ContactSubset;
use serde::Serialize;

const HEADER_KEYWORDS: &[&str] = &[
    "PFRMAT", "TARGET", "AUTHOR", "METHOD", "MODEL", "REMARK", "END",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contact {
    pub i: u32,
    pub j: u32,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub confidence: f64,
}

/// A line that looked like a contact row but could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedLine {
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMap {
    /// Sequence carried in the header, if any.
    pub sequence: Option<String>,
    pub contacts: Vec<Contact>,
    pub rejected: Vec<RejectedLine>,
}

impl ContactMap {
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// 1-based line offsets (in contact order) where confidence increases.
    pub fn unsorted_positions(&self) -> Vec<usize> {
        self.contacts
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1].confidence > pair[0].confidence)
            .map(|(index, _)| index + 2)
            .collect()
    }

    pub fn is_sorted_by_confidence(&self) -> bool {
        self.unsorted_positions().is_empty()
    }

    /// Contacts the backend keeps for a given subset and sequence length.
    pub fn selected(&self, subset: ContactSubset, sequence_length: usize) -> &[Contact] {
        let count = subset.cutoff(sequence_length, self.contacts.len());
        &self.contacts[..count]
    }
}

/// Parse RR text leniently: header lines and the leading sequence line are skipped.
pub fn parse_contacts(text: &str) -> ContactMap {
    let mut sequence: Option<String> = None;
    let mut contacts = Vec::new();
    let mut rejected = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let first = line.split_whitespace().next().unwrap_or_default();
        if HEADER_KEYWORDS
            .iter()
            .any(|keyword| first.eq_ignore_ascii_case(keyword))
        {
            continue;
        }

        if line.chars().all(|ch| ch.is_ascii_alphabetic()) {
            sequence
                .get_or_insert_with(String::new)
                .push_str(&line.to_ascii_uppercase());
            continue;
        }

        match parse_row(line) {
            Some(contact) => contacts.push(contact),
            None => rejected.push(RejectedLine {
                line: index + 1,
                text: line.to_string(),
            }),
        }
    }

    ContactMap {
        sequence,
        contacts,
        rejected,
    }
}

fn parse_row(line: &str) -> Option<Contact> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    let (i, j) = (
        columns.first()?.parse::<u32>().ok()?,
        columns.get(1)?.parse::<u32>().ok()?,
    );

    let numbers = |slice: &[&str]| -> Option<Vec<f64>> {
        slice
            .iter()
            .map(|value| value.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect()
    };

    match columns.len() {
        3 => {
            let values = numbers(&columns[2..])?;
            Some(Contact {
                i,
                j,
                lower: None,
                upper: None,
                confidence: values[0],
            })
        }
        5 => {
            let values = numbers(&columns[2..])?;
            Some(Contact {
                i,
                j,
                lower: Some(values[0]),
                upper: Some(values[1]),
                confidence: values[2],
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_five_and_three_column_rows() {
        let map = parse_contacts("1 10 0 8 0.9\n2 12 0.7\n");
        assert_eq!(map.contacts.len(), 2);
        assert_eq!(map.contacts[0].upper, Some(8.0));
        assert_eq!(map.contacts[1].lower, None);
        assert_eq!(map.contacts[1].confidence, 0.7);
        assert!(map.rejected.is_empty());
    }

    #[test]
    fn test_skips_headers_and_collects_sequence() {
        let text = "PFRMAT RR\nTARGET T0001\nNLYIQWLKDG\nGPSSGRPPPS\n3 19 0 8 0.8\nEND\n";
        let map = parse_contacts(text);
        assert_eq!(map.sequence.as_deref(), Some("NLYIQWLKDGGPSSGRPPPS"));
        assert_eq!(map.contacts.len(), 1);
    }

    #[test]
    fn test_rejects_malformed_rows_with_line_number() {
        let map = parse_contacts("1 10 0 8 0.9\n1 x 0 8 0.5\n4 5\n");
        assert_eq!(map.contacts.len(), 1);
        let lines: Vec<_> = map.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_detects_unsorted_confidence() {
        let sorted = parse_contacts("1 10 0 8 0.9\n2 11 0 8 0.9\n3 12 0 8 0.4\n");
        assert!(sorted.is_sorted_by_confidence());

        let unsorted = parse_contacts("1 10 0 8 0.5\n2 11 0 8 0.9\n3 12 0 8 0.4\n");
        assert_eq!(unsorted.unsorted_positions(), vec![2]);
    }

    #[test]
    fn test_selected_honours_subset() {
        let rows: String = (0..30)
            .map(|k| format!("{} {} 0 8 {:.2}\n", k + 1, k + 10, 1.0 - k as f64 * 0.01))
            .collect();
        let map = parse_contacts(&rows);
        assert_eq!(map.selected(ContactSubset::All, 20).len(), 30);
        assert_eq!(map.selected(ContactSubset::Top0_4L, 20).len(), 8);
        assert_eq!(map.selected(ContactSubset::Top2_2L, 20).len(), 30);
    }
}
