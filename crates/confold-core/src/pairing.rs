//! Beta-strand pairing records.
//!
//! One record per line, six whitespace separated columns `a b c d t f`:
//! strands `a-b` and `c-d`, pairing type `t` (`A` or `P`) and confidence `f`.
//! `a` is always below `b`; `c` is below `d` for parallel pairs and above it for
//! anti-parallel ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairingType {
    #[serde(rename = "P")]
    Parallel,
    #[serde(rename = "A")]
    AntiParallel,
}

impl PairingType {
    pub fn code(self) -> char {
        match self {
            PairingType::Parallel => 'P',
            PairingType::AntiParallel => 'A',
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            PairingType::Parallel => "parallel",
            PairingType::AntiParallel => "anti-parallel",
        }
    }
}

impl fmt::Display for PairingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrandPairing {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
    pub pairing_type: PairingType,
    pub confidence: f64,
}

impl StrandPairing {
    /// Residue count of the first strand.
    pub fn first_strand_len(&self) -> u64 {
        self.a.abs_diff(self.b).saturating_add(1)
    }

    /// Residue count of the second strand, regardless of orientation.
    pub fn second_strand_len(&self) -> u64 {
        self.c.abs_diff(self.d).saturating_add(1)
    }
}

impl fmt::Display for StrandPairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.a, self.b, self.c, self.d, self.pairing_type, self.confidence
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PairingError {
    #[error("line {line}: expected 6 columns (a b c d t f), found {found}")]
    ColumnCount { line: usize, found: usize },
    #[error("line {line}: column {column} '{value}' is not an integer residue number")]
    InvalidResidue {
        line: usize,
        column: char,
        value: String,
    },
    #[error("line {line}: pairing type '{value}' must be A or P")]
    InvalidType { line: usize, value: String },
    #[error("line {line}: confidence '{value}' is not a number")]
    InvalidConfidence { line: usize, value: String },
    #[error("line {line}: a ({a}) must be less than b ({b})")]
    StrandOrder { line: usize, a: i64, b: i64 },
    #[error("line {line}: c ({c}) must be {expected} d ({d}) for {pairing_type} pairing")]
    Orientation {
        line: usize,
        c: i64,
        d: i64,
        pairing_type: PairingType,
        expected: &'static str,
    },
}

impl PairingError {
    pub fn line(&self) -> usize {
        match self {
            PairingError::ColumnCount { line, .. }
            | PairingError::InvalidResidue { line, .. }
            | PairingError::InvalidType { line, .. }
            | PairingError::InvalidConfidence { line, .. }
            | PairingError::StrandOrder { line, .. }
            | PairingError::Orientation { line, .. } => *line,
        }
    }
}

/// Parse a single record; `line` is only used to label errors.
pub fn parse_line(text: &str, line: usize) -> Result<StrandPairing, PairingError> {
    let columns: Vec<&str> = text.split_whitespace().collect();
    if columns.len() != 6 {
        return Err(PairingError::ColumnCount {
            line,
            found: columns.len(),
        });
    }

    let residue = |index: usize, column: char| -> Result<i64, PairingError> {
        columns[index]
            .parse::<i64>()
            .map_err(|_| PairingError::InvalidResidue {
                line,
                column,
                value: columns[index].to_string(),
            })
    };

    let a = residue(0, 'a')?;
    let b = residue(1, 'b')?;
    let c = residue(2, 'c')?;
    let d = residue(3, 'd')?;

    let pairing_type = match columns[4] {
        "P" | "p" => PairingType::Parallel,
        "A" | "a" => PairingType::AntiParallel,
        other => {
            return Err(PairingError::InvalidType {
                line,
                value: other.to_string(),
            });
        }
    };

    let confidence = columns[5]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| PairingError::InvalidConfidence {
            line,
            value: columns[5].to_string(),
        })?;

    if a >= b {
        return Err(PairingError::StrandOrder { line, a, b });
    }

    match pairing_type {
        PairingType::Parallel if c >= d => {
            return Err(PairingError::Orientation {
                line,
                c,
                d,
                pairing_type,
                expected: "less than",
            });
        }
        PairingType::AntiParallel if c <= d => {
            return Err(PairingError::Orientation {
                line,
                c,
                d,
                pairing_type,
                expected: "greater than",
            });
        }
        _ => {}
    }

    Ok(StrandPairing {
        a,
        b,
        c,
        d,
        pairing_type,
        confidence,
    })
}

/// Parse a whole pairing file, skipping blank lines. Stops at the first bad record.
pub fn parse_pairings(text: &str) -> Result<Vec<StrandPairing>, PairingError> {
    let mut records = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        records.push(parse_line(raw, index + 1)?);
    }
    Ok(records)
}

/// Parse every line and collect all failures instead of stopping at the first.
pub fn check_pairings(text: &str) -> (Vec<StrandPairing>, Vec<PairingError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        match parse_line(raw, index + 1) {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }
    (records, errors)
}

impl FromStr for StrandPairing {
    type Err = PairingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s, 1)
    }
}
