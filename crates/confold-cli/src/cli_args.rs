use std::fs;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use confold_core::options::{
    AtomScheme, ContactSubset, ContactType, ContactWeight, Lambda, RepelRadius, SecondaryWeight,
    SheetThreshold, Stage2Mode,
};
use confold_core::{Choice, ExamplePreset, SubmissionForm};

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "confold",
    version,
    about = "Submit protein structure folding jobs to a CONFOLD server",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Read settings from this config.toml instead of the default location.
    #[arg(long, global = true, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fill the form from flags and files, check it and post it.
    Submit(SubmitArgs),
    /// Print one of the built-in example jobs.
    Example(ExampleArgs),
    /// Check a strand pairing file.
    CheckPairing(CheckPairingArgs),
    /// Summarise a CASP RR contact file.
    #[command(alias = "check-contacts")]
    CheckRr(CheckRrArgs),
    /// Show parameter help; lists topics when none is given.
    Help(HelpArgs),
    /// Show tool information: download, contact assessment and job logs.
    About,
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Configuration file subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the path of config.toml.
    Path,
    /// Print the effective configuration.
    Show,
}

fn example_number(value: &str) -> Result<ExamplePreset, String> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(ExamplePreset::from_number)
        .ok_or_else(|| format!("'{value}' is not an example number (expected 1, 2 or 3)"))
}

fn choice<T: Choice>(value: &str) -> Result<T, String> {
    T::from_value(value).ok_or_else(|| {
        let expected: Vec<_> = T::ALL.iter().map(|option| option.value()).collect();
        format!("expected one of: {}", expected.join(", "))
    })
}

/// Arguments for `submit`.
#[derive(Debug, Clone, Args, Default)]
pub struct SubmitArgs {
    /// Start from an example job (1, 2 or 3) and override it with other flags.
    #[arg(long, value_name = "N", value_parser = example_number)]
    pub example: Option<ExamplePreset>,

    /// E-mail address that receives the results.
    #[arg(long)]
    pub email: Option<String>,

    /// Job id.
    #[arg(long)]
    pub id: Option<String>,

    /// Protein sequence.
    #[arg(long, conflicts_with = "sequence_file")]
    pub sequence: Option<String>,

    /// Read the sequence from a file (FASTA headers are kept as-is).
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub sequence_file: Option<PathBuf>,

    /// Secondary structure string (H, E, C).
    #[arg(long, conflicts_with = "ss_file")]
    pub ss: Option<String>,

    #[arg(long, value_hint = ValueHint::FilePath)]
    pub ss_file: Option<PathBuf>,

    /// Strand pairing records.
    #[arg(long, conflicts_with = "pairing_file")]
    pub pairing: Option<String>,

    #[arg(long, value_hint = ValueHint::FilePath)]
    pub pairing_file: Option<PathBuf>,

    /// Contacts in CASP RR format.
    #[arg(long, conflicts_with = "rr_file")]
    pub rr: Option<String>,

    #[arg(long, value_hint = ValueHint::FilePath)]
    pub rr_file: Option<PathBuf>,

    #[arg(long, value_parser = choice::<Lambda>)]
    pub lambda: Option<Lambda>,

    #[arg(long, value_parser = choice::<SheetThreshold>)]
    pub sheet_threshold: Option<SheetThreshold>,

    #[arg(long, value_parser = choice::<SecondaryWeight>)]
    pub sec_wt: Option<SecondaryWeight>,

    #[arg(long, value_parser = choice::<ContactSubset>)]
    pub rr_subset: Option<ContactSubset>,

    #[arg(long, value_parser = choice::<ContactType>)]
    pub rr_type: Option<ContactType>,

    #[arg(long, value_parser = choice::<ContactWeight>)]
    pub con_wt: Option<ContactWeight>,

    /// Second stage mode: 1 none, 2 sheet detect, 3 contact filter, 4 both.
    #[arg(long, value_parser = choice::<Stage2Mode>)]
    pub stage2: Option<Stage2Mode>,

    #[arg(long, value_parser = choice::<AtomScheme>)]
    pub atom_scheme: Option<AtomScheme>,

    #[arg(long, value_parser = choice::<RepelRadius>)]
    pub rep2: Option<RepelRadius>,

    /// Override the configured endpoint URL.
    #[arg(long, value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,

    /// Print the request instead of sending it.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Print the filled form as JSON instead of sending it.
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "dry_run")]
    pub json: bool,

    /// Save the response body to this file.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

impl SubmitArgs {
    /// Build the form: the example (or defaults) first, then every flag given.
    pub fn to_form(&self) -> Result<SubmissionForm, String> {
        let mut form = self
            .example
            .map(ExamplePreset::form)
            .unwrap_or_default();

        if let Some(email) = &self.email {
            form.email = email.clone();
        }
        if let Some(id) = &self.id {
            form.job_id = id.clone();
        }
        if let Some(text) = text_or_file(&self.sequence, &self.sequence_file)? {
            form.sequence = text;
        }
        if let Some(text) = text_or_file(&self.ss, &self.ss_file)? {
            form.secondary_structure = text;
        }
        if let Some(text) = text_or_file(&self.pairing, &self.pairing_file)? {
            form.pairing = text;
        }
        if let Some(text) = text_or_file(&self.rr, &self.rr_file)? {
            form.contacts = text;
        }

        if let Some(value) = self.lambda {
            form.lambda = value;
        }
        if let Some(value) = self.sheet_threshold {
            form.sheet_threshold = value;
        }
        if let Some(value) = self.sec_wt {
            form.secondary_weight = value;
        }
        if let Some(value) = self.rr_subset {
            form.contact_subset = value;
        }
        if let Some(value) = self.rr_type {
            form.contact_type = value;
        }
        if let Some(value) = self.con_wt {
            form.contact_weight = value;
        }
        if let Some(value) = self.stage2 {
            form.stage2 = value;
        }
        if let Some(value) = self.atom_scheme {
            form.atom_scheme = value;
        }
        if let Some(value) = self.rep2 {
            form.repel_radius = value;
        }

        Ok(form)
    }
}

fn text_or_file(text: &Option<String>, file: &Option<PathBuf>) -> Result<Option<String>, String> {
    match (text, file) {
        (Some(text), _) => Ok(Some(text.clone())),
        (None, Some(path)) => fs::read_to_string(path)
            .map(Some)
            .map_err(|err| format!("Failed to read {}: {err}", path.display())),
        (None, None) => Ok(None),
    }
}

/// Arguments for `example`.
#[derive(Debug, Clone, Args)]
pub struct ExampleArgs {
    /// Example number (1, 2 or 3).
    #[arg(value_parser = example_number)]
    pub number: ExamplePreset,

    /// Print as JSON.
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,
}

/// Arguments for `check-pairing`.
#[derive(Debug, Clone, Args)]
pub struct CheckPairingArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
}

/// Arguments for `check-rr`.
#[derive(Debug, Clone, Args)]
pub struct CheckRrArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Sequence length L; defaults to the sequence line in the file.
    #[arg(long, value_name = "L")]
    pub length: Option<usize>,

    /// Report how many contacts this top-xL selection keeps.
    #[arg(long, value_parser = choice::<ContactSubset>, default_value = "all")]
    pub subset: ContactSubset,
}

/// Arguments for `help`.
#[derive(Debug, Clone, Args)]
pub struct HelpArgs {
    /// Topic key or form field name, e.g. `stage2` or `rr_subset`.
    pub topic: Option<String>,
}
