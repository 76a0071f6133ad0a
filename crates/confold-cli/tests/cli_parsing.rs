use clap::Parser;
use confold_cli::{Cli, Command, ConfigCommand};
use confold_core::options::{ContactSubset, ContactType, Lambda, RepelRadius, Stage2Mode};
use confold_core::{ExamplePreset, SubmissionForm};
use std::fs;
use tempfile::tempdir;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("confold").chain(args.iter().copied()))
        .expect("arguments should parse")
}

fn submit_form(args: &[&str]) -> SubmissionForm {
    match parse(args).command {
        Command::Submit(submit) => submit.to_form().expect("form"),
        other => panic!("expected submit, got {other:?}"),
    }
}

#[test]
fn test_submit_without_flags_uses_defaults() {
    assert_eq!(submit_form(&["submit"]), SubmissionForm::default());
}

#[test]
fn test_submit_flags_map_to_form_values() {
    let form = submit_form(&[
        "submit",
        "--email",
        "me@example.org",
        "--id",
        "run42",
        "--sequence",
        "MKV",
        "--rr",
        "1 3 0 8 0.9",
        "--lambda",
        "0.8",
        "--rr-subset",
        "1.4",
        "--rr-type",
        "ca",
        "--stage2",
        "2",
        "--rep2",
        "0.85",
    ]);

    assert_eq!(form.email, "me@example.org");
    assert_eq!(form.job_id, "run42");
    assert_eq!(form.sequence, "MKV");
    assert_eq!(form.contacts, "1 3 0 8 0.9");
    assert_eq!(form.lambda, Lambda::Tenths8);
    assert_eq!(form.contact_subset, ContactSubset::Top1_4L);
    assert_eq!(form.contact_type, ContactType::Ca);
    assert_eq!(form.stage2, Stage2Mode::SheetDetectOnly);
    assert_eq!(form.repel_radius, RepelRadius::R0_85);
}

#[test]
fn test_example_is_overridden_by_flags() {
    let form = submit_form(&["submit", "--example", "3", "--email", "me@example.org"]);
    let mut expected = ExamplePreset::PredictedContacts.form();
    expected.email = "me@example.org".to_string();
    assert_eq!(form, expected);
}

#[test]
fn test_files_are_read_into_text_fields() {
    let dir = tempdir().unwrap();
    let rr = dir.path().join("contacts.rr");
    let pairing = dir.path().join("pairing.txt");
    fs::write(&rr, "MKV\n1 3 0 8 0.9\n").unwrap();
    fs::write(&pairing, "2 7 20 25 P 0.9\n").unwrap();

    let form = submit_form(&[
        "submit",
        "--rr-file",
        rr.to_str().unwrap(),
        "--pairing-file",
        pairing.to_str().unwrap(),
    ]);
    assert_eq!(form.contacts, "MKV\n1 3 0 8 0.9\n");
    assert_eq!(form.pairing, "2 7 20 25 P 0.9\n");
}

#[test]
fn test_missing_file_is_reported() {
    let cli = parse(&["submit", "--sequence-file", "/nonexistent/seq.fasta"]);
    let Command::Submit(submit) = cli.command else {
        panic!("expected submit");
    };
    let err = submit.to_form().unwrap_err();
    assert!(err.contains("/nonexistent/seq.fasta"));
}

#[test]
fn test_invalid_option_values_rejected() {
    for args in [
        ["submit", "--lambda", "0.4"],
        ["submit", "--stage2", "5"],
        ["submit", "--con-wt", "7"],
        ["submit", "--example", "4"],
    ] {
        assert!(
            Cli::try_parse_from(std::iter::once("confold").chain(args)).is_err(),
            "{args:?} should be rejected"
        );
    }
}

#[test]
fn test_text_and_file_conflict() {
    let result = Cli::try_parse_from([
        "confold",
        "submit",
        "--sequence",
        "MKV",
        "--sequence-file",
        "seq.fasta",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_other_subcommands_parse() {
    assert!(matches!(
        parse(&["example", "2"]).command,
        Command::Example(args) if args.number == ExamplePreset::TrueContacts
    ));
    assert!(matches!(
        parse(&["check-rr", "x.rr", "--length", "56", "--subset", "0.4"]).command,
        Command::CheckRr(args) if args.length == Some(56) && args.subset == ContactSubset::Top0_4L
    ));
    assert!(matches!(
        parse(&["help", "stage2"]).command,
        Command::Help(args) if args.topic.as_deref() == Some("stage2")
    ));
    assert!(matches!(parse(&["help"]).command, Command::Help(args) if args.topic.is_none()));
    assert!(matches!(parse(&["about"]).command, Command::About));
    assert!(matches!(
        parse(&["config", "path"]).command,
        Command::Config(ConfigCommand::Path)
    ));
    let cli = parse(&["--config", "custom.toml", "config", "show"]);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("custom.toml")));
}
