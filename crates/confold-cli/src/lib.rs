//! Command-line front-end for CONFOLD job submission.

mod cli_args;

use std::fs;
use std::path::Path;

use clap::Parser;
use confold_core::logging::{LoggingDestination, init_logging};
use confold_core::{
    Choice, ConfigLoadResult, FORM_CONTENT_TYPE, FieldId, HELP_TOPICS, SubmissionClient, SubmissionForm,
    SubmitError, TOOL_INFO, ValidationReport, check_pairings, config_path, find_topic,
    load_config, load_config_from, parse_contacts, prepare_submission, validate,
};
use tracing::info;

pub use cli_args::{
    CheckPairingArgs, CheckRrArgs, Cli, Command, ConfigCommand, ExampleArgs, HelpArgs, SubmitArgs,
};

/// True when the process was started with arguments; a bare launch opens the window.
pub fn should_run_cli_mode() -> bool {
    std::env::args_os().len() > 1
}

/// Parse the process arguments and run the selected command.
pub async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    if let Err(err) = init_logging(LoggingDestination::FileAndStderr) {
        eprintln!("Warning: structured logging unavailable: {err}");
    }
    dispatch(cli).await
}

pub async fn dispatch(cli: Cli) -> Result<(), String> {
    let load = match cli.config.as_deref() {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    match cli.command {
        Command::Submit(args) => run_submit(args, load).await,
        Command::Example(args) => print_example(args),
        Command::CheckPairing(args) => check_pairing_file(&args.file),
        Command::CheckRr(args) => check_rr_file(args),
        Command::Help(args) => print_help(args.topic.as_deref()),
        Command::About => {
            print_about();
            Ok(())
        }
        Command::Config(command) => handle_config_command(command, cli.config.as_deref(), load),
    }
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

fn print_report(report: &ValidationReport) {
    for issue in report.warnings() {
        eprintln!("Warning: {issue}");
    }
}

async fn run_submit(args: SubmitArgs, load: ConfigLoadResult) -> Result<(), String> {
    print_warnings(&load.warnings);

    let form = args.to_form()?;
    if args.json {
        let json = serde_json::to_string_pretty(&form).map_err(|err| err.to_string())?;
        println!("{json}");
        return Ok(());
    }

    let mut preferences = load.config.submission;
    if let Some(endpoint) = args.endpoint {
        preferences.endpoint = endpoint;
    }

    if args.dry_run {
        let prepared =
            prepare_submission(&form, &preferences.endpoint).map_err(describe_submit_error)?;
        print_report(&prepared.report);
        for line in job_summary(&form) {
            eprintln!("# {line}");
        }
        println!("POST {}", prepared.endpoint);
        println!("Content-Type: {FORM_CONTENT_TYPE}");
        println!();
        println!("{}", prepared.encoded_body());
        return Ok(());
    }

    let client = SubmissionClient::new(&preferences).map_err(describe_submit_error)?;
    let prepared = client.prepare(&form).map_err(describe_submit_error)?;
    print_report(&prepared.report);

    let receipt = client.send(&prepared).await.map_err(describe_submit_error)?;
    info!(status = receipt.status, url = %receipt.final_url, "Submission finished");

    if let Some(path) = args.output.as_deref() {
        fs::write(path, &receipt.body)
            .map_err(|err| format!("Failed to write {}: {err}", path.display()))?;
        println!("Saved response to {}", path.display());
    }

    if receipt.is_success() {
        println!(
            "Job submitted (HTTP {}). Response page: {}",
            receipt.status, receipt.final_url
        );
        println!("Check your e-mail and the job log at {}", TOOL_INFO.history_log_url);
        Ok(())
    } else {
        Err(format!(
            "Server answered HTTP {} from {}",
            receipt.status, receipt.final_url
        ))
    }
}

/// What the backend will do with the form, for the dry-run preview.
pub fn job_summary(form: &SubmissionForm) -> Vec<String> {
    let length = form.sequence_length();
    let contacts = parse_contacts(&form.contacts);
    let on_off = |flag: bool| if flag { "on" } else { "off" };

    vec![
        format!("sequence: {length} residues"),
        format!(
            "contacts: {} read, {} used with {}",
            contacts.contacts.len(),
            contacts.selected(form.contact_subset, length).len(),
            form.contact_subset.label()
        ),
        format!(
            "stage 2: sheet detection {}, contact filtering {}",
            on_off(form.stage2.detects_sheets()),
            on_off(form.stage2.filters_contacts())
        ),
    ]
}

fn describe_submit_error(err: SubmitError) -> String {
    match err {
        SubmitError::Blocked(report) => {
            let flags: Vec<_> = report
                .missing_fields()
                .into_iter()
                .map(|field| match field {
                    FieldId::Email => "--email",
                    FieldId::Sequence => "--sequence/--sequence-file",
                    FieldId::Contacts => "--rr/--rr-file",
                    other => other.form_name(),
                })
                .collect();
            format!("{report} (provide {})", flags.join(", "))
        }
        other => other.to_string(),
    }
}

fn print_form(form: &SubmissionForm) {
    for field in FieldId::ALL {
        let value = form.value(field);
        if value.contains('\n') {
            println!("{}:", field.form_name());
            for line in value.lines() {
                println!("    {line}");
            }
        } else {
            println!("{}: {}", field.form_name(), value);
        }
    }
}

fn print_example(args: ExampleArgs) -> Result<(), String> {
    let form = args.number.form();
    if args.json {
        let json = serde_json::to_string_pretty(&form).map_err(|err| err.to_string())?;
        println!("{json}");
    } else {
        println!("# {} - {}", args.number.name(), args.number.description());
        print_form(&form);
        let report = validate(&form);
        if report.is_blocked() {
            println!("# still needed before submitting: {report}");
        }
    }
    Ok(())
}

fn check_pairing_file(path: &Path) -> Result<(), String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
    let (records, errors) = check_pairings(&text);

    for record in &records {
        println!(
            "{record}    ({}, strands {}-{} [{} res] and {}-{} [{} res])",
            record.pairing_type.describe(),
            record.a,
            record.b,
            record.first_strand_len(),
            record.c,
            record.d,
            record.second_strand_len()
        );
    }
    for err in &errors {
        eprintln!("Invalid: {err}");
    }

    if errors.is_empty() {
        println!("{} pairing record(s) OK", records.len());
        Ok(())
    } else {
        Err(format!(
            "{} of {} pairing line(s) are invalid",
            errors.len(),
            records.len() + errors.len()
        ))
    }
}

fn check_rr_file(args: CheckRrArgs) -> Result<(), String> {
    let text = fs::read_to_string(&args.file)
        .map_err(|err| format!("Failed to read {}: {err}", args.file.display()))?;
    let map = parse_contacts(&text);

    let length = args
        .length
        .or_else(|| map.sequence.as_ref().map(|sequence| sequence.chars().count()));

    match &map.sequence {
        Some(sequence) => println!("Sequence: {} residues", sequence.chars().count()),
        None => println!("Sequence: not present in file"),
    }
    println!("Contacts: {}", map.contacts.len());
    for rejected in &map.rejected {
        eprintln!("Unreadable row at line {}: {}", rejected.line, rejected.text);
    }

    if map.is_sorted_by_confidence() {
        println!("Order: sorted by descending confidence");
    } else {
        let positions = map.unsorted_positions();
        println!(
            "Order: NOT sorted by confidence ({} contact(s) rank above their predecessor, first at {})",
            positions.len(),
            positions.first().copied().unwrap_or_default()
        );
    }

    match length {
        Some(length) => {
            let kept = map.selected(args.subset, length).len();
            println!(
                "Selection {} of L={length}: {kept} contact(s) used",
                args.subset.label()
            );
        }
        None => println!("Selection: pass --length to compute the top-xL cutoff"),
    }

    if map.is_empty() {
        Err("No contact rows found".to_string())
    } else {
        Ok(())
    }
}

fn print_help(topic: Option<&str>) -> Result<(), String> {
    match topic {
        Some(key) => {
            let topic = find_topic(key).ok_or_else(|| {
                format!("Unknown help topic '{key}'. Run `confold help` to list topics.")
            })?;
            println!("{} / {}", topic.section, topic.title);
            println!();
            for line in topic.lines {
                println!("  {line}");
            }
            if let Some(field) = topic.field {
                let options = field.options();
                if !options.is_empty() {
                    println!();
                    println!("  Options (value = label):");
                    for (value, label) in options {
                        println!("    {value} = {label}");
                    }
                }
            }
        }
        None => {
            let mut section = "";
            for topic in HELP_TOPICS {
                if topic.section != section {
                    section = topic.section;
                    println!("{section}");
                }
                println!("  {:<16} {}", topic.key, topic.title);
            }
        }
    }
    Ok(())
}

fn print_about() {
    println!("Download CONFOLD: {}", TOOL_INFO.download_url);
    println!();
    println!("{}", TOOL_INFO.assessment_tip);
    println!("  {}", TOOL_INFO.assessment_url);
    println!();
    println!("Execution time chart: {}", TOOL_INFO.execution_time_chart_url);
    println!("Job history log: {}", TOOL_INFO.history_log_url);
}

fn handle_config_command(
    command: ConfigCommand,
    explicit: Option<&Path>,
    load: ConfigLoadResult,
) -> Result<(), String> {
    match command {
        ConfigCommand::Path => {
            let path = explicit.map(Path::to_path_buf).unwrap_or_else(config_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommand::Show => {
            print_warnings(&load.warnings);
            let rendered = toml::to_string_pretty(&load.config).map_err(|err| err.to_string())?;
            print!("{rendered}");
            Ok(())
        }
    }
}
