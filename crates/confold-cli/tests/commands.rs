use std::fs;
use std::path::Path;

use clap::Parser;
use confold_cli::{Cli, dispatch, job_summary};
use confold_core::ExamplePreset;
use confold_core::options::ContactSubset;
use tempfile::{TempDir, tempdir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Temp dir holding a config.toml that points at `endpoint`.
fn config_dir(endpoint: &str) -> TempDir {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("config.toml"),
        format!("[submission]\nendpoint = \"{endpoint}\"\ntimeout_secs = 5\n"),
    )
    .expect("write config");
    dir
}

fn cli(config: &Path, args: &[&str]) -> Cli {
    let config = config.join("config.toml");
    let mut argv = vec![
        "confold".to_string(),
        "--config".to_string(),
        config.to_string_lossy().to_string(),
    ];
    argv.extend(args.iter().map(|arg| arg.to_string()));
    Cli::try_parse_from(argv).expect("arguments should parse")
}

#[tokio::test]
async fn dry_run_refuses_missing_required_fields() {
    let dir = config_dir("http://127.0.0.1:9/main.cgi");
    let err = dispatch(cli(dir.path(), &["submit", "--example", "1", "--dry-run"]))
        .await
        .unwrap_err();
    assert!(err.contains("E-mail Address"), "{err}");
    assert!(err.contains("--email"), "{err}");
}

#[tokio::test]
async fn dry_run_succeeds_with_required_fields() {
    let dir = config_dir("http://127.0.0.1:9/main.cgi");
    dispatch(cli(
        dir.path(),
        &[
            "submit",
            "--example",
            "2",
            "--email",
            "me@example.org",
            "--dry-run",
        ],
    ))
    .await
    .expect("dry run");
}

#[tokio::test]
async fn submit_saves_response_body() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/main.cgi", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        while !String::from_utf8_lossy(&request).contains("submit=Run+Job") {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..read]);
        }
        let body = "queued";
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        String::from_utf8_lossy(&request).to_string()
    });

    let dir = config_dir(&endpoint);
    let output = dir.path().join("response.html");
    dispatch(cli(
        dir.path(),
        &[
            "submit",
            "--example",
            "1",
            "--email",
            "me@example.org",
            "--output",
            output.to_str().unwrap(),
        ],
    ))
    .await
    .expect("submitted");

    assert_eq!(fs::read_to_string(&output).unwrap(), "queued");
    let request = server.await.unwrap();
    assert!(request.contains("email=me%40example.org"));
    assert!(request.contains("stage2=1"));
}

#[tokio::test]
async fn check_pairing_reports_invalid_lines() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.txt");
    let bad = dir.path().join("bad.txt");
    fs::write(&good, "2 7 20 25 P 0.9\n2 7 25 20 A 0.9\n").unwrap();
    fs::write(&bad, "2 7 20 25 P 0.9\n2 7 20 25 A 0.9\n").unwrap();

    dispatch(cli(dir.path(), &["check-pairing", good.to_str().unwrap()]))
        .await
        .expect("valid pairings");
    let err = dispatch(cli(dir.path(), &["check-pairing", bad.to_str().unwrap()]))
        .await
        .unwrap_err();
    assert!(err.contains("1 of 2"), "{err}");
}

#[tokio::test]
async fn check_rr_requires_rows() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("empty.rr");
    let rr = dir.path().join("contacts.rr");
    fs::write(&empty, "PFRMAT RR\nEND\n").unwrap();
    fs::write(&rr, "MKVLAA\n1 5 0 8 0.9\n2 6 0 8 0.8\n").unwrap();

    assert!(
        dispatch(cli(dir.path(), &["check-rr", empty.to_str().unwrap()]))
            .await
            .is_err()
    );
    dispatch(cli(
        dir.path(),
        &["check-rr", rr.to_str().unwrap(), "--subset", "0.4"],
    ))
    .await
    .expect("contacts present");
}

#[tokio::test]
async fn help_rejects_unknown_topic() {
    let dir = tempdir().unwrap();
    dispatch(cli(dir.path(), &["help"])).await.expect("topic list");
    dispatch(cli(dir.path(), &["help", "rr_subset"]))
        .await
        .expect("known topic");
    let err = dispatch(cli(dir.path(), &["help", "nonsense"]))
        .await
        .unwrap_err();
    assert!(err.contains("nonsense"));
}

#[test]
fn job_summary_describes_backend_work() {
    let form = ExamplePreset::Test.form();
    assert_eq!(
        job_summary(&form),
        vec![
            "sequence: 20 residues".to_string(),
            "contacts: 4 read, 4 used with all".to_string(),
            "stage 2: sheet detection off, contact filtering off".to_string(),
        ]
    );

    let mut form = ExamplePreset::PredictedContacts.form();
    form.sequence = form.sequence[..25].to_string();
    form.contact_subset = ContactSubset::Top0_4L;
    let summary = job_summary(&form);
    assert_eq!(summary[0], "sequence: 25 residues");
    assert_eq!(summary[1], "contacts: 20 read, 10 used with top-0.4L");
    assert_eq!(summary[2], "stage 2: sheet detection on, contact filtering on");
}
