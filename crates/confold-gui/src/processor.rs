//! Runs job submissions on the bridge's runtime

use crate::async_bridge::{AsyncBridge, ProgressKind, ProgressUpdate};
use confold_core::{SubmissionClient, SubmissionReceipt, SubmitError};
use confold_core::config::SubmissionPreferences;
use confold_core::form::SubmissionForm;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum StartError {
    #[error("a submission is already running")]
    AlreadyRunning,
    #[error("background runtime is not available")]
    RuntimeUnavailable,
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Job label shown while the request is in flight.
pub fn job_label(form: &SubmissionForm) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    match form.job_id.trim() {
        "" => format!("job-{stamp}"),
        id => format!("{id}-{stamp}"),
    }
}

/// Check the form and, when it may be sent, post it in the background.
///
/// A blocked form never reaches the runtime.
pub fn start_submission(
    bridge: &AsyncBridge,
    preferences: &SubmissionPreferences,
    form: &SubmissionForm,
    already_running: bool,
) -> Result<mpsc::UnboundedReceiver<ProgressUpdate>, StartError> {
    if already_running {
        return Err(StartError::AlreadyRunning);
    }
    let runtime = bridge.runtime().ok_or(StartError::RuntimeUnavailable)?;

    let client = SubmissionClient::new(preferences)?;
    let prepared = client.prepare(form)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let job_id = job_label(form);
    info!(job = %job_id, endpoint = client.endpoint(), "Starting submission");

    let _ = tx.send(
        ProgressUpdate::new(ProgressKind::Started {
            job_id: job_id.clone(),
        })
        .with_message(format!("Posting to {}", client.endpoint())),
    );
    for issue in prepared.report.warnings() {
        let _ = tx.send(ProgressUpdate::new(ProgressKind::Warning {
            message: issue.to_string(),
        }));
    }

    runtime.spawn(async move {
        let _ = tx.send(ProgressUpdate::new(ProgressKind::Info {
            message: format!("Waiting for {}", prepared.endpoint),
        }));
        let result = client.send(&prepared).await;
        if let Err(err) = &result {
            warn!(job = %job_id, error = %err, "Submission failed");
        }
        let _ = tx.send(update_for_result(result));
    });

    Ok(rx)
}

/// Final progress message for a finished request.
pub fn update_for_result(result: Result<SubmissionReceipt, SubmitError>) -> ProgressUpdate {
    match result {
        Ok(receipt) => {
            let elapsed_ms = receipt.elapsed.as_millis() as u64;
            let message = if receipt.is_success() {
                format!("Job submitted (HTTP {})", receipt.status)
            } else {
                format!("Server answered HTTP {}", receipt.status)
            };
            ProgressUpdate::new(ProgressKind::Completed {
                status: receipt.status,
                final_url: receipt.final_url,
                body: receipt.body,
            })
            .with_message(message)
            .with_elapsed_ms(elapsed_ms)
        }
        Err(err) => {
            let error = format!("Submission failed: {err}");
            ProgressUpdate::new(ProgressKind::Failed {
                error: error.clone(),
            })
            .with_message(error)
        }
    }
}
