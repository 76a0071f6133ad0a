//! Posting a job to the CONFOLD endpoint.
//!
//! A job is only sent after [`prepare_submission`] has confirmed the required
//! fields; the body carries every field, hidden or not, the way a browser
//! posts the form.

use crate::config::SubmissionPreferences;
use crate::form::SubmissionForm;
use crate::validation::{ValidationReport, validate};
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// Name and value the form's submit button contributes to the body.
pub const SUBMIT_BUTTON: (&str, &str) = ("submit", "Run Job");

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission blocked: {0}")]
    Blocked(ValidationReport),
    #[error("invalid submission endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A validated job ready to be posted.
#[derive(Debug, Clone)]
pub struct PreparedSubmission {
    pub endpoint: Url,
    pub fields: Vec<(&'static str, String)>,
    /// Non-blocking findings from validation.
    pub report: ValidationReport,
}

impl PreparedSubmission {
    /// `application/x-www-form-urlencoded` body. [`SubmissionClient::send`] posts
    /// exactly these bytes, so a dry run shows what the endpoint receives.
    pub fn encoded_body(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .chain(std::iter::once(SUBMIT_BUTTON))
            .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

}

/// Form encoding: percent-encoding with `+` for spaces.
fn encode_component(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// What the endpoint sent back. Interpreting it is up to the caller.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub final_url: String,
    pub body: String,
    pub elapsed: Duration,
}

impl SubmissionReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn parse_endpoint(endpoint: &str) -> Result<Url, SubmitError> {
    let url = Url::parse(endpoint.trim()).map_err(|err| SubmitError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SubmitError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Validate the form and build the request payload without sending anything.
pub fn prepare_submission(
    form: &SubmissionForm,
    endpoint: &str,
) -> Result<PreparedSubmission, SubmitError> {
    let report = validate(form);
    if report.is_blocked() {
        return Err(SubmitError::Blocked(report));
    }
    let endpoint = parse_endpoint(endpoint)?;
    Ok(PreparedSubmission {
        endpoint,
        fields: form.form_pairs(),
        report,
    })
}

/// HTTP client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SubmissionClient {
    pub fn new(preferences: &SubmissionPreferences) -> Result<Self, SubmitError> {
        parse_endpoint(&preferences.endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(preferences.timeout_secs))
            .user_agent(preferences.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            endpoint: preferences.endpoint.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn prepare(&self, form: &SubmissionForm) -> Result<PreparedSubmission, SubmitError> {
        prepare_submission(form, &self.endpoint)
    }

    /// Check the form and post it once. No retries.
    pub async fn submit(&self, form: &SubmissionForm) -> Result<SubmissionReceipt, SubmitError> {
        let prepared = match self.prepare(form) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(error = %err, "Submission not sent");
                return Err(err);
            }
        };
        self.send(&prepared).await
    }

    pub async fn send(&self, prepared: &PreparedSubmission) -> Result<SubmissionReceipt, SubmitError> {
        for issue in prepared.report.warnings() {
            warn!(field = issue.field.form_name(), message = %issue.message, "Submitting despite warning");
        }

        let started = Instant::now();
        info!(endpoint = %prepared.endpoint, fields = prepared.fields.len(), "Posting job");
        let response = self
            .client
            .post(prepared.endpoint.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(prepared.encoded_body())
            .send()
            .await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        let elapsed = started.elapsed();

        if (200..300).contains(&status) {
            info!(status, elapsed_ms = elapsed.as_millis() as u64, "Job accepted by endpoint");
        } else {
            warn!(status, elapsed_ms = elapsed.as_millis() as u64, "Endpoint returned a non-success status");
        }

        Ok(SubmissionReceipt {
            status,
            final_url,
            body,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldId;
    use crate::presets::ExamplePreset;

    fn ready_form() -> SubmissionForm {
        let mut form = ExamplePreset::Test.form();
        form.email = "someone@example.org".to_string();
        form
    }

    #[test]
    fn test_prepare_blocks_on_missing_fields() {
        for field in [FieldId::Email, FieldId::Sequence, FieldId::Contacts] {
            let mut form = ready_form();
            form.set_value(field, "").unwrap();
            match prepare_submission(&form, crate::help::DEFAULT_ENDPOINT) {
                Err(SubmitError::Blocked(report)) => {
                    assert_eq!(report.missing_fields(), vec![field]);
                }
                other => panic!("expected blocked submission, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_prepare_ignores_advanced_values() {
        let mut form = ready_form();
        form.set_value(FieldId::Lambda, "0.5").unwrap();
        form.set_value(FieldId::Stage2, "1").unwrap();
        form.set_value(FieldId::Pairing, "garbage").unwrap();
        let prepared = prepare_submission(&form, crate::help::DEFAULT_ENDPOINT).unwrap();
        assert_eq!(prepared.fields.len(), 15);
        assert!(prepared.report.warnings().count() > 0);
    }

    #[test]
    fn test_encoded_body_contains_every_field() {
        let prepared = prepare_submission(&ready_form(), "https://example.org/cgi").unwrap();
        let body = prepared.encoded_body();
        for field in FieldId::ALL {
            assert!(body.contains(&format!("{}=", field.form_name())), "{field:?}");
        }
        assert!(body.contains("email=someone%40example.org"));
        assert!(body.contains("rr=NLYIQWLKDGGPSSGRPPPS%0A3+19+0+8+1.00"));
        assert!(body.ends_with("submit=Run+Job"));
    }

    #[test]
    fn test_rejects_non_http_endpoints() {
        assert!(matches!(
            parse_endpoint("ftp://example.org/run"),
            Err(SubmitError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            parse_endpoint("not a url"),
            Err(SubmitError::InvalidEndpoint { .. })
        ));
        assert!(parse_endpoint(" https://example.org/cgi ").is_ok());
    }
}
