use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::retry::RetryPolicy;
use crate::config::ApiConfig;
use crate::workflows::triage::{PatientRecord, TriageReport};

const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the remote assessment service: pulls the paginated patient
/// roster and pushes the finished report back. All scoring happens elsewhere;
/// this module only moves records.
pub struct AssessmentClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
    page_delay: Duration,
    retry: RetryPolicy,
}

impl AssessmentClient {
    pub fn new(config: ApiConfig, retry: RetryPolicy) -> Result<Self, IntakeError> {
        let api_key = config.api_key.ok_or(IntakeError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(IntakeError::Transport)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            page_size: config.page_size,
            page_delay: Duration::from_millis(config.page_delay_ms),
            retry,
        })
    }

    /// Walk the roster from page 1 while the service reports more pages,
    /// pacing requests with the configured inter-page delay. Rows that fail
    /// to decode are dropped with a warning rather than failing the run.
    pub async fn fetch_all_patients(&self) -> Result<Vec<PatientRecord>, IntakeError> {
        let url = format!("{}/api/patients", self.base_url);
        let mut patients = Vec::new();
        let mut expected_total = None;
        let mut page = 1u32;

        loop {
            let body = self.fetch_page(&url, page).await?;
            patients.extend(decode_rows(page, body.data));
            debug!(page, fetched = patients.len(), "fetched patient page");

            let has_next = body.pagination.map(|info| info.has_next).unwrap_or(false);
            if !has_next {
                expected_total = body.total_records;
                break;
            }

            sleep(self.page_delay).await;
            page += 1;
        }

        if let Some(total) = expected_total {
            if total as usize != patients.len() {
                warn!(
                    expected = total,
                    fetched = patients.len(),
                    "total record count disagrees with fetched roster"
                );
            }
        }

        Ok(patients)
    }

    /// POST the finished report; returns the service's acknowledgement body.
    pub async fn submit_report(
        &self,
        report: &TriageReport,
    ) -> Result<serde_json::Value, SubmissionError> {
        let url = format!("{}/api/submit-assessment", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(report)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected { status });
        }

        Ok(response.json().await?)
    }

    async fn fetch_page(&self, url: &str, page: u32) -> Result<PatientPage, IntakeError> {
        let mut attempt = 0u32;

        loop {
            match self.try_fetch_page(url, page).await {
                Ok(body) => return Ok(body),
                Err(failure) if failure.retryable && attempt + 1 < self.retry.max_attempts => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        page,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure.error,
                        "retrying patient page fetch"
                    );
                    sleep(delay).await;
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }

    async fn try_fetch_page(&self, url: &str, page: u32) -> Result<PatientPage, FetchFailure> {
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("page", page.to_string()), ("limit", self.page_size.to_string())])
            .send()
            .await
            .map_err(|source| FetchFailure {
                retryable: true,
                error: IntakeError::Transport(source),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            return Err(FetchFailure {
                retryable,
                error: IntakeError::Status { status },
            });
        }

        response.json::<PatientPage>().await.map_err(|source| FetchFailure {
            retryable: false,
            error: IntakeError::Transport(source),
        })
    }
}

struct FetchFailure {
    retryable: bool,
    error: IntakeError,
}

/// One page of the roster endpoint. The degraded responses the service is
/// known to serve can omit any of these fields, so every one is defaulted.
#[derive(Debug, Deserialize)]
pub(crate) struct PatientPage {
    #[serde(default)]
    pub(crate) data: Vec<serde_json::Value>,
    #[serde(default)]
    pub(crate) pagination: Option<PageInfo>,
    #[serde(default)]
    pub(crate) total_records: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageInfo {
    #[serde(default, rename = "hasNext")]
    pub(crate) has_next: bool,
}

pub(crate) fn decode_rows(page: u32, rows: Vec<serde_json::Value>) -> Vec<PatientRecord> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<PatientRecord>(row) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(page, %error, "dropping undecodable patient row");
                None
            }
        })
        .collect()
}

/// Failure fetching the roster.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("ASSESSMENT_API_KEY is not configured")]
    MissingApiKey,
    #[error("failed to reach assessment service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("assessment service answered with status {status}")]
    Status { status: StatusCode },
}

/// Failure transmitting the finished report.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("failed to transmit report: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("assessment service rejected the report with status {status}")]
    Rejected { status: StatusCode },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::triage::VitalReading;

    #[test]
    fn page_decodes_with_every_field_missing() {
        let page: PatientPage = serde_json::from_str("{}").expect("empty page decodes");
        assert!(page.data.is_empty());
        assert!(page.pagination.is_none());
        assert!(page.total_records.is_none());
    }

    #[test]
    fn page_decodes_dirty_rows_without_failing() {
        let body = serde_json::json!({
            "data": [
                { "patient_id": "P1", "age": 45, "temperature": "98.6", "blood_pressure": "120/80" },
                { "patient_id": "P2", "age": "unknown", "temperature": null },
                { "no_id_at_all": true },
            ],
            "pagination": { "hasNext": true },
            "total_records": 3,
        });

        let page: PatientPage = serde_json::from_value(body).expect("page decodes");
        let records = decode_rows(1, page.data);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].patient_id.as_str(), "P1");
        assert_eq!(
            records[0].age.as_ref().and_then(VitalReading::as_number),
            Some(45.0)
        );
        assert_eq!(records[1].age.as_ref().and_then(VitalReading::as_number), None);
    }
}
