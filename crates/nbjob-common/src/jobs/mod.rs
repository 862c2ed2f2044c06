mod errors;
mod messages;

use std::fmt::Debug;
use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

pub use errors::JobsApiError;
pub use messages::*;

pub const RUNS_SUBMIT_ENDPOINT: &str = "api/2.0/jobs/runs/submit";
pub const RUNS_GET_OUTPUT_ENDPOINT: &str = "api/2.0/jobs/runs/get-output";

const OUTPUT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Client for the remote Jobs API. Holds the workspace base url, the bearer
/// token and a pre-built http client with the request timeout applied.
#[derive(Clone)]
pub struct JobsClient {
    base_url: String,
    token: String,
    http: Client,
    output_retries: u32,
}

impl JobsClient {
    pub fn new(
        base_url: &str,
        token: String,
        timeout: Duration,
        output_retries: u32,
    ) -> Result<Self, JobsApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(JobsApiError::ClientBuild)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http,
            output_retries,
        })
    }

    fn prepare_request(
        &self,
        method: Method,
        endpoint: &str,
    ) -> Result<reqwest::RequestBuilder, JobsApiError> {
        let uri = format!("{}/{}", self.base_url, endpoint);

        let url = match Url::parse(&uri) {
            Ok(url) => url,
            Err(error) => {
                return Err(JobsApiError::InvalidEndpoint {
                    uri,
                    reason: error.to_string(),
                })
            }
        };

        Ok(self.http.request(method, url).bearer_auth(&self.token))
    }

    async fn execute<TRequest, TResponse>(
        &self,
        method: Method,
        endpoint: &str,
        data: &TRequest,
    ) -> Result<TResponse, JobsApiError>
    where
        TRequest: Serialize + Debug,
        TResponse: DeserializeOwned,
    {
        info!("Sending {} to {} with {:?}", method, endpoint, data);
        let builder = self.prepare_request(method.clone(), endpoint)?;

        let builder = if method == Method::GET {
            builder.query(data)
        } else {
            builder.json(data)
        };

        let response = builder
            .send()
            .await
            .map_err(|error| JobsApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source: error,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobsApiError::InvalidStatus {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        response
            .json()
            .await
            .map_err(|error| JobsApiError::DeserializationFailed {
                endpoint: endpoint.to_string(),
                source: error,
            })
    }

    /// Submit a one-time notebook run and return the run id the service
    /// assigned to it.
    pub async fn submit_run(&self, request: &RunSubmitRequest) -> Result<RunId, JobsApiError> {
        let body: serde_json::Value = self
            .execute(Method::POST, RUNS_SUBMIT_ENDPOINT, request)
            .await?;
        extract_run_id(&body)
    }

    /// Fetch the output for a run. The read is idempotent, so transport
    /// failures are retried a bounded number of times. Http error statuses
    /// are returned immediately.
    pub async fn get_run_output(&self, run_id: RunId) -> Result<RunOutput, JobsApiError> {
        let request = RunOutputRequest { run_id: run_id.0 };

        let mut attempts = 0;
        loop {
            match self
                .execute(Method::GET, RUNS_GET_OUTPUT_ENDPOINT, &request)
                .await
            {
                Err(JobsApiError::RequestFailed { endpoint, source })
                    if attempts < self.output_retries =>
                {
                    attempts += 1;
                    warn!(
                        "Request to {} failed ({}), retry {}/{}",
                        endpoint, source, attempts, self.output_retries
                    );
                    tokio::time::sleep(OUTPUT_RETRY_DELAY).await;
                }
                other => return other,
            }
        }
    }
}

/// Extract the `run_id` field from a submit response by name. A missing or
/// non-numeric field is an error, never a guessed value.
pub fn extract_run_id(body: &serde_json::Value) -> Result<RunId, JobsApiError> {
    body.get("run_id")
        .and_then(|value| value.as_u64())
        .map(RunId)
        .ok_or_else(|| JobsApiError::MissingRunId {
            body: body.to_string(),
        })
}
