use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum JobsApiError {
    #[error("Failed to build the http client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Provided endpoint is invalid: '{uri}' {reason}")]
    InvalidEndpoint { uri: String, reason: String },
    #[error("Request to {endpoint} failed: {source}")]
    RequestFailed {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("Server returned unexpected status code {status} for {endpoint}")]
    InvalidStatus {
        endpoint: String,
        status: StatusCode,
    },
    #[error("Failed to decode the response from {endpoint}: {source}")]
    DeserializationFailed {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("Response carries no numeric run_id field: {body}")]
    MissingRunId { body: String },
}
