use serde_aux::field_attributes::deserialize_number_from_string;
use std::fmt;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub databricks: DatabricksSettings,
    #[serde(default)]
    pub job: JobSettings,
    #[serde(default)]
    pub request: RequestSettings,
}

/// Workspace coordinates. No defaults: a missing host or token is a
/// configuration error, not a placeholder to fill in.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct DatabricksSettings {
    pub host: String,
    pub token: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct JobSettings {
    #[serde(default = "default_run_name")]
    pub run_name: String,
    #[serde(default = "default_cluster_id")]
    pub cluster_id: String,
    #[serde(default = "default_notebook_path")]
    pub notebook_path: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct RequestSettings {
    #[serde(
        default = "default_timeout_secs",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub timeout_secs: u64,
    #[serde(
        default = "default_output_retries",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub output_retries: u32,
}

fn default_run_name() -> String {
    "just_a_run".to_string()
}

fn default_cluster_id() -> String {
    "0423-212957-vl2qhpwd".to_string()
}

fn default_notebook_path() -> String {
    "/Shared/MetaDatarepliaction_Backend_Code/Modular_Replication_Code".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_retries() -> u32 {
    2
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            run_name: default_run_name(),
            cluster_id: default_cluster_id(),
            notebook_path: default_notebook_path(),
        }
    }
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            output_retries: default_output_retries(),
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Settings:\n  Databricks:\n{}\n  Job:\n{}\n  Request:\n{}",
            self.databricks, self.job, self.request
        )
    }
}

impl fmt::Display for DatabricksSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // never print the token
        write!(f, "    Host: {}\n    Token: <redacted>", self.host)
    }
}

impl fmt::Display for JobSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "    Run Name: {}\n    Cluster: {}\n    Notebook: {}",
            self.run_name, self.cluster_id, self.notebook_path
        )
    }
}

impl fmt::Display for RequestSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "    Timeout: {}s\n    Output Retries: {}",
            self.timeout_secs, self.output_retries
        )
    }
}
