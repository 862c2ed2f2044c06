use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The job submission payload: which notebook to run, on which cluster,
/// with which parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunSubmitRequest {
    pub run_name: String,
    pub existing_cluster_id: String,
    pub notebook_task: NotebookTask,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NotebookTask {
    pub notebook_path: String,
    pub base_parameters: HashMap<String, String>,
}

#[derive(Serialize, Debug, Clone, Copy)]
pub struct RunOutputRequest {
    pub run_id: u64,
}

/// Integer handle identifying a specific execution on the remote service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque result object associated with an execution. No schema is enforced,
/// the service owns the shape and we print it as-is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct RunOutput(pub serde_json::Value);

impl fmt::Display for RunOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
