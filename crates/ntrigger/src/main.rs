use arg::Args;
use clap::Parser;
mod arg;
use nbjob_common::configuration::get_configuration;
use nbjob_common::jobs::{JobsClient, NotebookTask, RunSubmitRequest};
use nbjob_common::telemetry::{get_subscriber, init_subscriber};
use ntrigger::{parse_param_literal, settings::Settings};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logs go to stderr, stdout carries the run output and payload
    let subscriber = get_subscriber("ntrigger".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    let args = Args::parse();
    let params = parse_param_literal(&args.params)?;

    let settings: Settings = get_configuration()?;

    let client = JobsClient::new(
        &settings.databricks.host,
        settings.databricks.token.clone(),
        Duration::from_secs(settings.request.timeout_secs),
        settings.request.output_retries,
    )?;

    let mut base_parameters = HashMap::new();
    base_parameters.insert("list1".to_string(), params.to_string());
    let request = RunSubmitRequest {
        run_name: settings.job.run_name.clone(),
        existing_cluster_id: settings.job.cluster_id.clone(),
        notebook_task: NotebookTask {
            notebook_path: settings.job.notebook_path.clone(),
            base_parameters,
        },
    };

    let run_id = client.submit_run(&request).await?;
    info!("Started run with id: {}", run_id);

    let output = client.get_run_output(run_id).await?;
    println!("{} {}", output, serde_json::to_string(&request)?);

    Ok(())
}
