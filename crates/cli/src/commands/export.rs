//! Report export command

use anyhow::{Context, Result};

use crate::client::ApiClient;
use crate::commands::to_request;
use crate::output::{print_success, OutputFormat};
use crate::MaterialArgs;

/// Export the CSV specification report to a local file
pub async fn export_report(
    client: &ApiClient,
    material: &MaterialArgs,
    output: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let request = to_request(material);
    let (attachment_name, bytes) = client
        .post_download("/api/v1/design/report", &request)
        .await?;

    let path = output
        .or(attachment_name)
        .unwrap_or_else(|| "hopper_design.csv".to_string());

    std::fs::write(&path, &bytes).with_context(|| format!("Failed to write report to {path}"))?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "path": path, "bytes": bytes.len() })
            );
        }
        OutputFormat::Table => {
            print_success(&format!("Report written to {path}"));
        }
    }

    Ok(())
}
