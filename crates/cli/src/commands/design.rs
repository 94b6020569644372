//! Design command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, DesignResponse};
use crate::commands::to_request;
use crate::output::{color_flowability, format_angle, format_outlet, print_warning, OutputFormat};
use crate::MaterialArgs;

/// Row for the design result table
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Parameter")]
    parameter: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Run a design and render the result
pub async fn run_design(
    client: &ApiClient,
    material: &MaterialArgs,
    format: OutputFormat,
) -> Result<()> {
    let request = to_request(material);
    let response: DesignResponse = client.post("/api/v1/design", &request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let record = &response.record;

            println!(
                "Predicted flowability: {}",
                color_flowability(&record.flowability)
            );
            println!("Hausner ratio: {:.3}\n", record.hausner_ratio);

            let rows = vec![
                MetricRow {
                    parameter: "Mass Flow: Half Angle".to_string(),
                    value: format_angle(record.mass_flow_half_angle_deg),
                },
                MetricRow {
                    parameter: "Mass Flow: Outlet Dimension (NB)".to_string(),
                    value: format_outlet(record.mass_flow_outlet_nb),
                },
                MetricRow {
                    parameter: "Funnel Flow: Half Angle".to_string(),
                    value: format_angle(record.funnel_flow_half_angle_deg),
                },
                MetricRow {
                    parameter: "Funnel Flow: Valley Angle (External)".to_string(),
                    value: format_angle(record.funnel_flow_valley_angle_deg),
                },
                MetricRow {
                    parameter: "Funnel Flow: Outlet Dimension (NB)".to_string(),
                    value: format_outlet(record.funnel_flow_outlet_nb),
                },
            ];

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            if !response.audit.success {
                print_warning(&format!("Audit logging: {}", response.audit.message));
            }
        }
    }

    Ok(())
}
