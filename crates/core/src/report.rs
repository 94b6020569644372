//! CSV report export
//!
//! Flattens a design record into two-column (Parameter, Value) rows. Pure
//! function of the record; ordering matches the printed specification sheet.

use crate::models::DesignRecord;
use anyhow::{Context, Result};
use chrono::NaiveDate;

/// MIME type of the exported report
pub const REPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// (Parameter, Value) rows in specification-sheet order
pub fn report_rows(record: &DesignRecord) -> Vec<(String, String)> {
    vec![
        ("Timestamp".to_string(), record.timestamp.clone()),
        (
            "Bulk Density (kg/m\u{00b3})".to_string(),
            format!("{:.1}", record.bulk_density_kg_m3),
        ),
        (
            "Tapped Density (kg/m\u{00b3})".to_string(),
            format!("{:.1}", record.tapped_density_kg_m3),
        ),
        (
            "Hausner Ratio".to_string(),
            format!("{:.3}", record.hausner_ratio),
        ),
        (
            "Particle Size d50 (\u{00b5}m)".to_string(),
            format!("{:.1}", record.d50_um),
        ),
        ("Particle Shape".to_string(), record.shape.clone()),
        ("Predicted Flowability".to_string(), record.flowability.clone()),
        (
            "Mass Flow: Half Angle (\u{00b0})".to_string(),
            format!("{:.1}", record.mass_flow_half_angle_deg),
        ),
        (
            "Mass Flow: Outlet Dimension (NB)".to_string(),
            format!("{}", record.mass_flow_outlet_nb as i64),
        ),
        (
            "Funnel Flow: Half Angle (\u{00b0})".to_string(),
            format!("{:.1}", record.funnel_flow_half_angle_deg),
        ),
        (
            "Funnel Flow: Valley Angle (\u{00b0})".to_string(),
            format!("{:.1}", record.funnel_flow_valley_angle_deg),
        ),
        (
            "Funnel Flow: Outlet Dimension (NB)".to_string(),
            format!("{}", record.funnel_flow_outlet_nb as i64),
        ),
    ]
}

/// Serialize the record to the two-column CSV download
pub fn to_csv(record: &DesignRecord) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Parameter", "Value"])
        .context("Failed to write CSV header")?;
    for (parameter, value) in report_rows(record) {
        writer
            .write_record([parameter.as_str(), value.as_str()])
            .context("Failed to write CSV row")?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

/// Download filename carrying the report date
pub fn file_name(date: NaiveDate) -> String {
    format!("hopper_design_{}.csv", date.format("%Y-%m-%d"))
}
