//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "\u{2713}".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "\u{26a0}".yellow().bold(), message);
}

/// Format an angle in degrees for display
pub fn format_angle(degrees: f32) -> String {
    format!("{:.1}\u{00b0}", degrees)
}

/// Format an outlet dimension (nominal bore) for display
pub fn format_outlet(nb: f32) -> String {
    format!("{}", nb as i64)
}

/// Color a flowability class by how freely the material flows
pub fn color_flowability(class: &str) -> String {
    match class {
        "Free Flowing" => class.green().bold().to_string(),
        "Easy Flowing" => class.blue().bold().to_string(),
        "Cohesive" => class.yellow().bold().to_string(),
        "Very Cohesive" => class.red().bold().to_string(),
        _ => class.bold().to_string(),
    }
}

/// Color a health status value
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "healthy" | "ready" => status.green().to_string(),
        "degraded" => status.yellow().to_string(),
        "unhealthy" | "not ready" => status.red().to_string(),
        _ => status.to_string(),
    }
}
