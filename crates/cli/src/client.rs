//! API client for communicating with the hopper design service

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// API client for the design service
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a GET request whose body is meaningful on any status.
    ///
    /// The health endpoints answer 503 with a renderable body (unhealthy
    /// service, models unavailable), so the status command must not treat
    /// those as transport errors.
    pub async fn get_any_status<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request and return the raw body plus the attachment
    /// filename from the Content-Disposition header, if any
    pub async fn post_download<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(Option<String>, Vec<u8>)> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        let file_name = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_attachment_name);

        let bytes = response.bytes().await.context("Failed to read body")?;
        Ok((file_name, bytes.to_vec()))
    }
}

fn parse_attachment_name(disposition: &str) -> Option<String> {
    let marker = "filename=\"";
    let start = disposition.find(marker)? + marker.len();
    let end = disposition[start..].find('"')? + start;
    Some(disposition[start..end].to_string())
}

// API request/response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRequest {
    pub bulk_density_kg_m3: f32,
    pub tapped_density_kg_m3: f32,
    pub d50_um: f32,
    pub shape: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRecord {
    pub timestamp: String,
    pub bulk_density_kg_m3: f32,
    pub tapped_density_kg_m3: f32,
    pub hausner_ratio: f32,
    pub d50_um: f32,
    pub shape: String,
    pub flowability: String,
    pub mass_flow_half_angle_deg: f32,
    pub mass_flow_outlet_nb: f32,
    pub funnel_flow_half_angle_deg: f32,
    pub funnel_flow_valley_angle_deg: f32,
    pub funnel_flow_outlet_nb: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogOutcome {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignResponse {
    pub record: DesignRecord,
    pub audit: LogOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: std::collections::HashMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
