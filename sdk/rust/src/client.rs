use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Successful activity lookup as returned by `GET /api/check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub address: String,
    pub tx_count: u64,
    pub asset_transfers_count: usize,
    pub sample_transfers: Vec<serde_json::Value>,
    #[serde(default)]
    pub degraded_directions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Outcome of a lookup: a summary, or the service's classified refusal.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Found(CheckResponse),
    Rejected { status: u16, error: String },
}

pub struct ActivityClient {
    client: Client,
    service_url: String,
}

impl ActivityClient {
    pub fn new(service_url: &str) -> Self {
        Self {
            client: Client::new(),
            service_url: service_url.trim_end_matches('/').to_string(),
        }
    }

    /// Look up the activity of an address.
    pub async fn check(&self, address: &str) -> Result<CheckOutcome, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/api/check", self.service_url))
            .query(&[("address", address)])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status == StatusCode::OK {
            return Ok(CheckOutcome::Found(serde_json::from_str(&text)?));
        }

        let error = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.error,
            Err(_) => text,
        };
        Ok(CheckOutcome::Rejected {
            status: status.as_u16(),
            error,
        })
    }

    /// Fetch the service health document.
    pub async fn health(&self) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .get(format!("{}/health", self.service_url))
            .send()
            .await?
            .json()
            .await
    }
}
