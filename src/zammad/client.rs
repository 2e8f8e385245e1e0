use crate::error::ReportError;
use crate::models::SearchCountResponse;
use crate::zammad::TicketCounter;
use reqwest::Client;
use std::time::Duration;

const SEARCH_PATH: &str = "/api/v1/tickets/search";
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Count-only client for Zammad's ticket search.
#[derive(Debug, Clone)]
pub struct ZammadClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ZammadClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ReportError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Number of tickets matching `query`. A response without `total_count`
    /// counts as zero.
    pub async fn count(&self, query: &str) -> Result<u64, ReportError> {
        let response = self
            .client
            .get(format!("{}{SEARCH_PATH}", self.base_url))
            .header("Authorization", format!("Token token={}", self.token))
            .query(&[("query", query), ("only_total_count", "true")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::ZammadStatus {
                status: status.as_u16(),
                body: truncate_body(body.trim()),
            });
        }

        let parsed: SearchCountResponse = response.json().await?;
        let total = parsed.total_count.unwrap_or(0);
        tracing::debug!(query, total, "Zammad count");
        Ok(total)
    }
}

impl TicketCounter for ZammadClient {
    async fn count(&self, query: &str) -> Result<u64, ReportError> {
        ZammadClient::count(self, query).await
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_CHARS {
        body.to_string()
    } else {
        let boundary = body.floor_char_boundary(MAX_ERROR_BODY_CHARS);
        format!("{}...", &body[..boundary])
    }
}
