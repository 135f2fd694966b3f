//! Guest-list service HTTP client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::models::{Guest, LookupResponse, RemovalResponse, Verdict};

/// Listing endpoint path.
pub const ROSTER_PATH: &str = "listaButtaFuori.php";
/// Admission lookup endpoint path.
pub const LOOKUP_PATH: &str = "ingressi.php";
/// Admission confirm / presence removal endpoint path.
pub const ADMISSION_PATH: &str = "comeVoglio.php";

/// Remote operations the check-in screen depends on.
#[async_trait]
pub trait GuestService: Send + Sync {
    /// Fetch the full roster.
    async fn list_guests(&self) -> Result<Vec<Guest>>;

    /// Look up admission data for a guest identifier.
    async fn lookup(&self, guest_id: &str) -> Result<Verdict>;

    /// Record the guest's admission server-side.
    async fn confirm_admission(&self, guest_id: &str) -> Result<()>;

    /// Revert a guest's presence flag.
    async fn remove_presence(&self, guest_id: &str) -> Result<RemovalResponse>;
}

/// HTTP client for the guest-list PHP endpoints.
///
/// All calls are plain GETs with query-string parameters and JSON bodies.
#[derive(Clone)]
pub struct CheckInClient {
    client: Client,
    base_url: String,
}

impl CheckInClient {
    /// Create a new client instance.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{base}/{path}", base = self.base_url)
    }

    /// GET an endpoint and return the body, failing on non-2xx statuses.
    async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = self.endpoint(path);
        debug!("GET {url} {query:?}");

        let response = self.client.get(&url).query(query).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl GuestService for CheckInClient {
    async fn list_guests(&self) -> Result<Vec<Guest>> {
        let body = self.get_text(ROSTER_PATH, &[]).await?;
        let guests = parse_roster(&body)?;
        info!("Roster fetched: {} guests", guests.len());
        Ok(guests)
    }

    async fn lookup(&self, guest_id: &str) -> Result<Verdict> {
        let body = self.get_text(LOOKUP_PATH, &[("id", guest_id)]).await?;
        parse_lookup(&body)?.into_verdict()
    }

    async fn confirm_admission(&self, guest_id: &str) -> Result<()> {
        // Body is not interpreted; only transport and status failures count.
        self.get_text(ADMISSION_PATH, &[("id", guest_id)]).await?;
        info!("Admission recorded for guest {guest_id}");
        Ok(())
    }

    async fn remove_presence(&self, guest_id: &str) -> Result<RemovalResponse> {
        let body = self.get_text(ADMISSION_PATH, &[("remove", "1"), ("id", guest_id)]).await?;
        parse_removal(&body)
    }
}

/// Parse the listing endpoint body.
pub fn parse_roster(body: &str) -> Result<Vec<Guest>> {
    Ok(serde_json::from_str(body)?)
}

/// Parse the lookup endpoint body.
pub fn parse_lookup(body: &str) -> Result<LookupResponse> {
    Ok(serde_json::from_str(body)?)
}

/// Parse the removal endpoint body.
pub fn parse_removal(body: &str) -> Result<RemovalResponse> {
    Ok(serde_json::from_str(body)?)
}
