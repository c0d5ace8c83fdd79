use std::time::Duration;

use primitives::{ReportPeriod, StatsResponse};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Timeout for the whole request to the reporting API
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

const STATS_ENDPOINT: &str = "bi/stats_gb/GetBySkin";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Building the stats endpoint url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Building the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to the reporting API: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Reading the reporting API response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("Decoding the reporting API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The partner credentials sent with every stats request.
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub partner_id: &'a str,
    pub service_token: &'a str,
    pub subscription_key: &'a str,
}

/// The fetched stats, together with the status the reporting API responded with.
#[derive(Debug)]
pub struct Stats {
    pub status: StatusCode,
    pub response: StatsResponse,
}

/// The `UpstreamApi` is cheap to clone
#[derive(Debug, Clone)]
pub struct UpstreamApi {
    base_url: Url,
    client: Client,
}

impl UpstreamApi {
    /// The path of `base_url` is always made to end with `/`
    /// so that the stats endpoint is joined after it and not in its place.
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, Error> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { base_url, client })
    }

    /// The base url of the reporting API
    pub fn url(&self) -> &Url {
        &self.base_url
    }

    pub fn stats_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join(STATS_ENDPOINT)?)
    }

    /// `GET /bi/stats_gb/GetBySkin` for the given period.
    ///
    /// A non-2xx status is not an error on its own, the body is decoded either way.
    pub async fn fetch_stats(
        &self,
        credentials: Credentials<'_>,
        period: &ReportPeriod,
    ) -> Result<Stats, Error> {
        let response = self
            .client
            .get(self.stats_url()?)
            .query(&[
                ("id_conto_partner", credentials.partner_id),
                ("token", credentials.service_token),
                ("data_inizio", period.start_date()),
                ("data_fine", period.end_date()),
            ])
            .header(SUBSCRIPTION_KEY_HEADER, credentials.subscription_key)
            .send()
            .await
            .map_err(Error::Request)?;

        let status = response.status();
        let body = response.bytes().await.map_err(Error::Body)?;

        Ok(Stats {
            status,
            response: serde_json::from_slice(&body)?,
        })
    }
}
