use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{handler::Handler, routing::get, Extension, Router, Server};
use once_cell::sync::Lazy;
use serde::Deserialize;
use slog::{error, info, warn, Logger};
use url::Url;

/// an error used when deserializing a [`Config`] instance from environment variables
/// see [`Config::from_env()`]
pub use envy::Error as EnvError;

use crate::{
    response::ResponseError,
    routes::report::get_report,
    upstream::{self, Credentials, UpstreamApi},
};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_IP_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0));
pub static DEFAULT_UPSTREAM_URL: Lazy<Url> = Lazy::new(|| {
    "https://api-eplay24.azure-api.net/"
        .parse::<Url>()
        .expect("Valid URL")
});

#[derive(Deserialize, Clone)]
pub struct Config {
    /// `SUBSCRIPTION_KEY`, sent as the `Ocp-Apim-Subscription-Key` header.
    /// An empty key is allowed.
    #[serde(default)]
    pub subscription_key: String,
    /// `SERVICE_TOKEN`, sent as the `token` query parameter.
    #[serde(default)]
    pub service_token: String,
    /// `PARTNER_ID`, sent as the `id_conto_partner` query parameter.
    #[serde(default)]
    pub partner_id: String,
    /// The port on which the reports API will be accessible.
    #[serde(default = "default_port")]
    /// Defaults to `8080`: [`DEFAULT_PORT`]
    pub port: u16,
    /// The address on which the reports API will be accessible.
    /// `0.0.0.0` can be used for Docker.
    /// `127.0.0.1` can be used for locally running servers.
    #[serde(default = "default_ip_addr")]
    /// Defaults to `0.0.0.0`: [`DEFAULT_IP_ADDR`]
    pub ip_addr: IpAddr,
    #[serde(default = "default_upstream_url")]
    /// Defaults to the eplay24 API gateway: [`DEFAULT_UPSTREAM_URL`]
    pub upstream_url: Url,
}

impl Config {
    /// Deserialize the application [`Config`] from Environment variables.
    pub fn from_env() -> Result<Self, EnvError> {
        envy::from_env()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip_addr, self.port)
    }

    pub fn credentials(&self) -> Credentials<'_> {
        Credentials {
            partner_id: &self.partner_id,
            service_token: &self.service_token,
            subscription_key: &self.subscription_key,
        }
    }

    /// The names of the credentials which are not set.
    ///
    /// They are not required for starting the server,
    /// the reporting API will reject the requests instead.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("SUBSCRIPTION_KEY", &self.subscription_key),
            ("SERVICE_TOKEN", &self.service_token),
            ("PARTNER_ID", &self.partner_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Never prints the subscription key or the service token
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("partner_id", &self.partner_id)
            .field("port", &self.port)
            .field("ip_addr", &self.ip_addr)
            .field("upstream_url", &self.upstream_url.as_str())
            .finish_non_exhaustive()
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_ip_addr() -> IpAddr {
    DEFAULT_IP_ADDR
}
fn default_upstream_url() -> Url {
    DEFAULT_UPSTREAM_URL.clone()
}

/// The shared state of the reports API
#[derive(Debug)]
pub struct Application {
    pub config: Config,
    pub logger: Logger,
    pub upstream: UpstreamApi,
}

impl Application {
    pub fn new(config: Config, logger: Logger) -> Result<Self, upstream::Error> {
        Self::with_timeout(config, logger, upstream::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        config: Config,
        logger: Logger,
        timeout: Duration,
    ) -> Result<Self, upstream::Error> {
        let upstream = UpstreamApi::new(config.upstream_url.clone(), timeout)?;

        Ok(Self {
            config,
            logger,
            upstream,
        })
    }

    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/api", get(get_report))
            .fallback(not_found.into_service())
            .layer(Extension(self))
    }

    /// Starts the `axum` `Server` and runs it until Ctrl-C is received.
    pub async fn run(self, socket_addr: SocketAddr) {
        let logger = self.logger.clone();

        for name in self.config.missing_credentials() {
            warn!(&logger, "{} is not set, requests to the reporting API will likely be rejected", name; "main" => "run");
        }

        info!(&logger, "Listening on socket address: {}!", socket_addr);

        let router = Arc::new(self).router();
        let server = Server::bind(&socket_addr)
            .serve(router.into_make_service())
            .with_graceful_shutdown(shutdown_signal(logger.clone()));

        if let Err(e) = server.await {
            error!(&logger, "server error: {}", e; "main" => "run");
        }
    }
}

async fn not_found() -> ResponseError {
    ResponseError::NotFound
}

async fn shutdown_signal(logger: Logger) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(&logger, "Received Ctrl-C, shutting down"),
        Err(err) => error!(&logger, "Failed to listen for Ctrl-C: {}", err),
    }
}
