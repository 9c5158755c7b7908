//! Geocoder configuration.
//!
//! [`GeocoderBuilder`] collects settings in call order (later calls override
//! earlier ones). On [`build`](GeocoderBuilder::build) the `MAPBOX_ACCESS_TOKEN`
//! environment variable, when set and non-empty, replaces the access token, and
//! the URL prefix and access token fragment are rendered once for the lifetime
//! of the geocoder.

use crate::{
    client::Geocoder,
    logger::{Logger, LoggerConfig},
    transport::{HttpTransport, ReqwestTransport},
    Result,
};
use http::Extensions;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Default root of the Mapbox API.
pub const DEFAULT_ROOT_API: &str = "https://api.mapbox.com";

/// Default geocoding endpoint. `mapbox.places-permanent` is the other option.
pub const DEFAULT_GEOCODE_ENDPOINT: &str = "mapbox.places";

/// Environment variable that overrides the configured access token.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

const GEOCODE_PATH: &str = "/geocoding/v5/";

/// Settings a [`Geocoder`] is built from.
#[derive(Clone)]
pub struct Config {
    access_token: String,
    root_api: String,
    geocode_endpoint: String,
    transport: Option<Arc<dyn HttpTransport>>,
    loggers: LoggerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            root_api: DEFAULT_ROOT_API.to_string(),
            geocode_endpoint: DEFAULT_GEOCODE_ENDPOINT.to_string(),
            transport: None,
            loggers: LoggerConfig::default(),
        }
    }
}

impl Config {
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn root_api(&self) -> &str {
        &self.root_api
    }

    pub fn geocode_endpoint(&self) -> &str {
        &self.geocode_endpoint
    }

    /// Replaces the access token with `MAPBOX_ACCESS_TOKEN` if it is set and non-empty.
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`with_env`](Self::with_env) with a custom variable lookup.
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(ACCESS_TOKEN_ENV).filter(|t| !t.is_empty()) {
            self.access_token = token;
        }
        self
    }

    /// Renders the parts of every request URI that never change.
    pub(crate) fn prepare(self) -> Result<PreparedConfig> {
        let access_token_query = format!("?access_token={}", self.access_token);
        let geocode_url = format!(
            "{}{}{}/",
            self.root_api, GEOCODE_PATH, self.geocode_endpoint
        );

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(PreparedConfig {
            geocode_url,
            access_token_query,
            transport,
            loggers: self.loggers,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_token", &redact(&self.access_token))
            .field("root_api", &self.root_api)
            .field("geocode_endpoint", &self.geocode_endpoint)
            .field("custom_transport", &self.transport.is_some())
            .field("loggers", &self.loggers)
            .finish()
    }
}

/// Configuration frozen into a geocoder.
pub(crate) struct PreparedConfig {
    /// `<root>/geocoding/v5/<endpoint>/`
    pub(crate) geocode_url: String,
    /// `?access_token=<token>`
    pub(crate) access_token_query: String,
    pub(crate) transport: Arc<dyn HttpTransport>,
    pub(crate) loggers: LoggerConfig,
}

impl fmt::Debug for PreparedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedConfig")
            .field("geocode_url", &self.geocode_url)
            .field("loggers", &self.loggers)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring and creating a [`Geocoder`].
///
/// # Examples
///
/// ```no_run
/// use mapbox_geocoding::{Geocoder, TracingLogger};
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), mapbox_geocoding::Error> {
/// let geocoder = Geocoder::builder()
///     .access_token("pk.my-token")
///     .geocode_endpoint("mapbox.places-permanent")
///     .logger(Arc::new(TracingLogger))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GeocoderBuilder {
    config: Config,
}

impl GeocoderBuilder {
    /// Creates a new builder targeting the public Mapbox API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `access_token` sent with every request.
    ///
    /// `MAPBOX_ACCESS_TOKEN` takes precedence when it is set.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = token.into();
        self
    }

    /// Replaces the default reqwest-based transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    /// Sets the root API address. Defaults to `https://api.mapbox.com`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn root_api(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        Url::parse(url)?;
        self.config.root_api = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Sets the geocoding endpoint. Defaults to `mapbox.places`.
    pub fn geocode_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.geocode_endpoint = endpoint.into();
        self
    }

    /// Sets the logger receiving request and response traces.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.config.loggers.logger = Some(logger);
        self
    }

    /// Sets a function picking the logger for each call from the extensions
    /// passed to the `*_with_context` methods. Used instead of
    /// [`logger`](Self::logger) when both are set.
    pub fn request_logger<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&Extensions) -> Option<Arc<dyn Logger>> + Send + Sync + 'static,
    {
        self.config.loggers.resolver = Some(Arc::new(resolve));
        self
    }

    /// Returns the configuration collected so far.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the configured [`Geocoder`], applying the environment override.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP transport cannot be created.
    pub fn build(self) -> Result<Geocoder> {
        finish(self.config.with_env())
    }

    /// Like [`build`](Self::build), with a custom environment lookup.
    pub fn build_with_env(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Geocoder> {
        finish(self.config.with_env_lookup(lookup))
    }
}

fn finish(config: Config) -> Result<Geocoder> {
    let prepared = config.prepare()?;
    tracing::debug!(
        geocode_url = %prepared.geocode_url,
        "Configured geocoder"
    );
    Ok(Geocoder::from_prepared(prepared))
}

fn redact(token: &str) -> &str {
    if token.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}
