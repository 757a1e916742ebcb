//! Nominatim HTTP client
//!
//! Every endpoint is a `*_request` builder producing a [`RequestSpec`] plus
//! an async wrapper that hands it to [`NominatimClient::execute`]. `execute`
//! is the only place that touches the network, and it never returns an error:
//! all outcomes are folded into an [`ApiResult`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::NominatimConfig;
use crate::error::{CallFailure, NominatimError};
use crate::models::{ApiResult, DetailsParams, LookupParams, ReverseParams, SearchParams};
use crate::params::QueryParams;
use crate::request::{Endpoint, FixedHeaders, HttpMethod, RequestSpec};

/// Trait for Nominatim API clients
#[async_trait]
pub trait GeocodingApi: Send + Sync {
    /// Free-form forward geocoding
    async fn search(&self, params: &SearchParams) -> ApiResult;

    /// Coordinates to the nearest addressable place
    async fn reverse(&self, params: &ReverseParams) -> ApiResult;

    /// Address details for a list of OSM objects
    async fn lookup(&self, params: &LookupParams) -> ApiResult;

    /// Internal details for a single place
    async fn details(&self, params: &DetailsParams) -> ApiResult;

    /// Server and database status
    async fn status(&self) -> ApiResult;
}

/// Nominatim client over `reqwest`
///
/// Holds no mutable state; share it behind an `Arc` for concurrent use.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    headers: FixedHeaders,
    timeout_secs: u64,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, NominatimError> {
        config
            .validate()
            .map_err(NominatimError::ConfigurationError)?;

        let url = Url::parse(&config.base_url)
            .map_err(|e| NominatimError::InvalidBaseUrl(e.to_string()))?;
        let host = authority(&url)
            .ok_or_else(|| NominatimError::InvalidBaseUrl(config.base_url.clone()))?;

        HeaderValue::from_str(&config.user_agent).map_err(|e| NominatimError::InvalidHeader {
            name: "User-Agent",
            reason: e.to_string(),
        })?;

        if !config.verify_certificates {
            warn!(base_url = %config.base_url, "TLS certificate verification disabled");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_certificates)
            .build()
            .map_err(|e| NominatimError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: FixedHeaders::new(host, config.user_agent.clone()),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Create a client for the public OpenStreetMap instance
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, NominatimError> {
        Self::new(&NominatimConfig::default())
    }

    /// Base URL requests are sent to, without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, endpoint: Endpoint, params: &QueryParams) -> RequestSpec {
        RequestSpec::new(
            HttpMethod::Get,
            endpoint,
            params.encode(),
            self.headers.clone(),
        )
    }

    #[must_use]
    pub fn search_request(&self, params: &SearchParams) -> RequestSpec {
        self.get(Endpoint::Search, &params.to_query())
    }

    #[must_use]
    pub fn reverse_request(&self, params: &ReverseParams) -> RequestSpec {
        self.get(Endpoint::Reverse, &params.to_query())
    }

    #[must_use]
    pub fn lookup_request(&self, params: &LookupParams) -> RequestSpec {
        self.get(Endpoint::Lookup, &params.to_query())
    }

    #[must_use]
    pub fn details_request(&self, params: &DetailsParams) -> RequestSpec {
        self.get(Endpoint::Details, &params.to_query())
    }

    #[must_use]
    pub fn status_request(&self) -> RequestSpec {
        let mut params = QueryParams::new();
        params.push("format", "json");
        self.get(Endpoint::Status, &params)
    }

    /// Send a request and normalize the outcome
    ///
    /// 200 OK with a JSON body yields [`ApiResult::Success`]; any other
    /// status, a transport error or an unparseable body yields
    /// [`ApiResult::Failure`].
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn execute(&self, request: RequestSpec) -> ApiResult {
        match self.send(&request).await {
            Ok(payload) => {
                debug!("Nominatim call succeeded");
                ApiResult::Success(payload)
            },
            Err(failure) => {
                warn!(error = %failure, "Nominatim call failed");
                ApiResult::Failure(failure)
            },
        }
    }

    async fn send(&self, request: &RequestSpec) -> Result<Value, CallFailure> {
        let url = format!("{}{}", self.base_url, request.uri());
        debug!(%url, "Sending Nominatim request");

        let mut builder = self.client.request(request.method().into(), &url);
        for (name, value) in request.headers().pairs() {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CallFailure::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CallFailure::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CallFailure::from_transport(&e, self.timeout_secs))?;

        serde_json::from_slice(&body).map_err(|e| CallFailure::Parse(e.to_string()))
    }
}

#[async_trait]
impl GeocodingApi for NominatimClient {
    #[instrument(skip(self, params), fields(query = %params.query))]
    async fn search(&self, params: &SearchParams) -> ApiResult {
        self.execute(self.search_request(params)).await
    }

    #[instrument(skip(self, params), fields(lat = params.latitude, lon = params.longitude))]
    async fn reverse(&self, params: &ReverseParams) -> ApiResult {
        self.execute(self.reverse_request(params)).await
    }

    #[instrument(skip(self, params), fields(ids = params.osm_ids.len()))]
    async fn lookup(&self, params: &LookupParams) -> ApiResult {
        self.execute(self.lookup_request(params)).await
    }

    #[instrument(skip(self, params), fields(place_id = %params.place_id))]
    async fn details(&self, params: &DetailsParams) -> ApiResult {
        self.execute(self.details_request(params)).await
    }

    #[instrument(skip(self))]
    async fn status(&self) -> ApiResult {
        self.execute(self.status_request()).await
    }
}

/// `host[:port]` of a URL, the port only when it is not the scheme default
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputOptions;

    fn client() -> NominatimClient {
        NominatimClient::new(&NominatimConfig::for_testing()).unwrap()
    }

    #[test]
    fn test_search_request() {
        let req = client().search_request(&SearchParams::from("Paris"));
        assert_eq!(req.method(), HttpMethod::Get);
        assert_eq!(req.path(), "/search");
        assert_eq!(req.query(), "?q=Paris&format=json");
    }

    #[test]
    fn test_search_request_encodes_query() {
        let req = client().search_request(&SearchParams::new("Tour Eiffel & Champ-de-Mars"));
        assert_eq!(
            req.uri(),
            "/search?q=Tour%20Eiffel%20%26%20Champ-de-Mars&format=json"
        );
    }

    #[test]
    fn test_reverse_request() {
        let req = client().reverse_request(&ReverseParams::new(48.8566, 2.3522));
        assert_eq!(req.path(), "/reverse");
        assert_eq!(req.query(), "?lat=48.8566&lon=2.3522&format=json");
    }

    #[test]
    fn test_lookup_request() {
        let req = client().lookup_request(&LookupParams::new(["N240109189"]));
        assert_eq!(req.uri(), "/lookup?osm_ids=N240109189&format=json");
    }

    #[test]
    fn test_details_request() {
        let params = DetailsParams::new("12345").output(OutputOptions {
            polygon: Some(true),
            ..Default::default()
        });
        let req = client().details_request(&params);
        assert_eq!(req.uri(), "/details?place_id=12345&format=json&polygon=1");
    }

    #[test]
    fn test_status_request_ignores_configuration() {
        let configs = [
            NominatimConfig::default(),
            NominatimConfig::for_testing()
                .with_base_url("http://localhost:8080/nominatim/")
                .with_verify_certificates(false),
        ];
        for config in &configs {
            let req = NominatimClient::new(config).unwrap().status_request();
            assert_eq!(req.uri(), "/status?format=json");
            assert_eq!(req.method(), HttpMethod::Get);
        }
    }

    #[test]
    fn test_fixed_headers_from_default_config() {
        let client = NominatimClient::with_defaults().unwrap();
        let req = client.status_request();
        assert_eq!(req.headers().host(), "nominatim.openstreetmap.org");
        assert!(req.headers().user_agent().starts_with("nominatim-client/"));
    }

    #[test]
    fn test_host_header_keeps_explicit_port() {
        let config = NominatimConfig::for_testing().with_base_url("http://127.0.0.1:8088");
        let req = NominatimClient::new(&config).unwrap().status_request();
        assert_eq!(req.headers().host(), "127.0.0.1:8088");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = NominatimConfig::for_testing().with_base_url("http://localhost:8080/");
        let client = NominatimClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = NominatimConfig::for_testing().with_timeout_secs(0);
        let err = NominatimClient::new(&config).unwrap_err();
        assert!(matches!(err, NominatimError::ConfigurationError(_)));
    }

    #[test]
    fn test_base_url_with_query_is_rejected() {
        let config = NominatimConfig::for_testing().with_base_url("http://h.example/nom?key=abc");
        let err = NominatimClient::new(&config).unwrap_err();
        assert!(matches!(err, NominatimError::ConfigurationError(_)));
    }

    #[test]
    fn test_invalid_user_agent_is_rejected() {
        let config = NominatimConfig::for_testing().with_user_agent("bad\nagent");
        let err = NominatimClient::new(&config).unwrap_err();
        assert!(matches!(
            err,
            NominatimError::InvalidHeader {
                name: "User-Agent",
                ..
            }
        ));
    }

    #[test]
    fn test_execute_unreachable_host_is_failure() {
        let config = NominatimConfig::for_testing().with_base_url("http://127.0.0.1:1");
        let client = NominatimClient::new(&config).unwrap();

        let result = tokio_test::block_on(client.execute(client.status_request()));

        let failure = result.failure().unwrap();
        assert!(failure.message().starts_with("Exception: "));
        assert_eq!(failure.status(), None);
    }
}
