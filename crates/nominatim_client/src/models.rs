//! Call results and per-endpoint parameters

use serde_json::{Value, json};

use crate::error::CallFailure;
use crate::params::QueryParams;

/// Normalized outcome of one API call
///
/// Exactly one variant is populated. Transport errors, non-200 statuses and
/// unparseable bodies all arrive as [`ApiResult::Failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult {
    /// 200 OK with a JSON body, passed through untouched
    Success(Value),
    /// Anything else
    Failure(CallFailure),
}

impl ApiResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The JSON payload, if the call succeeded
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    /// The failure, if the call did not succeed
    #[must_use]
    pub const fn failure(&self) -> Option<&CallFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Flattened failure message (`HTTP Error: ...` / `Exception: ...`)
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.failure().map(CallFailure::message)
    }

    /// Convert into a `Result` for `?`-style callers
    pub fn into_result(self) -> Result<Value, CallFailure> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Failure(failure) => Err(failure),
        }
    }

    /// Render as a single JSON value
    ///
    /// Success yields the payload itself; failure yields
    /// `{"success": false, "error": "<message>"}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success(payload) => payload.clone(),
            Self::Failure(failure) => json!({
                "success": false,
                "error": failure.message(),
            }),
        }
    }
}

/// Output options shared by search, reverse, lookup and details
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Include a breakdown of the address into elements
    pub addressdetails: Option<bool>,
    /// Include the full outline geometry
    pub polygon: Option<bool>,
    /// Contact address for large request volumes
    pub email: Option<String>,
}

/// Parameters for `/search`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    /// Free-form query
    pub query: String,
    pub limit: Option<u32>,
    /// Comma-separated ISO 3166-1 alpha-2 codes
    pub countrycodes: Option<String>,
    /// `x1,y1,x2,y2`
    pub viewbox: Option<String>,
    /// Restrict results to the viewbox
    pub bounded: Option<bool>,
    /// Comma-separated place ids to skip
    pub exclude_place_ids: Option<String>,
    pub output: OutputOptions,
}

impl SearchParams {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn countrycodes(mut self, codes: impl Into<String>) -> Self {
        self.countrycodes = Some(codes.into());
        self
    }

    #[must_use]
    pub fn viewbox(mut self, viewbox: impl Into<String>) -> Self {
        self.viewbox = Some(viewbox.into());
        self
    }

    #[must_use]
    pub fn bounded(mut self, bounded: bool) -> Self {
        self.bounded = Some(bounded);
        self
    }

    #[must_use]
    pub fn exclude_place_ids(mut self, ids: impl Into<String>) -> Self {
        self.exclude_place_ids = Some(ids.into());
        self
    }

    #[must_use]
    pub fn output(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    /// Query parameters in wire order
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("q", self.query.as_str())
            .push("format", "json")
            .push_flag("addressdetails", self.output.addressdetails)
            .push_opt("limit", self.limit)
            .push_opt("countrycodes", self.countrycodes.as_deref())
            .push_opt("viewbox", self.viewbox.as_deref())
            .push_flag("bounded", self.bounded)
            .push_opt("exclude_place_ids", self.exclude_place_ids.as_deref())
            .push_flag("polygon", self.output.polygon)
            .push_opt("email", self.output.email.as_deref());
        params
    }
}

impl From<&str> for SearchParams {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

/// Parameters for `/reverse`
///
/// Coordinates are sent as given; out-of-range values are left for the
/// server to reject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReverseParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Level of detail, 0 (country) to 18 (building)
    pub zoom: Option<u8>,
    pub output: OutputOptions,
}

impl ReverseParams {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn zoom(mut self, zoom: u8) -> Self {
        self.zoom = Some(zoom);
        self
    }

    #[must_use]
    pub fn output(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("lat", self.latitude.to_string())
            .push("lon", self.longitude.to_string())
            .push("format", "json")
            .push_opt("zoom", self.zoom)
            .push_flag("addressdetails", self.output.addressdetails)
            .push_flag("polygon", self.output.polygon)
            .push_opt("email", self.output.email.as_deref());
        params
    }
}

/// Parameters for `/lookup`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupParams {
    /// OSM ids such as `N240109189`, `W50637691`, `R146656`
    pub osm_ids: Vec<String>,
    pub output: OutputOptions,
}

impl LookupParams {
    #[must_use]
    pub fn new<I, S>(osm_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            osm_ids: osm_ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn output(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("osm_ids", self.osm_ids.join(","))
            .push("format", "json")
            .push_flag("addressdetails", self.output.addressdetails)
            .push_flag("polygon", self.output.polygon)
            .push_opt("email", self.output.email.as_deref());
        params
    }
}

/// Parameters for `/details`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsParams {
    pub place_id: String,
    pub output: OutputOptions,
}

impl DetailsParams {
    #[must_use]
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn output(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("place_id", self.place_id.as_str())
            .push("format", "json")
            .push_flag("addressdetails", self.output.addressdetails)
            .push_flag("polygon", self.output.polygon)
            .push_opt("email", self.output.email.as_deref());
        params
    }
}
