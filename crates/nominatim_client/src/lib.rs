#![forbid(unsafe_code)]
//! Async client for the OpenStreetMap Nominatim API
//!
//! Wraps the [Nominatim](https://nominatim.openstreetmap.org) endpoints
//! `/search`, `/reverse`, `/lookup`, `/details` and `/status`. Each call
//! encodes its parameters, sends one GET request and returns an
//! [`ApiResult`]: the parsed JSON on 200 OK, or a [`CallFailure`] for any
//! other status, transport error or malformed body. Calls never return `Err`.
//!
//! # Architecture
//!
//! [`GeocodingApi`] defines the five operations and is implemented by
//! [`NominatimClient`]. Parameters are typed per endpoint ([`SearchParams`],
//! [`ReverseParams`], [`LookupParams`], [`DetailsParams`]) and encoded by
//! [`QueryParams`]; requests are described as [`RequestSpec`] values before
//! [`NominatimClient::execute`] sends them.
//!
//! # Example
//!
//! ```rust,ignore
//! use nominatim_client::{GeocodingApi, NominatimClient, NominatimConfig, SearchParams};
//!
//! let client = NominatimClient::new(&NominatimConfig::default())?;
//!
//! let result = client.search(&SearchParams::new("Brandenburger Tor").limit(1)).await;
//! match result.payload() {
//!     Some(places) => println!("{places}"),
//!     None => eprintln!("{}", result.error_message().unwrap_or_default()),
//! }
//! ```

mod client;
mod config;
mod error;
mod models;
mod params;
mod request;

pub use client::{GeocodingApi, NominatimClient};
pub use config::NominatimConfig;
pub use error::{CallFailure, NominatimError};
pub use models::{
    ApiResult, DetailsParams, LookupParams, OutputOptions, ReverseParams, SearchParams,
};
pub use params::{QueryParams, encode_component};
pub use request::{CONTENT_TYPE_JSON, Endpoint, FixedHeaders, HttpMethod, RequestSpec};
