//! # Prometheus Instant-Query Client
//!
//! Thin wrapper over the Prometheus HTTP API v1 (`/api/v1/query`) that
//! fetches the current value of one series and turns it into an integer
//! percentage.
//!
//! ## Response Envelope
//!
//! ```text
//! {"status": "success",
//!  "data": {"resultType": "vector",
//!           "result": [{"metric": {...}, "value": [1700000000.123, "0.437"]}]}}
//!
//! {"status": "error", "errorType": "bad_data", "error": "..."}
//! ```
//!
//! Only the first sample of an instant vector is used.

use crate::config::{Config, QUERY_TIMEOUT};
use crate::domain::FetchError;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Path of the instant-query endpoint relative to the configured address
const QUERY_PATH: &str = "/api/v1/query";

/// Top-level API response
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<QueryData>,
    #[serde(rename = "errorType", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `data` member of a successful response. `result` is kept raw because its
/// shape depends on `resultType`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryData {
    pub result_type: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// One element of an instant vector
#[derive(Debug, Deserialize)]
pub struct InstantSample {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    /// `[unix_seconds, "value"]` - Prometheus sends the value as a string
    pub value: (f64, String),
}

/// Client bound to one backend address and one series
#[derive(Debug, Clone)]
pub struct MetricsClient {
    http: reqwest::Client,
    query_url: String,
    metric_name: String,
}

impl MetricsClient {
    /// Build a client for the configured endpoint with the standard
    /// [`QUERY_TIMEOUT`].
    ///
    /// # Errors
    /// `MissingEndpoint` when the address is empty, `ClientBuild` when it is
    /// not an http(s) URL or the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_timeout(config, QUERY_TIMEOUT)
    }

    /// Same as [`MetricsClient::new`] with a custom per-request timeout.
    ///
    /// # Errors
    /// See [`MetricsClient::new`].
    pub fn with_timeout(config: &Config, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = config.prometheus_url.trim();
        if endpoint.is_empty() {
            return Err(FetchError::MissingEndpoint);
        }

        let client_build = |reason: String| FetchError::ClientBuild {
            endpoint: endpoint.to_string(),
            reason,
        };

        let url = reqwest::Url::parse(endpoint).map_err(|e| client_build(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(client_build(format!("unsupported scheme \"{}\"", url.scheme())));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| client_build(e.to_string()))?;

        Ok(Self {
            http,
            query_url: format!("{}{QUERY_PATH}", endpoint.trim_end_matches('/')),
            metric_name: config.metric_name.clone(),
        })
    }

    /// Run one instant query evaluated at `at`.
    ///
    /// # Errors
    /// `Query` on transport failure, timeout or undecodable body; `Api` when
    /// the backend answers with `status: error`.
    pub async fn query_instant(
        &self,
        query: &str,
        at: DateTime<Utc>,
    ) -> Result<QueryResponse, FetchError> {
        let time = format_query_time(at);
        let response = self
            .http
            .get(&self.query_url)
            .query(&[("query", query), ("time", time.as_str())])
            .send()
            .await?;

        let body: QueryResponse = response.json().await?;
        if body.status != "success" {
            return Err(FetchError::Api {
                error_type: body.error_type.unwrap_or_else(|| body.status.clone()),
                message: body.error.unwrap_or_default(),
            });
        }
        Ok(body)
    }

    /// Query the configured series at "now" and convert it to a percentage.
    ///
    /// # Errors
    /// Any [`FetchError`] from the query or from [`extract_percentage`].
    pub async fn fetch_percentage(&self) -> Result<i64, FetchError> {
        let response = self.query_instant(&self.metric_name, Utc::now()).await?;
        extract_percentage(response)
    }

    #[must_use]
    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

/// Take the first sample of an instant vector and convert it.
///
/// # Errors
/// `UnexpectedResultType` for anything but a vector, `NoData` for an empty
/// vector, `InvalidSample` for a non-numeric value, `Format` when the scaled
/// value has no integer representation.
pub fn extract_percentage(response: QueryResponse) -> Result<i64, FetchError> {
    let data = response.data.ok_or(FetchError::NoData)?;
    if data.result_type != "vector" {
        return Err(FetchError::UnexpectedResultType(data.result_type));
    }

    let samples: Vec<InstantSample> = serde_json::from_value(data.result)
        .map_err(|e| FetchError::InvalidSample(e.to_string()))?;
    let first = samples.into_iter().next().ok_or(FetchError::NoData)?;

    let raw = &first.value.1;
    let value: f64 = raw.parse().map_err(|_| FetchError::InvalidSample(raw.clone()))?;

    debug!("Sample {raw} for {}", first.metric.get("__name__").map_or("?", String::as_str));
    to_percentage(value)
}

/// Scale a ratio to a whole percentage.
///
/// Rounds to two decimals first and then formats with zero decimals, which
/// matches the values already shown by deployed displays (ties go to even).
///
/// # Errors
/// `Format` for NaN, infinities and values outside the `i64` range.
pub fn to_percentage(value: f64) -> Result<i64, FetchError> {
    let scaled = value * 100.0;
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{rounded:.0}").parse::<i64>().map_err(|_| FetchError::Format(scaled))
}

/// Prometheus accepts RFC 3339 or fractional unix seconds; the latter is shorter.
fn format_query_time(at: DateTime<Utc>) -> String {
    format!("{}.{:03}", at.timestamp(), at.timestamp_subsec_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(body: &str) -> QueryResponse {
        serde_json::from_str(body).expect("valid response JSON")
    }

    fn config(url: &str) -> Config {
        Config {
            prometheus_url: url.to_string(),
            metric_name: "entsoe_generation_eco".to_string(),
            pull_period: Duration::from_secs(60),
        }
    }

    #[test]
    fn test_to_percentage_double_rounding() {
        assert_eq!(to_percentage(0.437).unwrap(), 44);
        assert_eq!(to_percentage(0.4349).unwrap(), 43);
        assert_eq!(to_percentage(1.0).unwrap(), 100);
        assert_eq!(to_percentage(0.0).unwrap(), 0);
        assert_eq!(to_percentage(1.73).unwrap(), 173);
    }

    #[test]
    fn test_to_percentage_ties_to_even() {
        // 0.125 is exact in binary: 12.5 -> "12"
        assert_eq!(to_percentage(0.125).unwrap(), 12);
        // 0.375 is exact in binary: 37.5 -> "38"
        assert_eq!(to_percentage(0.375).unwrap(), 38);
    }

    #[test]
    fn test_to_percentage_rejects_non_finite() {
        assert!(matches!(to_percentage(f64::NAN), Err(FetchError::Format(_))));
        assert!(matches!(to_percentage(f64::INFINITY), Err(FetchError::Format(_))));
        assert!(matches!(to_percentage(1e30), Err(FetchError::Format(_))));
    }

    #[test]
    fn test_extract_first_sample() {
        let response = parse(
            r#"{"status":"success","data":{"resultType":"vector","result":[
                {"metric":{"__name__":"entsoe_generation_eco","zone":"DE"},"value":[1700000000.5,"0.437"]},
                {"metric":{"__name__":"entsoe_generation_eco","zone":"FR"},"value":[1700000000.5,"0.9"]}
            ]}}"#,
        );
        assert_eq!(extract_percentage(response).unwrap(), 44);
    }

    #[test]
    fn test_extract_empty_vector_is_no_data() {
        let response = parse(r#"{"status":"success","data":{"resultType":"vector","result":[]}}"#);
        assert!(matches!(extract_percentage(response), Err(FetchError::NoData)));
    }

    #[test]
    fn test_extract_scalar_is_rejected() {
        let response =
            parse(r#"{"status":"success","data":{"resultType":"scalar","result":[1700000000,"1"]}}"#);
        match extract_percentage(response) {
            Err(FetchError::UnexpectedResultType(kind)) => assert_eq!(kind, "scalar"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_extract_non_numeric_value() {
        let response = parse(
            r#"{"status":"success","data":{"resultType":"vector","result":[{"metric":{},"value":[1,"abc"]}]}}"#,
        );
        assert!(matches!(extract_percentage(response), Err(FetchError::InvalidSample(_))));
    }

    #[test]
    fn test_extract_without_data_is_no_data() {
        let response = parse(r#"{"status":"success"}"#);
        assert!(matches!(extract_percentage(response), Err(FetchError::NoData)));
    }

    #[test]
    fn test_new_requires_endpoint() {
        assert!(matches!(MetricsClient::new(&config("")), Err(FetchError::MissingEndpoint)));
        assert!(matches!(MetricsClient::new(&config("   ")), Err(FetchError::MissingEndpoint)));
    }

    #[test]
    fn test_new_rejects_bad_address() {
        let err = MetricsClient::new(&config("not a url")).unwrap_err();
        assert!(matches!(err, FetchError::ClientBuild { .. }));
        assert!(err.is_configuration());

        let err = MetricsClient::new(&config("ftp://prometheus:21")).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_query_url_joins_path() {
        let client = MetricsClient::new(&config("http://prometheus:9090/")).unwrap();
        assert_eq!(client.query_url(), "http://prometheus:9090/api/v1/query");

        let client = MetricsClient::new(&config("https://metrics.example/prom")).unwrap();
        assert_eq!(client.query_url(), "https://metrics.example/prom/api/v1/query");
    }

    #[test]
    fn test_format_query_time() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_042).unwrap();
        assert_eq!(format_query_time(at), "1700000000.042");
    }
}
