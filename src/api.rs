// Hotel data API client
// Single point of contact with the vendor hotel API: auth headers, parameter defaults,
// error classification and response normalization all live here.

use crate::config::ClientConfig;
use crate::models::{Destination, HotelDetails, HotelSummary, Review, Room};
use crate::query::{today, HotelDetailsQuery, HotelSearchQuery, QueryParams, RoomAvailabilityQuery};
use crate::vendor::{VendorDestination, VendorEnvelope, VendorHotelItem, VendorReview, VendorRoom};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub const API_KEY_HEADER: &str = "x-rapidapi-key";
pub const API_HOST_HEADER: &str = "x-rapidapi-host";

const SEARCH_DESTINATION_PATH: &str = "/hotels/searchDestination";
const SEARCH_HOTELS_PATH: &str = "/hotels/searchHotels";
const HOTEL_DETAILS_PATH: &str = "/hotels/getHotelDetails";
const ROOM_AVAILABILITY_PATH: &str = "/hotels/getRoomAvailability";
const HOTEL_REVIEWS_PATH: &str = "/hotels/getHotelReviews";

const REVIEWS_SORT_ORDER: &str = "relevance_desc";

// Request failures, classified so callers can pick between a retry and an empty state
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkFailure(String),

    #[error("Server error: {status_code} - {message}")]
    ServerError { status_code: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponseShape(String),

    #[error(
        "Hotel details not found for {}: {}",
        .hotel_id,
        .message.as_deref().unwrap_or("unknown error")
    )]
    DetailsNotFound {
        hotel_id: String,
        message: Option<String>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    // True when a repeated request might succeed (the UI offers a retry).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::NetworkFailure(_) | ApiError::ServerError { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

#[async_trait]
pub trait HotelApi: Send + Sync + 'static {
    // Destinations (cities, regions, hotels, airports) matching free text
    async fn search_locations(&self, query: &str) -> Result<Vec<Destination>, ApiError>;

    // Hotels for a destination returned by `search_locations`
    async fn search_hotels(&self, query: HotelSearchQuery)
        -> Result<Vec<HotelSummary>, ApiError>;

    // Vendor detail record; dates default to a week starting today
    async fn get_hotel_details(
        &self,
        hotel_id: &str,
        query: HotelDetailsQuery,
    ) -> Result<HotelDetails, ApiError>;

    // Rooms bookable for the stay; an empty list means nothing is available
    async fn get_room_availability(
        &self,
        hotel_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
    ) -> Result<Vec<Room>, ApiError>;

    async fn get_hotel_reviews(&self, hotel_id: &str) -> Result<Vec<Review>, ApiError>;
}

// Client for the vendor hotel API.
//
// Cloning is cheap: clones share the configuration and the pooled HTTP client.
// Nothing is cached between calls and nothing is retried.
#[derive(Debug, Clone)]
pub struct HotelDataClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl HotelDataClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ClientError::ConfigError(format!("invalid api_key: {}", e)))?;
        api_key.set_sensitive(true);
        let api_host = HeaderValue::from_str(&config.api_host)
            .map_err(|e| ClientError::ConfigError(format!("invalid api_host: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(HeaderName::from_static(API_HOST_HEADER), api_host);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get(&self, path: &str, params: &QueryParams) -> Result<VendorEnvelope, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(method = "GET", path, "API request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(path, error = %e, "API no response");
                ApiError::NetworkFailure(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(path, error = %e, "API response body unreadable");
            ApiError::NetworkFailure(e.to_string())
        })?;

        if !status.is_success() {
            return Err(classify_failure(path, status, &body));
        }

        parse_envelope(path, &body)
    }
}

fn classify_failure(path: &str, status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::error!(path, "API rate limit exceeded");
    }

    let body = body.trim();
    if body.is_empty() {
        tracing::error!(path, status = status.as_u16(), "API error response without body");
        return ApiError::NetworkFailure(format!("{} returned {} with no body", path, status));
    }

    let message = serde_json::from_str::<VendorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.message_text())
        .unwrap_or_else(|| body.to_string());

    tracing::error!(path, status = status.as_u16(), body, "API error response");
    ApiError::ServerError {
        status_code: status.as_u16(),
        message,
    }
}

fn parse_envelope(path: &str, body: &str) -> Result<VendorEnvelope, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        tracing::warn!(path, error = %e, "API response is not JSON");
        ApiError::UnexpectedResponseShape(format!("{}: {}", path, e))
    })?;

    if !value.is_object() {
        tracing::warn!(path, "API response is not a JSON object");
        return Err(ApiError::UnexpectedResponseShape(format!(
            "{}: expected a JSON object",
            path
        )));
    }

    VendorEnvelope::deserialize(&value)
        .map_err(|e| ApiError::UnexpectedResponseShape(format!("{}: {}", path, e)))
}

// Only non-object items are dropped. Mistyped fields fall back to their defaults
// inside the vendor structs, so one bad field never costs the whole item.
fn normalize_items<V, T>(path: &str, items: &[Value]) -> Vec<T>
where
    V: DeserializeOwned,
    T: From<V>,
{
    items
        .iter()
        .filter_map(|item| {
            if !item.is_object() {
                tracing::warn!(path, item = %item, "skipping non-object vendor item");
                return None;
            }
            match V::deserialize(item) {
                Ok(vendor) => Some(T::from(vendor)),
                Err(e) => {
                    tracing::warn!(path, error = %e, "skipping unreadable vendor item");
                    None
                }
            }
        })
        .collect()
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[async_trait]
impl HotelApi for HotelDataClient {
    async fn search_locations(&self, query: &str) -> Result<Vec<Destination>, ApiError> {
        require_non_empty("query", query)?;

        let params = vec![
            ("query", query.trim().to_string()),
            ("languagecode", self.config.locale.clone()),
        ];

        let envelope = match self.get(SEARCH_DESTINATION_PATH, &params).await {
            Ok(envelope) => envelope,
            Err(ApiError::UnexpectedResponseShape(reason)) => {
                tracing::warn!(%reason, "unexpected location search response, returning no destinations");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        match envelope.data {
            Some(Value::Array(items)) => Ok(normalize_items::<VendorDestination, Destination>(
                SEARCH_DESTINATION_PATH,
                &items,
            )),
            _ => {
                tracing::warn!(
                    path = SEARCH_DESTINATION_PATH,
                    "unexpected response shape: data is not an array"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn search_hotels(
        &self,
        query: HotelSearchQuery,
    ) -> Result<Vec<HotelSummary>, ApiError> {
        require_non_empty("destination_id", &query.destination_id)?;
        require_non_empty("search_type", &query.search_type)?;

        let params = query.to_params(&self.config.locale);
        let envelope = self.get(SEARCH_HOTELS_PATH, &params).await?;

        match envelope.data_list("hotels") {
            Some(items) => Ok(normalize_items::<VendorHotelItem, HotelSummary>(
                SEARCH_HOTELS_PATH,
                items,
            )),
            None => {
                tracing::info!(
                    destination_id = %query.destination_id,
                    outcome = "no_results",
                    "hotel search returned no hotel list"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn get_hotel_details(
        &self,
        hotel_id: &str,
        query: HotelDetailsQuery,
    ) -> Result<HotelDetails, ApiError> {
        require_non_empty("hotel_id", hotel_id)?;

        let params = query.to_params(hotel_id, &self.config.locale, today());
        let envelope = self.get(HOTEL_DETAILS_PATH, &params).await?;

        if !envelope.is_success() {
            let message = envelope.message_text();
            tracing::error!(hotel_id, message = ?message, "hotel details request rejected");
            return Err(ApiError::DetailsNotFound {
                hotel_id: hotel_id.to_string(),
                message,
            });
        }

        match envelope.data {
            Some(data @ Value::Object(_)) => Ok(HotelDetails::from(data)),
            _ => {
                tracing::warn!(hotel_id, "hotel details response carries no data object");
                Err(ApiError::UnexpectedResponseShape(format!(
                    "{}: missing data object",
                    HOTEL_DETAILS_PATH
                )))
            }
        }
    }

    async fn get_room_availability(
        &self,
        hotel_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
    ) -> Result<Vec<Room>, ApiError> {
        require_non_empty("hotel_id", hotel_id)?;

        let query = RoomAvailabilityQuery {
            hotel_id: hotel_id.to_string(),
            arrival_date: check_in,
            departure_date: check_out,
            adults,
        };
        let envelope = self
            .get(ROOM_AVAILABILITY_PATH, &query.to_params(&self.config.locale))
            .await?;

        let rooms = if envelope.is_success() {
            envelope.data_list("rooms")
        } else {
            None
        };

        match rooms {
            Some(items) => Ok(normalize_items::<VendorRoom, Room>(
                ROOM_AVAILABILITY_PATH,
                items,
            )),
            None => {
                tracing::info!(hotel_id, %check_in, %check_out, "no rooms available for the selected dates");
                Ok(Vec::new())
            }
        }
    }

    async fn get_hotel_reviews(&self, hotel_id: &str) -> Result<Vec<Review>, ApiError> {
        require_non_empty("hotel_id", hotel_id)?;

        let params = vec![
            ("hotel_id", hotel_id.to_string()),
            ("languagecode", self.config.locale.clone()),
            ("sort_by", REVIEWS_SORT_ORDER.to_string()),
        ];
        let envelope = self.get(HOTEL_REVIEWS_PATH, &params).await?;

        Ok(envelope
            .data_list("result")
            .map(|items| normalize_items::<VendorReview, Review>(HOTEL_REVIEWS_PATH, items))
            .unwrap_or_default())
    }
}

// Races an operation against a cancellation token.
//
// Dropping the operation future aborts its in-flight request.
pub async fn cancellable<F, T>(token: &CancellationToken, operation: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            tracing::debug!("API request cancelled by caller");
            Err(ApiError::Cancelled)
        }
        result = operation => result,
    }
}


#[cfg(test)]
mod tests {
    use super::mock_vendor::{params, MockVendor};
    use super::*;
    use crate::models::DestinationType;
    use crate::query::{format_date, default_stay};
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_client_rejects_missing_credentials() {
        let result = HotelDataClient::new(ClientConfig::new("", "host"));
        assert!(matches!(result, Err(ClientError::ConfigError(_))));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::NetworkFailure("reset".to_string()).is_retryable());
        assert!(ApiError::ServerError {
            status_code: 500,
            message: "boom".to_string()
        }
        .is_retryable());
        assert!(!ApiError::UnexpectedResponseShape("x".to_string()).is_retryable());
        assert!(!ApiError::DetailsNotFound {
            hotel_id: "1".to_string(),
            message: None
        }
        .is_retryable());
    }

    #[test]
    fn test_details_not_found_message() {
        let error = ApiError::DetailsNotFound {
            hotel_id: "191605".to_string(),
            message: Some("Hotel closed".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Hotel details not found for 191605: Hotel closed"
        );
    }

    #[tokio::test]
    async fn test_search_locations_normalizes_items() {
        let mut vendor = MockVendor::start().await;
        let body = json!({
            "status": true,
            "data": [
                {"dest_id": "-2092174", "dest_type": "city", "name": "Mumbai", "country": "India",
                 "search_type": "city", "nr_hotels": 1733, "latitude": 19.07, "longitude": 72.87},
                {"dest_id": "191605", "dest_type": "hotel", "name": "The Taj Mahal Palace"},
                "not-an-object"
            ]
        })
        .to_string();
        let mock = vendor
            .respond(
                "/hotels/searchDestination",
                params(&[("query", "mumbai"), ("languagecode", "en-us")]),
                200,
                &body,
            )
            .await;

        let destinations = vendor.client().search_locations("mumbai").await.unwrap();

        mock.assert_async().await;
        assert_eq!(destinations.len(), 2);
        assert_eq!(destinations[0].destination_id, "-2092174");
        assert_eq!(destinations[0].label, "Mumbai, India");
        assert_eq!(destinations[0].hotel_count, 1733);
        assert_eq!(destinations[1].destination_type, DestinationType::Hotel);
        assert_eq!(destinations[1].hotel_count, 0);
    }

    #[tokio::test]
    async fn test_search_locations_keeps_items_with_mistyped_fields() {
        let mut vendor = MockVendor::start().await;
        let body = json!({
            "status": true,
            "data": [
                {"dest_id": "-2092174", "dest_type": "city", "name": "Mumbai", "nr_hotels": "1733"},
                {"dest_id": "4127", "dest_type": "region", "name": "Goa", "latitude": "15.2"}
            ]
        })
        .to_string();
        vendor
            .respond("/hotels/searchDestination", Matcher::Any, 200, &body)
            .await;

        let destinations = vendor.client().search_locations("india").await.unwrap();

        assert_eq!(destinations.len(), 2);
        assert_eq!(destinations[0].hotel_count, 1733);
        assert_eq!(destinations[1].latitude, Some(15.2));
        assert_eq!(destinations[1].destination_type, DestinationType::Region);
    }

    #[tokio::test]
    async fn test_search_locations_server_error_with_message() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond(
                "/hotels/searchDestination",
                Matcher::Any,
                500,
                &json!({"message": "Internal upstream error"}).to_string(),
            )
            .await;

        let error = vendor.client().search_locations("mumbai").await.unwrap_err();

        match error {
            ApiError::ServerError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 500);
                assert_eq!(message, "Internal upstream error");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_locations_bad_gateway_without_body_is_network_failure() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond("/hotels/searchDestination", Matcher::Any, 502, "")
            .await;

        let error = vendor.client().search_locations("mumbai").await.unwrap_err();
        assert!(matches!(error, ApiError::NetworkFailure(_)));
    }

    #[tokio::test]
    async fn test_search_locations_non_array_payload_is_empty() {
        for body in [
            json!({"status": true, "data": {"unexpected": 1}}).to_string(),
            json!({"status": true}).to_string(),
            "<html>gateway</html>".to_string(),
        ] {
            let mut vendor = MockVendor::start().await;
            vendor
                .respond("/hotels/searchDestination", Matcher::Any, 200, &body)
                .await;

            let destinations = vendor.client().search_locations("goa").await.unwrap();
            assert!(destinations.is_empty(), "body {} should yield no results", body);
        }
    }

    #[tokio::test]
    async fn test_search_locations_empty_query_never_hits_network() {
        let mut vendor = MockVendor::start().await;
        let mock = vendor
            .respond_times("/hotels/searchDestination", Matcher::Any, 200, "{}", 0)
            .await;

        let result = vendor.client().search_locations("   ").await;

        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_hotels_scenario() {
        let mut vendor = MockVendor::start().await;
        let body = json!({
            "status": true,
            "data": {
                "hotels": [{
                    "hotel_id": 191605,
                    "property": {
                        "id": 191605,
                        "name": "The Taj Mahal Palace",
                        "priceBreakdown": {"grossPrice": {"value": 150, "currency": "USD"}}
                    }
                }]
            }
        })
        .to_string();
        let mock = vendor
            .respond(
                "/hotels/searchHotels",
                params(&[
                    ("dest_id", "-2092174"),
                    ("search_type", "CITY"),
                    ("adults", "1"),
                    ("children_age", "0,17"),
                    ("room_qty", "1"),
                    ("page_number", "1"),
                    ("currency_code", "USD"),
                ]),
                200,
                &body,
            )
            .await;

        let hotels = vendor
            .client()
            .search_hotels(HotelSearchQuery::new("-2092174", "CITY"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].id, "191605");
        assert_eq!(hotels[0].price.amount, 150.0);
        assert_eq!(hotels[0].price.currency_code, "USD");
        assert_eq!(hotels[0].review_score, 0.0);
    }

    #[tokio::test]
    async fn test_search_hotels_keeps_items_with_mistyped_fields() {
        let mut vendor = MockVendor::start().await;
        let body = json!({
            "status": true,
            "data": {
                "hotels": [
                    {"hotel_id": 1, "property": {
                        "id": 1,
                        "name": "Sea Breeze",
                        "reviewCount": "12",
                        "priceBreakdown": {"grossPrice": {"value": 150, "currency": "USD"}}
                    }},
                    {"hotel_id": 2, "property": null},
                    {"hotel_id": 3, "property": {"id": 3, "name": "Hilltop", "latitude": "18.9"}},
                    42
                ]
            }
        })
        .to_string();
        vendor
            .respond("/hotels/searchHotels", Matcher::Any, 200, &body)
            .await;

        let hotels = vendor
            .client()
            .search_hotels(HotelSearchQuery::new("-2092174", "CITY"))
            .await
            .unwrap();

        assert_eq!(hotels.len(), 3);
        assert_eq!(hotels[0].review_count, 12);
        assert_eq!(hotels[0].price.amount, 150.0);
        assert_eq!(hotels[1].id, "2");
        assert_eq!(hotels[1].name, "");
        assert_eq!(hotels[1].price.currency_code, "USD");
        assert_eq!(hotels[2].latitude, Some(18.9));
    }

    #[tokio::test]
    async fn test_search_hotels_missing_list_is_no_results() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond(
                "/hotels/searchHotels",
                Matcher::Any,
                200,
                &json!({"status": true, "data": {}}).to_string(),
            )
            .await;

        let hotels = vendor
            .client()
            .search_hotels(HotelSearchQuery::new("-2092174", "CITY"))
            .await
            .unwrap();
        assert!(hotels.is_empty());
    }

    #[tokio::test]
    async fn test_search_hotels_is_idempotent() {
        let mut vendor = MockVendor::start().await;
        let body = json!({
            "data": {"hotels": [
                {"property": {"id": 1, "name": "A", "reviewScore": 7.5}},
                {"property": {"id": 2, "name": "B", "photoUrls": ["https://b.jpg"]}}
            ]}
        })
        .to_string();
        let mock = vendor
            .respond_times("/hotels/searchHotels", Matcher::Any, 200, &body, 2)
            .await;

        let client = vendor.client();
        let query = HotelSearchQuery::new("-2092174", "CITY");
        let (first, second) = futures::future::join(
            client.search_hotels(query.clone()),
            client.search_hotels(query),
        )
        .await;

        mock.assert_async().await;
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[tokio::test]
    async fn test_server_error_carries_vendor_message() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond(
                "/hotels/searchHotels",
                Matcher::Any,
                429,
                &json!({"message": "You have exceeded the rate limit per second"}).to_string(),
            )
            .await;

        let error = vendor
            .client()
            .search_hotels(HotelSearchQuery::new("-2092174", "CITY"))
            .await
            .unwrap_err();

        match error {
            ApiError::ServerError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 429);
                assert_eq!(message, "You have exceeded the rate limit per second");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_without_body_is_network_failure() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond("/hotels/getHotelReviews", Matcher::Any, 502, "")
            .await;

        let error = vendor.client().get_hotel_reviews("191605").await.unwrap_err();
        assert!(matches!(error, ApiError::NetworkFailure(_)));
        assert!(error.is_retryable());
    }

    #[tokio::test]
    async fn test_unreachable_vendor_is_network_failure() {
        // Nothing listens on the discard port
        let config = ClientConfig::new("k", "h")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));
        let client = HotelDataClient::new(config).unwrap();

        let error = client
            .search_hotels(HotelSearchQuery::new("-2092174", "CITY"))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::NetworkFailure(_)));
    }

    #[tokio::test]
    async fn test_non_json_success_is_unexpected_shape() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond("/hotels/searchHotels", Matcher::Any, 200, "maintenance")
            .await;

        let error = vendor
            .client()
            .search_hotels(HotelSearchQuery::new("-2092174", "CITY"))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::UnexpectedResponseShape(_)));
        assert!(!error.is_retryable());
    }

    #[tokio::test]
    async fn test_hotel_details_defaults_to_a_week_from_today() {
        let mut vendor = MockVendor::start().await;
        let (arrival, departure) = default_stay(today());
        let (arrival, departure) = (format_date(arrival), format_date(departure));
        let body = json!({
            "status": true,
            "message": "Success",
            "data": {"hotel_id": 191605, "hotel_name": "The Taj Mahal Palace", "description": "Sea-facing"}
        })
        .to_string();
        let mock = vendor
            .respond(
                "/hotels/getHotelDetails",
                params(&[
                    ("hotel_id", "191605"),
                    ("arrival_date", arrival.as_str()),
                    ("departure_date", departure.as_str()),
                    ("adults", "1"),
                    ("currency_code", "USD"),
                ]),
                200,
                &body,
            )
            .await;

        let details = vendor
            .client()
            .get_hotel_details("191605", HotelDetailsQuery::new())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(details.description(), "Sea-facing");
        assert_eq!(details.name(), "The Taj Mahal Palace");
    }

    #[tokio::test]
    async fn test_hotel_details_sends_caller_dates() {
        let mut vendor = MockVendor::start().await;
        let mock = vendor
            .respond(
                "/hotels/getHotelDetails",
                params(&[
                    ("arrival_date", "2025-06-01"),
                    ("departure_date", "2025-06-05"),
                    ("adults", "2"),
                    ("currency_code", "INR"),
                ]),
                200,
                &json!({"status": true, "data": {"hotel_id": 191605}}).to_string(),
            )
            .await;

        let query = HotelDetailsQuery::new()
            .adults(2)
            .currency_code("INR")
            .dates(date(2025, 6, 1), date(2025, 6, 5));
        let details = vendor
            .client()
            .get_hotel_details("191605", query)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(details.hotel_id(), "191605");
    }

    #[tokio::test]
    async fn test_hotel_details_vendor_rejection() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond(
                "/hotels/getHotelDetails",
                Matcher::Any,
                200,
                &json!({"status": false, "message": [{"hotel_id": "Invalid hotel"}]}).to_string(),
            )
            .await;

        let error = vendor
            .client()
            .get_hotel_details("0", HotelDetailsQuery::new())
            .await
            .unwrap_err();

        match error {
            ApiError::DetailsNotFound { hotel_id, message } => {
                assert_eq!(hotel_id, "0");
                assert_eq!(message.as_deref(), Some(r#"[{"hotel_id":"Invalid hotel"}]"#));
            }
            other => panic!("expected details not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hotel_details_success_without_data_is_unexpected_shape() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond(
                "/hotels/getHotelDetails",
                Matcher::Any,
                200,
                &json!({"status": true}).to_string(),
            )
            .await;

        let error = vendor
            .client()
            .get_hotel_details("191605", HotelDetailsQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::UnexpectedResponseShape(_)));
    }

    #[tokio::test]
    async fn test_hotel_details_requires_id() {
        let vendor = MockVendor::start().await;
        let result = vendor
            .client()
            .get_hotel_details("", HotelDetailsQuery::new())
            .await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_room_availability_inverted_range_is_empty() {
        let mut vendor = MockVendor::start().await;
        let mock = vendor
            .respond(
                "/hotels/getRoomAvailability",
                params(&[
                    ("hotel_id", "123"),
                    ("arrival_date", "2024-03-15"),
                    ("departure_date", "2024-03-10"),
                    ("adults", "2"),
                ]),
                200,
                &json!({"status": true, "data": {"rooms": []}}).to_string(),
            )
            .await;

        let rooms = vendor
            .client()
            .get_room_availability("123", date(2024, 3, 15), date(2024, 3, 10), 2)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn test_room_availability_normalizes_rooms() {
        let mut vendor = MockVendor::start().await;
        let body = json!({
            "status": true,
            "data": {"rooms": [
                {"name": "Deluxe King", "amenities": ["Wifi", "Sea view"], "price": {"value": 210.5, "currency": "USD"}},
                {"name": "Standard Twin"}
            ]}
        })
        .to_string();
        vendor
            .respond("/hotels/getRoomAvailability", Matcher::Any, 200, &body)
            .await;

        let rooms = vendor
            .client()
            .get_room_availability("191605", date(2025, 6, 1), date(2025, 6, 5), 2)
            .await
            .unwrap();

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].amenities, vec!["Wifi", "Sea view"]);
        assert_eq!(rooms[0].price.amount, 210.5);
        assert!(rooms[1].amenities.is_empty());
        assert_eq!(rooms[1].price.currency_code, "USD");
    }

    #[tokio::test]
    async fn test_room_availability_vendor_failure_status_is_empty() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond(
                "/hotels/getRoomAvailability",
                Matcher::Any,
                200,
                &json!({"status": false, "message": "No availability"}).to_string(),
            )
            .await;

        let rooms = vendor
            .client()
            .get_room_availability("191605", date(2025, 6, 1), date(2025, 6, 5), 1)
            .await
            .unwrap();
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn test_hotel_reviews() {
        let mut vendor = MockVendor::start().await;
        let body = json!({
            "status": true,
            "data": {"result": [
                {"review_id": 1, "title": "Superb", "average_score": 9.0, "author": {"name": "Ravi"}}
            ]}
        })
        .to_string();
        let mock = vendor
            .respond(
                "/hotels/getHotelReviews",
                params(&[("hotel_id", "191605"), ("sort_by", "relevance_desc")]),
                200,
                &body,
            )
            .await;

        let reviews = vendor.client().get_hotel_reviews("191605").await.unwrap();

        mock.assert_async().await;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].author_name, "Ravi");
        assert_eq!(reviews[0].score, 9.0);
    }

    #[tokio::test]
    async fn test_cancelled_before_completion() {
        let mut vendor = MockVendor::start().await;
        let mock = vendor
            .respond_times("/hotels/searchHotels", Matcher::Any, 200, "{}", 0)
            .await;

        let token = CancellationToken::new();
        token.cancel();

        let client = vendor.client();
        let result = cancellable(
            &token,
            client.search_hotels(HotelSearchQuery::new("-2092174", "CITY")),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Cancelled)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let mut vendor = MockVendor::start().await;
        vendor
            .respond(
                "/hotels/getHotelReviews",
                Matcher::Any,
                200,
                &json!({"status": true, "data": {"result": []}}).to_string(),
            )
            .await;

        let token = CancellationToken::new();
        let client = vendor.client();
        let reviews = cancellable(&token, client.get_hotel_reviews("191605"))
            .await
            .unwrap();
        assert!(reviews.is_empty());
    }
}
