// Normalized hotel data handed to callers.
// Every field the UI renders directly carries a default; vendor gaps never leak through.

use crate::query::DEFAULT_CURRENCY;
use crate::vendor::{
    id_to_string, VendorDestination, VendorHotelItem, VendorPrice, VendorReview, VendorRoom,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    pub amount: f64,
    pub currency_code: String,
}

impl Default for Price {
    fn default() -> Self {
        Self {
            amount: 0.0,
            currency_code: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl From<Option<VendorPrice>> for Price {
    fn from(price: Option<VendorPrice>) -> Self {
        let price = price.unwrap_or_default();
        Self {
            amount: price.value.unwrap_or(0.0),
            currency_code: non_empty(price.currency)
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DestinationType {
    City,
    Hotel,
    Airport,
    Region,
    District,
    Landmark,
    Country,
    Other(String),
}

impl From<&str> for DestinationType {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "city" => DestinationType::City,
            "hotel" => DestinationType::Hotel,
            "airport" => DestinationType::Airport,
            "region" => DestinationType::Region,
            "district" => DestinationType::District,
            "landmark" => DestinationType::Landmark,
            "country" => DestinationType::Country,
            _ => DestinationType::Other(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub destination_id: String,
    pub destination_type: DestinationType,
    pub display_name: String,
    pub label: String,
    pub city_name: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub thumbnail_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub search_type: String,
    pub hotel_count: u32,
}

impl From<VendorDestination> for Destination {
    fn from(item: VendorDestination) -> Self {
        let display_name = item.name.unwrap_or_default();
        let country = non_empty(item.country);
        let label = non_empty(item.label).unwrap_or_else(|| match &country {
            Some(country) => format!("{}, {}", display_name, country),
            None => display_name.clone(),
        });

        Destination {
            destination_id: id_to_string(item.dest_id.as_ref()),
            destination_type: DestinationType::from(item.dest_type.as_deref().unwrap_or("")),
            display_name,
            label,
            city_name: non_empty(item.city_name),
            country,
            region: non_empty(item.region),
            thumbnail_url: non_empty(item.image_url),
            latitude: item.latitude,
            longitude: item.longitude,
            search_type: item.search_type.unwrap_or_default(),
            hotel_count: item.nr_hotels.or(item.hotels).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelSummary {
    pub id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub review_score: f64,
    pub review_count: u32,
    pub rating_word: String,
    pub price: Price,
    pub primary_image_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<VendorHotelItem> for HotelSummary {
    fn from(item: VendorHotelItem) -> Self {
        let property = item.property.unwrap_or_default();

        // Older payloads only carry the id on the wrapper
        let mut id = id_to_string(property.id.as_ref());
        if id.is_empty() {
            id = id_to_string(item.hotel_id.as_ref());
        }

        HotelSummary {
            id,
            name: property.name.unwrap_or_default(),
            city: property.wishlist_name.unwrap_or_default(),
            country: property.country_code.unwrap_or_default(),
            review_score: property.review_score.unwrap_or(0.0),
            review_count: property.review_count.unwrap_or(0),
            rating_word: property.review_score_word.unwrap_or_default(),
            price: property
                .price_breakdown
                .and_then(|breakdown| breakdown.gross_price)
                .into(),
            primary_image_url: property
                .photo_urls
                .and_then(|urls| urls.into_iter().next())
                .unwrap_or_default(),
            latitude: property.latitude,
            longitude: property.longitude,
        }
    }
}

// Vendor detail record for a single hotel.
//
// The payload is kept verbatim; accessors cover the fields callers read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HotelDetails(Value);

impl HotelDetails {
    pub fn hotel_id(&self) -> String {
        id_to_string(self.0.get("hotel_id"))
    }

    pub fn name(&self) -> &str {
        self.str_field("hotel_name")
    }

    pub fn description(&self) -> &str {
        self.str_field("description")
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }

    fn str_field(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or("")
    }
}

impl From<Value> for HotelDetails {
    fn from(value: Value) -> Self {
        HotelDetails(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub name: String,
    pub amenities: Vec<String>,
    pub price: Price,
}

impl From<VendorRoom> for Room {
    fn from(room: VendorRoom) -> Self {
        Room {
            name: room.name.unwrap_or_default(),
            amenities: room.amenities.unwrap_or_default(),
            price: room.price.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub id: String,
    pub title: String,
    pub pros: String,
    pub cons: String,
    pub author_name: String,
    pub score: f64,
    pub date: String,
}

impl From<VendorReview> for Review {
    fn from(review: VendorReview) -> Self {
        Review {
            id: id_to_string(review.review_id.as_ref()),
            title: review.title.unwrap_or_default(),
            pros: review.pros.unwrap_or_default(),
            cons: review.cons.unwrap_or_default(),
            author_name: review.author.and_then(|a| a.name).unwrap_or_default(),
            score: review.average_score.unwrap_or(0.0),
            date: review.date.unwrap_or_default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
