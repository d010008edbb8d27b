use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Envelope shared by every vendor endpoint. Nothing in here is trusted to be present.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorEnvelope {
    pub status: Option<Value>,
    pub message: Option<Value>,
    pub data: Option<Value>,
}

impl VendorEnvelope {
    // The vendor reports success with a loosely typed flag (bool, 1, "true", ...).
    pub fn is_success(&self) -> bool {
        match &self.status {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_f64().map_or(false, |n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty() && s != "false",
            _ => false,
        }
    }

    // Vendor messages come as strings, arrays of objects, or objects.
    pub fn message_text(&self) -> Option<String> {
        match &self.message {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    // `data.<field>` when it is an array
    pub fn data_list(&self, field: &str) -> Option<&Vec<Value>> {
        self.data.as_ref()?.get(field)?.as_array()
    }
}

// Data structures for location search items (`/hotels/searchDestination`)
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorDestination {
    pub dest_id: Option<Value>,
    #[serde(deserialize_with = "lenient_text")]
    pub dest_type: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub city_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub search_type: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub nr_hotels: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub hotels: Option<u32>,
}

// Data structures for hotel search items (`/hotels/searchHotels`)
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorHotelItem {
    pub hotel_id: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub property: Option<VendorProperty>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorProperty {
    pub id: Option<Value>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub wishlist_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub country_code: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub review_score: Option<f64>,
    #[serde(deserialize_with = "lenient_count")]
    pub review_count: Option<u32>,
    #[serde(deserialize_with = "lenient_text")]
    pub review_score_word: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub price_breakdown: Option<VendorPriceBreakdown>,
    #[serde(deserialize_with = "lenient_text_list")]
    pub photo_urls: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorPriceBreakdown {
    #[serde(deserialize_with = "lenient")]
    pub gross_price: Option<VendorPrice>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorPrice {
    #[serde(deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub currency: Option<String>,
}

// Data structures for room availability (`/hotels/getRoomAvailability`)
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorRoom {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text_list")]
    pub amenities: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub price: Option<VendorPrice>,
}

// Data structures for hotel reviews (`/hotels/getHotelReviews`)
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorReview {
    pub review_id: Option<Value>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub pros: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cons: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub average_score: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub author: Option<VendorAuthor>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorAuthor {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
}

// Field-level readers: a value of the wrong type becomes `None` instead of failing the item.

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(&value).ok())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(count.and_then(|c| u32::try_from(c).ok()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

// Non-string entries are dropped, the rest of the list is kept
fn lenient_text_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

// Renders a vendor id that may arrive as a JSON string or number.
pub fn id_to_string(id: Option<&Value>) -> String {
    match id {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
