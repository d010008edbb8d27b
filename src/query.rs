// Request parameters for the vendor hotel endpoints.
// Every query owns its defaults and renders itself to the vendor's query-string pairs.

use chrono::{Duration, Local, NaiveDate};

pub const DEFAULT_ADULTS: u32 = 1;
pub const DEFAULT_CHILD_AGES: &str = "0,17";
pub const DEFAULT_ROOM_QUANTITY: u32 = 1;
pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_LOCATION: &str = "US";

// Length of the stay used when the caller does not pick dates
pub const DEFAULT_STAY_NIGHTS: i64 = 7;

const UNITS: &str = "metric";
const TEMPERATURE_UNIT: &str = "c";

pub type QueryParams = Vec<(&'static str, String)>;

// Formats a date the way the vendor expects it: `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// Arrival/departure pair used when the caller leaves the dates empty.
pub fn default_stay(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today, today + Duration::days(DEFAULT_STAY_NIGHTS))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelSearchQuery {
    pub destination_id: String,
    pub search_type: String,
    pub adults: Option<u32>,
    pub child_ages: Option<String>,
    pub room_quantity: Option<u32>,
    pub page_number: Option<u32>,
    pub currency_code: Option<String>,
    pub location: Option<String>,
}

impl HotelSearchQuery {
    pub fn new(destination_id: impl Into<String>, search_type: impl Into<String>) -> Self {
        Self {
            destination_id: destination_id.into(),
            search_type: search_type.into(),
            adults: None,
            child_ages: None,
            room_quantity: None,
            page_number: None,
            currency_code: None,
            location: None,
        }
    }

    pub fn adults(mut self, adults: u32) -> Self {
        self.adults = Some(adults);
        self
    }

    pub fn child_ages(mut self, ages: impl Into<String>) -> Self {
        self.child_ages = Some(ages.into());
        self
    }

    pub fn room_quantity(mut self, rooms: u32) -> Self {
        self.room_quantity = Some(rooms);
        self
    }

    pub fn page_number(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    pub fn currency_code(mut self, currency: impl Into<String>) -> Self {
        self.currency_code = Some(currency.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn to_params(&self, locale: &str) -> QueryParams {
        vec![
            ("dest_id", self.destination_id.clone()),
            ("search_type", self.search_type.clone()),
            ("adults", self.adults.unwrap_or(DEFAULT_ADULTS).to_string()),
            ("children_age", child_ages_or_default(&self.child_ages)),
            (
                "room_qty",
                self.room_quantity.unwrap_or(DEFAULT_ROOM_QUANTITY).to_string(),
            ),
            (
                "page_number",
                self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER).to_string(),
            ),
            ("units", UNITS.to_string()),
            ("temperature_unit", TEMPERATURE_UNIT.to_string()),
            ("languagecode", locale.to_string()),
            ("currency_code", currency_or_default(&self.currency_code)),
            (
                "location",
                self.location
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelDetailsQuery {
    pub adults: Option<u32>,
    pub child_ages: Option<String>,
    pub room_quantity: Option<u32>,
    pub currency_code: Option<String>,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
}

impl HotelDetailsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adults(mut self, adults: u32) -> Self {
        self.adults = Some(adults);
        self
    }

    pub fn child_ages(mut self, ages: impl Into<String>) -> Self {
        self.child_ages = Some(ages.into());
        self
    }

    pub fn room_quantity(mut self, rooms: u32) -> Self {
        self.room_quantity = Some(rooms);
        self
    }

    pub fn currency_code(mut self, currency: impl Into<String>) -> Self {
        self.currency_code = Some(currency.into());
        self
    }

    pub fn dates(mut self, arrival: NaiveDate, departure: NaiveDate) -> Self {
        self.arrival_date = Some(arrival);
        self.departure_date = Some(departure);
        self
    }

    // Resolves omitted dates against `today` (arrival today, departure a week later).
    pub fn resolved_dates(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let (default_arrival, default_departure) = default_stay(today);
        (
            self.arrival_date.unwrap_or(default_arrival),
            self.departure_date.unwrap_or(default_departure),
        )
    }

    pub fn to_params(&self, hotel_id: &str, locale: &str, today: NaiveDate) -> QueryParams {
        let (arrival, departure) = self.resolved_dates(today);
        vec![
            ("hotel_id", hotel_id.to_string()),
            ("arrival_date", format_date(arrival)),
            ("departure_date", format_date(departure)),
            ("adults", self.adults.unwrap_or(DEFAULT_ADULTS).to_string()),
            ("children_age", child_ages_or_default(&self.child_ages)),
            (
                "room_qty",
                self.room_quantity.unwrap_or(DEFAULT_ROOM_QUANTITY).to_string(),
            ),
            ("units", UNITS.to_string()),
            ("temperature_unit", TEMPERATURE_UNIT.to_string()),
            ("languagecode", locale.to_string()),
            ("currency_code", currency_or_default(&self.currency_code)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomAvailabilityQuery {
    pub hotel_id: String,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub adults: u32,
}

impl RoomAvailabilityQuery {
    // Date ordering is deliberately left to the vendor.
    pub fn to_params(&self, locale: &str) -> QueryParams {
        let adults = if self.adults == 0 {
            DEFAULT_ADULTS
        } else {
            self.adults
        };
        vec![
            ("hotel_id", self.hotel_id.clone()),
            ("arrival_date", format_date(self.arrival_date)),
            ("departure_date", format_date(self.departure_date)),
            ("adults", adults.to_string()),
            ("children_age", DEFAULT_CHILD_AGES.to_string()),
            ("room_qty", DEFAULT_ROOM_QUANTITY.to_string()),
            ("languagecode", locale.to_string()),
            ("currency_code", DEFAULT_CURRENCY.to_string()),
        ]
    }
}

fn child_ages_or_default(ages: &Option<String>) -> String {
    ages.clone()
        .unwrap_or_else(|| DEFAULT_CHILD_AGES.to_string())
}

fn currency_or_default(currency: &Option<String>) -> String {
    currency
        .clone()
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}
