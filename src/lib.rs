// Hotel data client: location search, hotel search, hotel details, room availability and
// reviews against the vendor hotel API, normalized into stable types.

pub mod api;
pub mod config;
pub mod models;
pub mod query;
pub mod vendor;

// Re-export key types for convenience
pub use api::{cancellable, ApiError, ClientError, HotelApi, HotelDataClient};
pub use config::{ClientConfig, ConfigLoader};
pub use models::{Destination, DestinationType, HotelDetails, HotelSummary, Price, Review, Room};
pub use query::{HotelDetailsQuery, HotelSearchQuery, RoomAvailabilityQuery};
