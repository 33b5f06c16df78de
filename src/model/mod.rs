pub mod config;
pub mod itinerary;

pub use config::*;
pub use itinerary::*;
