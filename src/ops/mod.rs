pub mod itinerary_ops;
