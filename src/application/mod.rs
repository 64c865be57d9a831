// Application layer - use cases over the backend gateway
pub mod chart_service;
pub mod entry_service;
pub mod stats_gateway;
pub mod streaming_service;
