pub mod api_client;
pub mod conferencing;
pub mod search_service;
pub mod transport;
