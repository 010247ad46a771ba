pub mod detail_service;
pub mod fetch_service;
pub mod filter_service;
pub mod list_service;
pub mod write_service;
