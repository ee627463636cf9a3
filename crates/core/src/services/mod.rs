pub mod alignment;
pub mod allocation_service;
pub mod market_service;
pub mod recommendation_service;
pub mod return_service;
pub mod sector_service;
pub mod snapshot_service;
pub mod visibility;
