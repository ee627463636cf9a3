pub mod traits;

// Recommender service implementations
pub mod http;
