pub mod cache;
pub mod client;
pub mod queries;
pub mod traits;
