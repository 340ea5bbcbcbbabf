pub mod format;
pub mod fund_service;
pub mod listing_service;
