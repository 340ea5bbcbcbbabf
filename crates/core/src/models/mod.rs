pub mod chart;
pub mod fund;
pub mod manager;
pub mod quantity;
pub mod table;
pub mod view;
