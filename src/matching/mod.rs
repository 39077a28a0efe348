pub mod exact;
pub mod fuzzy;
pub mod manager;
