pub mod item;
pub mod reminder;
pub mod store;
