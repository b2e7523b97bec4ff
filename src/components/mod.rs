pub mod detail;
pub mod list_item;
