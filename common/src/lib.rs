pub mod catalog_item;
pub mod categories;
pub mod deserialize_validators;
pub mod utils;
