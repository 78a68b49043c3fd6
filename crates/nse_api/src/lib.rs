pub mod api;
pub mod columns;

pub use api::NseAPI;
pub use columns::PRICE_VOLUME_SCHEMA;
