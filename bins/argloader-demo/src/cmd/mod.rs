pub mod resolve;
pub mod schema;
