pub mod connectors;
pub mod utils;
