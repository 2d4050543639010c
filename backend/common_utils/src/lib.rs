//! Common utilities for connector service

pub mod consts;
pub mod crypto;
pub mod errors;
pub mod ext_traits;
pub mod request;
pub mod types;

// Re-export commonly used items
pub use errors::{CustomResult, ParsingError};
pub use request::{Method, Request, RequestBuilder, RequestContent};
pub use types::{AmountConvertor, MinorUnit, StringMinorUnit, StringMinorUnitForConnector};
