//! Parse, edit and re-serialize URLs with an order-preserving query model.

pub mod config;
pub mod error;
pub mod logging;
pub mod url_model;

pub use error::{Result, UrlError};
pub use url_model::{Charset, ParseOptions, ParsedUrl, QueryParams, Syntax};
