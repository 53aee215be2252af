// URL handling utilities
pub mod url_parser;
pub mod query_string;

// JSON utilities
pub mod json_converter;

// Display helpers for values coming from the management database
pub mod db_text;

// Re-export all utilities for convenient access
pub use url_parser::hostname_from_url;
pub use query_string::build_query_string;
pub use json_converter::{value_to_short_string, string_or_number, opt_string_or_number};
pub use db_text::{fromdb, no_null, truncate_chars};
