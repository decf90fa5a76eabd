//! Parsers for the PCCP catalog text format.
//!
//! # Parsers
//!
//! - [`pccp_parser`]: Parse whitespace-separated PCCP lines into catalog objects
//!
//! # Example
//!
//! ```
//! use pccp_watch::parsing::pccp_parser::parse_catalog_str;
//!
//! let text = "C34ABC1  88 2026 01 15.4  3.0000 +30.0000 19.8 Updated Jan. 15.84 UT  5  0.12 14.2 0.021";
//! let objects = parse_catalog_str(text).expect("Failed to parse catalog");
//! assert_eq!(objects[0].designation, "C34ABC1");
//! ```

pub mod pccp_parser;


pub use pccp_parser::{parse_catalog_file, parse_catalog_line, parse_catalog_str};
