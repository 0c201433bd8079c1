//! JSONC decoder: standard JSON extended with `//` and `/* */`
//! comments, parsed in one pass into an arena-backed value tree.
//!
//! The whole input must be in memory before parsing starts; the whole
//! tree is built before [`parse_str`] returns. Errors carry their kind
//! and the 1-indexed row/column of the offending character.
//!
//! ```
//! let doc = jsonc_tree::parse_str(
//!     r#"{
//!         // comments are only valid inside arrays and objects
//!         "lang": "zig",
//!         "version": 0.14
//!     }"#,
//! )
//! .unwrap();
//! assert_eq!(doc.root().get("lang").unwrap().as_str(), Some("zig"));
//! ```
//!
//! Recursion depth follows input nesting depth with no built-in limit;
//! callers handling untrusted input should bound nesting themselves
//! before decoding.

pub mod arena;
pub mod decode;
pub mod error;
pub mod value;

pub use crate::arena::NodeKind;
pub use crate::decode::{from_reader, from_slice, from_str, parse_slice, parse_str, to_json};
pub use crate::error::{Error, ErrorKind, Location};
pub use crate::value::{Document, Entries, Items, Value};

pub type Result<T> = std::result::Result<T, Error>;
