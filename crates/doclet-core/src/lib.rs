//! Doclet Core - Documentation records and pre-filtering
//!
//! This crate holds everything Doclet knows about its input: the flat
//! records a JSDoc-style extractor produces, the options of a run, and the
//! pre-filter that removes unwanted records before grafting.
//!
//! # Example
//!
//! ```
//! use doclet_core::{prefilter, Record, RecordSet, RemoveQuery};
//!
//! let mut set = RecordSet::new(vec![
//!     Record::new("class", "Shape", "Shape"),
//!     Record::new("function", "Shape#area", "area").with_memberof("Shape"),
//! ]);
//!
//! let records = prefilter(&mut set, &RemoveQuery::default()).unwrap();
//! assert_eq!(records.len(), 2);
//! ```

mod collection;
mod error;
mod options;
mod record;
mod util;

pub use collection::{prefilter, RecordSet, RecordSource};
pub use error::{BoxError, ConfigError, DocletError, Result};
pub use options::{DocletOptions, RemoveQuery};
pub use record::{Record, RecordKind, TypeSpec};
pub use util::{email_address, has_property, replace_escaped_at_char, EMAIL_REGEX};
