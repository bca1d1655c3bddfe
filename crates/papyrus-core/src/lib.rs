//! Papyrus Core
//!
//! Types shared by every phase of the Papyrus front end.
//!
//! ## Modules
//!
//! - [`span`]: Source locations
//! - [`name`]: Case-insensitive identifiers
//! - [`types`]: The closed type set and its five compatibility relations
//! - [`value`]: Parsed literal values
//! - [`error`]: Checker and literal error enums
//! - [`diagnostics`]: Issues, severities and the log sink

pub mod diagnostics;
pub mod error;
pub mod name;
pub mod span;
pub mod types;
pub mod value;

pub use diagnostics::{DiagnosticSink, Diagnostics, Issue, RelatedLocation, Severity};
pub use error::{CheckError, LiteralError};
pub use name::{Name, normalize};
pub use span::Span;
pub use types::{
    Ancestry, ArrayType, InvokableKind, ObjectType, Primitive, Signature, Type,
};
pub use value::Value;
