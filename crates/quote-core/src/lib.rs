//! # quote-core: Foundational Types for the Quote Stack
//!
//! This crate is the leaf of the quote-stack workspace. It defines the data
//! shapes every other crate exchanges: the value of a single form field, the
//! record of all field values a form currently holds, the field → message
//! error map, and the `{field, message}` entries a server reports after a
//! rejected submission.
//!
//! ## Key Design Principles
//!
//! 1. **One value type.** `FieldValue` covers text inputs, numeric inputs,
//!    toggles, and checklists. Absent keys and JSON `null` are both
//!    `FieldValue::Missing`, so a schema that names a field the record lacks
//!    still evaluates against a well-defined value.
//!
//! 2. **Explicit "required" semantics.** `FieldValue::is_present()` is the
//!    single definition of what satisfies a `required` rule. Numeric zero is
//!    present; whitespace-only text is not.
//!
//! 3. **Deterministic ordering.** Records and error maps are `BTreeMap`
//!    newtypes so serialised output and iteration order are stable.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `quote-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod record;
pub mod report;
pub mod value;

pub use error::QuoteError;
pub use record::FormRecord;
pub use report::{FieldMessage, ValidationErrors};
pub use value::FieldValue;
