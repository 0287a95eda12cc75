//! Client-scoped answer sets loaded from the answers file.
//!
//! ```text
//! {
//!   "10.1.0.0/16": { "foo.svc.": { "A": ["10.1.2.3"] }, "recurse": ["10.1.0.2"] },
//!   "default":     { "foo.svc.": { "A": ["10.9.9.9"] } },
//!   "recurse":     ["8.8.8.8:53"]
//! }
//! ```

pub mod matcher;
pub mod raw;
pub mod store;
pub mod zone;

pub use matcher::{AnswerSource, LocalAnswer};
pub use raw::{RawAnswers, RECURSE_KEY};
pub use store::AnswerStore;
pub use zone::{RecordSet, Zone};
