//! Search query domain modules.
//!
//! - `validators`: format rules applied to raw qualifier values.
//! - `qualifier`: named, typed, optionally-validated option holder.
//! - `qualifiers`: label-keyed collection and set-entry listing.
//! - `query`: query model and textual serialization.
//! - `result`: loosely-typed search result payload.
//! - `searcher`: execution boundary contract.

pub mod error;
pub mod qualifier;
pub mod qualifiers;
pub mod query;
pub mod result;
pub mod searcher;
pub mod validators;

pub use error::{QueryError, ValidationError};
pub use qualifier::{Parameter, Qualifier, ValueKind};
pub use qualifiers::Qualifiers;
pub use query::Query;
pub use result::{Item, SearchResult};
pub use searcher::Searcher;
pub use validators::{
    Validator, bool_validator, date_validator, multi_opts_validator, opts_validator,
    range_validator,
};
