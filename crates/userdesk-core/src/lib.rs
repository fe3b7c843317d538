//! # Userdesk Core
//!
//! Core types, error definitions, and validation rules for Userdesk.
//! Every other crate in the workspace builds on the domain model defined
//! here: the `User` entity with its polymorphic `Picture` and `Directory`
//! fields, the paginated `Envelope`, and the unified `UserdeskError`.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use telemetry::*;
pub use validation::*;
