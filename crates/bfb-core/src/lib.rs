//! bfb-core: shared foundation for the BFB reactor workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real, range checks, linspace)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
