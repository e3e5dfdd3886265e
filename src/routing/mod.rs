//! Routable point resolution.
//!
//! Locates the street line carried by an address feature and projects the
//! matched point onto it, unless the caller supplied override points.

mod line;
mod projection;
mod resolver;

pub use line::{find_line, LineGeometry};
pub use projection::project;
pub use resolver::{resolve, resolve_batch, resolve_with, ResolverOptions, MAX_PRECISION};
