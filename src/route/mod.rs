//! Route descriptors and the host-adapter seam.
//!
//! The pipeline never talks to a concrete router. It depends on the narrow
//! [`HostAdapter`] interface (`list_routes` / `resolve_handler`) and treats
//! everything it returns as read-only input. [`RouteTable`] is the in-memory
//! adapter shipped with the crate; the CLI loads a YAML route file into it,
//! and tests register routes on it directly.

mod table;
mod types;

pub use table::*;
pub use types::*;
