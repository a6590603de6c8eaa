//! The canonical endpoint model: per-route metadata built by the strategy
//! pipeline, then grouped and ordered for the serializers.

mod body;
mod builder;
mod endpoint;
mod natural_sort;

pub use body::*;
pub use builder::*;
pub use endpoint::*;
pub use natural_sort::*;
