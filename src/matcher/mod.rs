//! Route matching: filters the host's route table down to the documented
//! subset and picks the apply payload for each included route.

mod matcher;
mod rules;

pub use matcher::*;
pub use rules::*;
