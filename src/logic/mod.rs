//! Scoring algorithms shared by matches and sets: standings and lifecycle.

mod lifecycle;
mod standings;

pub use lifecycle::derive_set_state;
pub(crate) use standings::check_permutation;
pub use standings::{check_roster, check_seeds, rank};
