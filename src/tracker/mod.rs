//! Remnant geometry tracking: draft editing and cut commits.

mod commit;
mod draft;

pub use commit::{CutContext, RemnantTracker};
pub use draft::DraftState;
