//! Input routing: raw pointer/key state sampled once per frame into an
//! [`InputIntent`].
//!
//! # Invariants
//! - State sampling, not event replay: an intent describes what is held now
//!   and how far the cursor travelled since the previous sample.
//! - Cursor delta is zero unless the look button is held.
//! - Only bound keys are tracked; everything else is ignored.

pub mod intent;
pub mod router;

pub use intent::{InputIntent, MoveKey};
pub use router::{Control, InputRouter, KeyBindings};
