//! Sequence state machine.
//!
//! [`SessionState`] is the single mutable record of a guided session. It is
//! only ever replaced by the pure [`transition`] function, driven through a
//! [`Walkthrough`] container that also persists durable flags and publishes
//! [`Signal`]s for observers (the position resolver, renderers).
//!
//! # Examples
//!
//! ```rust
//! use walkthrough_core::{Catalog, MemoryFlagStore, Walkthrough};
//!
//! let mut walkthrough = Walkthrough::new(Catalog::deepsafe(), Box::new(MemoryFlagStore::new()));
//! walkthrough.start();
//! walkthrough.close_welcome();
//! walkthrough.go_to_step(99);
//! assert_eq!(walkthrough.state().current_step, 15);
//! ```

mod keys;
mod signal;
mod state;
mod transition;
mod walkthrough;


pub use keys::Key;
pub use signal::Signal;
pub use state::SessionState;
pub use transition::{transition, Intent};
pub use walkthrough::Walkthrough;
