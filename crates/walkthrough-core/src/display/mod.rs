//! Markdown rendering of catalog models and session surfaces.
//!
//! Domain models implement `Display` directly ([`models`]); collections and
//! session surfaces get small borrowing wrappers ([`collections`],
//! [`session`]). Everything produces markdown so a terminal host can render
//! it through a termimad skin or print it as plain text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ Catalog/Session │───▶│ Display wrappers│───▶│    Markdown     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use walkthrough_core::{display::WelcomeCard, Catalog};
//!
//! let catalog = Catalog::deepsafe();
//! let output = WelcomeCard(&catalog).to_string();
//! assert!(output.starts_with("## Welcome to DeepSafe Dashboard"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod session;

pub use collections::{PhaseList, StepList};
pub use datetime::LocalDateTime;
pub use session::{CompletionCard, PositionTable, ProgressDots, StatusReport, StepCard, WelcomeCard};
