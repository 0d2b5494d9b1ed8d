// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive anatomical eye viewer core.
//!
//! Eyeview drives a guided tour over a 3D eye model: numbered annotation
//! labels pinned to anatomical features, smooth camera flights between
//! them, and overlays that simulate eye conditions (cataract, glaucoma,
//! diabetic retinopathy).
//!
//! # Key entry points
//!
//! - [`engine::ViewerEngine`] - state, command dispatch and per-frame output
//! - [`annotation::AnnotationRegistry`] - the validated, ordered annotation set
//! - [`condition::ConditionOverlayManager`] - condition flags and their visuals
//! - [`options::Options`] - runtime configuration (display, camera, flight,
//!   effects, keybindings)
//!
//! # Architecture
//!
//! Everything runs on the host's event loop. The host forwards input as
//! [`input::InputEvent`]s or [`engine::ViewerCommand`]s, calls
//! [`engine::ViewerEngine::update`] once per frame with the current time,
//! and draws the returned [`engine::Frame`]: camera pose, label layouts,
//! condition markers and the lens material. Label elements are created and
//! destroyed through an [`annotation::LabelPresenter`]; the `web` feature
//! provides a DOM implementation.

pub mod annotation;
pub mod camera;
pub mod condition;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use annotation::{Annotation, AnnotationRegistry};
pub use condition::ConditionId;
pub use engine::{Frame, ViewerCommand, ViewerEngine};
pub use error::EyeViewError;
pub use options::Options;
