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
// Complexity limits
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
// Tests may unwrap
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Interactive 3D asset viewer core.
//!
//! Vitrine shows one uploaded model at a time: it frames the camera on the
//! model when it loads, lets the user orbit and zoom with damped controls,
//! and on double-click flies the camera onto the sub-object under the
//! cursor, outlining it, until a click on empty space flies back.
//!
//! Rendering is left to the host. The crate owns the viewer state and the
//! math: bounds, framing distances, clip planes, picking rays, and
//! time-based camera transitions.
//!
//! # Key entry points
//!
//! - [`viewer::ViewerSession`] - the single owner of all viewer state
//! - [`input::InputProcessor`] - raw pointer events to viewer commands
//! - [`catalog::ModelCatalog`] - backend model list and selection
//! - [`options::Options`] - runtime configuration (camera, controls, focus)
//!
//! # Frame loop
//!
//! The host feeds input through [`input::InputProcessor::handle_event`]
//! and [`viewer::ViewerSession::execute`], then calls
//! [`viewer::ViewerSession::tick`] once per frame and renders from
//! [`viewer::ViewerSession::camera`]. A running camera transition owns the
//! view until it completes; between transitions the orbit controls apply
//! their damped motion.

pub mod animation;
pub mod camera;
pub mod catalog;
pub mod error;
pub mod geometry;
pub mod input;
pub mod options;
pub mod scene;
pub mod viewer;

pub use error::VitrineError;
