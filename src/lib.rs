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
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Placement math compares against exact constants (0.0, 1.0)
#![allow(clippy::float_cmp)]

//! Composite grouping utilities for 3D scene props.
//!
//! Troupe lets multiple renderable objects be treated as one compound
//! entity for positioning, picking, and transformation purposes. The
//! rendering engine proper stays on the far side of a trait seam: troupe
//! keeps the bookkeeping (ordered object lists, actor handles, scalarbar
//! aggregation) and drives the engine's composite prop through
//! [`render::CompositeContainer`].
//!
//! # Key entry points
//!
//! - [`assembly::Assembly`] - an ordered, named collection of scene props
//!   with recursive flattening and 2D-overlay projection
//!   ([`assembly::Assembly::clone2d`])
//! - [`group::Group`] - a flat, unordered bag of props toggled as one
//! - [`align::procrustes_alignment`] - packages the output of an external
//!   point-set alignment filter into an [`assembly::Assembly`]
//!
//! # Architecture
//!
//! Renderables are modeled as a closed [`node::SceneNode`] sum type held
//! behind shared single-threaded handles ([`node::SharedNode`]). Sharing is
//! deliberate: flattening a nested assembly yields the *same* children when
//! no positional offset applies, and `clone2d` deduplicates elements by
//! handle identity. Everything is synchronous and single-threaded; the
//! only I/O is optional archive loading through serde_json.

pub mod align;
pub mod archive;
pub mod assembly;
pub mod error;
pub mod group;
pub mod math;
pub mod node;
pub mod render;
pub mod stats;
