//! # Confens Core Library
//!
//! A library for analyzing molecular conformer ensembles (e.g. the output of a
//! conformer-generation run) through their principal moments of inertia.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models ([`Molecule`](core::models::molecule::Molecule)),
//!   pure geometry utilities (center of mass, inertia tensors, principal moments),
//!   and I/O for molecular structure files.
//!
//! - **[`analysis`]: The Logic Core.** This stateful layer owns the
//!   [`Ensemble`](analysis::ensemble::Ensemble): conformer discovery, the per-conformer
//!   moment matrix, percentile-based candidate selection, and plot rendering.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It ties
//!   the `analysis` and `core` layers together into the complete
//!   discover → compute → plot → select procedure and is the intended entry point
//!   for end-users of the library.

pub mod analysis;
pub mod core;
pub mod workflows;
