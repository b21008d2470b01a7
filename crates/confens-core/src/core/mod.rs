//! Provides the foundational data models, geometry utilities, and file I/O
//! used by the analysis layer.

pub mod io;
pub mod models;
pub mod utils;
