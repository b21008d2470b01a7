//! The stateful analysis layer: conformer discovery and moment computation
//! ([`ensemble`]), percentile-based candidate selection ([`selection`]),
//! scatter-plot rendering ([`plotting`]), and progress reporting.

pub mod ensemble;
pub mod error;
pub mod plotting;
pub mod progress;
pub mod selection;
