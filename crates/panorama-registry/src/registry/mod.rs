//! The SurfaceRegistry owns this window's identity and the reconciled
//! window list.

mod operations;
mod reconcile;
mod types;


pub use types::*;
