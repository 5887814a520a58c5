//! qtune: single-angle gradient descent toward a Bell state, with entanglement diagnostics.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
