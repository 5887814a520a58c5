//! Titan quantum core: state types, gates, circuit oracles, entanglement measures,
//! cost policies and the single-angle optimizer.

pub mod cost;
pub mod entanglement;
pub mod gates;
pub mod ops;
pub mod optimization;
pub mod oracle;
pub mod types;
