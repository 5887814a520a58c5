//! Core module tree for qtune.

pub mod debug; // gated debug logging (QTUNE_DEBUG=1) provides debug_log! macro
pub mod error;
pub mod report;
pub mod sweep;
pub mod titan;
