pub mod circuit;
pub mod entangle;
pub mod optimize;
pub mod sweep;
