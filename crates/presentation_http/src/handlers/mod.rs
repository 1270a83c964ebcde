//! Request handlers

pub mod generate;
pub mod speak;
pub mod status;
