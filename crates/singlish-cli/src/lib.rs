//! Command implementations behind `singlishtool`.

pub mod commands;
