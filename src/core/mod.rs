//! Core domain: models and registration admission rules

pub mod models;
pub mod registration;
