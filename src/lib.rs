//! polyvault - Validate and store hand-drawn polygons

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod service;
pub mod store;
