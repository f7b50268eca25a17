//! Services layer - business operations and external collaborators.
//!
//! This module contains:
//! - Distance computation and sorting
//! - The place service client
//! - Geolocation providers

pub mod distance;
pub mod location;
pub mod store;
