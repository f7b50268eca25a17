//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Error types shared by services and controllers
//! - Logging setup

pub mod error;
pub mod logging;
