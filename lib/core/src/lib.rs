//! Core domain types and utilities for the landreg platform.
//!
//! This crate provides the foundational types, error handling, and shared
//! utilities used throughout the land-registration management platform.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, UserId};
