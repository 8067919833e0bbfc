//! Core components, types, and static data for mind-triage.
//!
//! This module contains the fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The fixed concern taxonomy and its contact resources.
//! - User-facing messages.
//! - Common types and result handling.

pub mod config;
pub mod messages;
pub mod taxonomy;
pub mod types;
