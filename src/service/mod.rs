//! Service integrations for external collaborators.
//!
//! This module contains the clients mind-triage talks to:
//! - Emotion classification (e.g., a Hugging Face inference endpoint)
//!
//! Each service module defines both a generic trait and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod classifier;
