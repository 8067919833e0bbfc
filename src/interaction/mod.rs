//! Submission handling and rendering for mind-triage.
//!
//! This module provides functionality for handling user submissions:
//! - Running keyword triage and emotion analysis over one submission
//! - Rendering the merged result for the terminal

pub mod analysis;
pub mod report;
