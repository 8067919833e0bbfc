//! Library root for `mind-triage`.
//!
//! Mind-triage takes free-form text from a user and:
//! - Scans it for keywords from a fixed taxonomy of mental-health concerns
//! - Surfaces the contact resources attached to each matched concern
//! - Runs an external emotion classifier and reports its score distribution
//!
//! The two analyses are independent: the keyword triage is pure and always
//! available, while the classifier sits behind a trait and degrades gracefully
//! when it cannot be reached.

pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;
pub mod triage;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and runs one session:
/// - Creates the runtime context with the triage engine and classifier handle
/// - Reads submissions and writes the rendered analyses to stdout
pub async fn start(config: Config, session: runtime::Session) -> Void {
    info!("Starting mind-triage ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Run the session.
    runtime.start(session).await?;

    Ok(())
}
