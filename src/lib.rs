//! Spotify listening snapshot library
//!
//! This library fetches a user's personal listening statistics from the Spotify
//! Web API and writes them as a small, stable JSON document that a website
//! widget can render without talking to Spotify itself.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `cli` - Command implementations driven by the binary
//! - `config` - Configuration loaded from the environment and `.env` files
//! - `errors` - Typed errors for configuration, auth, fetching and storage
//! - `management` - Token cache and snapshot file persistence
//! - `normalize` - Mapping of raw API records to the snapshot schema
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify accounts and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotify_snapshot::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> spotify_snapshot::Res<()> {
//!     config::load_env();
//!     let config = config::Config::from_env();
//!     cli::update(&config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod normalize;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Everything that is allowed to abort a run (configuration, authentication
/// and storage failures) converts into [`errors::Error`]. Failures of the
/// individual statistics fetches never end up here; they degrade to fallback
/// values instead.
pub type Res<T> = std::result::Result<T, errors::Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching your top artists for the year...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Successfully updated Spotify data!");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing. Only meant
/// for the outermost error handler and for failures that leave nothing to
/// recover.
///
/// # Example
///
/// ```
/// error!("Error updating Spotify data: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems, such as a statistics endpoint that failed
/// and was replaced by its fallback value.
///
/// # Example
///
/// ```
/// warning!("Error fetching top tracks: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
