//! Configuration management for the upload gateway.
//!
//! Settings come from command-line arguments via clap, falling back to
//! environment variables with the `API_` prefix (a `.env` file in the working
//! directory is loaded first).
//!
//! # Environment Variables
//!
//! - `API_HOST` - Server bind address (default: 0.0.0.0)
//! - `API_PORT` - Server port (default: 8000)
//! - `API_USERNAME` - Expected Basic auth username (default: admin)
//! - `API_PASSWORD` - Expected Basic auth password (default: admin)
//! - `API_REQUIRE_CREDENTIALS` - Refuse to start without explicit credentials
//! - `API_MAX_BODY_SIZE` - Maximum request body size in bytes (default: 50 MiB)

use clap::Parser;

use crate::server::DEFAULT_MAX_BODY_SIZE;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Username used when none is configured.
pub const DEFAULT_USERNAME: &str = "admin";

/// Password used when none is configured.
pub const DEFAULT_PASSWORD: &str = "admin";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Upload Gateway - authenticated intake for DOD, ETP and TR documents.
///
/// Accepts the three documents over one multipart POST, checks their declared
/// types and reports the name and size of each file received.
#[derive(Parser, Debug, Clone)]
#[command(name = "upload-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "API_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "API_PORT")]
    pub port: u16,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Expected Basic auth username.
    ///
    /// Falls back to "admin" when unset.
    #[arg(long, env = "API_USERNAME")]
    pub username: Option<String>,

    /// Expected Basic auth password.
    ///
    /// Falls back to "admin" when unset.
    #[arg(long, env = "API_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Fail at startup unless both username and password are configured.
    #[arg(long, default_value_t = false, env = "API_REQUIRE_CREDENTIALS")]
    pub require_credentials: bool,

    // =========================================================================
    // Upload Configuration
    // =========================================================================
    /// Maximum request body size in bytes (all three documents together).
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_SIZE, env = "API_MAX_BODY_SIZE")]
    pub max_body_size: usize,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.require_credentials && !self.has_configured_credentials() {
            return Err(
                "Credentials are required but not configured. \
                 Set --username/--password or API_USERNAME/API_PASSWORD"
                    .to_string(),
            );
        }

        if self.username().is_empty() {
            return Err("username must not be empty".to_string());
        }

        if self.max_body_size == 0 {
            return Err("max_body_size must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Expected username, or the default when unset.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    /// Expected password, or the default when unset.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or(DEFAULT_PASSWORD)
    }

    /// True when both username and password were set explicitly.
    pub fn has_configured_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================
