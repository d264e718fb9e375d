//! Security Config

use clap::Args;

/// Security settings.
///
/// The JWT secret is recognized for compatibility with existing
/// deployments but no route currently enforces authentication.
#[derive(Debug, Args)]
pub struct SecurityConfig {
    /// JWT signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,
}
