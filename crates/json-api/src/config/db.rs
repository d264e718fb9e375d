//! Database Config

use clap::Args;

const DEFAULT_DATABASE_PATH: &str = "./fasttrack.db";
const PRODUCTION_DATABASE_PATH: &str = "/tmp/fasttrack.db";

/// Database settings.
///
/// The `DB_*` options describe a client-server backend; the sqlite
/// backend shipped here ignores them but keeps them recognized so
/// existing deployment environments parse cleanly.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// Explicit `SQLite` database file path
    #[arg(long, env = "DATABASE_PATH")]
    pub database_path: Option<String>,

    /// Deployment environment; `production` selects the `/tmp` database path
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub app_env: String,

    /// Database server host (client-server backend only)
    #[arg(long, env = "DB_HOST")]
    pub db_host: Option<String>,

    /// Database server user (client-server backend only)
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database server password (client-server backend only)
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name (client-server backend only)
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,
}

impl DatabaseConfig {
    /// Resolve the `SQLite` file path: an explicit override wins,
    /// otherwise the environment selects it.
    #[must_use]
    pub fn path(&self) -> &str {
        if let Some(path) = self.database_path.as_deref() {
            return path;
        }

        if self.app_env == "production" {
            PRODUCTION_DATABASE_PATH
        } else {
            DEFAULT_DATABASE_PATH
        }
    }

    /// Whether any client-server connection options were supplied.
    #[must_use]
    pub fn has_server_options(&self) -> bool {
        self.db_host.is_some()
            || self.db_user.is_some()
            || self.db_password.is_some()
            || self.db_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(database_path: Option<&str>, app_env: &str) -> DatabaseConfig {
        DatabaseConfig {
            database_path: database_path.map(ToString::to_string),
            app_env: app_env.to_string(),
            db_host: None,
            db_user: None,
            db_password: None,
            db_name: None,
        }
    }

    #[test]
    fn test_explicit_path_wins() {
        assert_eq!(config(Some("/data/t.db"), "production").path(), "/data/t.db");
    }

    #[test]
    fn test_production_selects_tmp_path() {
        assert_eq!(config(None, "production").path(), "/tmp/fasttrack.db");
    }

    #[test]
    fn test_development_uses_local_path() {
        assert_eq!(config(None, "development").path(), "./fasttrack.db");
    }
}
