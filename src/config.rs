use crate::error::{DealerDbError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_dbname() -> String {
    "cars_db".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_password() -> String {
    "labpass".to_string()
}

/// Connection parameters for the dealership database, immutable for the
/// process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_dbname")]
    pub dbname: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dbname: default_dbname(),
            user: default_user(),
            password: default_password(),
        }
    }
}

/// Field-wise overrides collected from CLI flags and environment
/// variables; `None` means "keep whatever the file or defaults said".
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ConnectionConfig {
    /// Resolves the effective configuration: built-in defaults, then the
    /// config file (explicit path, or the per-user default location if it
    /// exists), then flag/env overrides on top.
    pub fn resolve(config_path: Option<&Path>, overrides: ConnectionOverrides) -> Result<Self> {
        let config = match config_path {
            Some(path) => Self::from_yaml_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_yaml_file(&path)?,
                None => Self::default(),
            },
        };
        Ok(config.with_overrides(overrides))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            DealerDbError::Config(format!("{}: {}", path.display(), e))
        })
    }

    /// `<user config dir>/dealerdb/config.yaml`, if a config dir exists on
    /// this platform.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dealerdb").join("config.yaml"))
    }

    pub fn with_overrides(mut self, overrides: ConnectionOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(dbname) = overrides.dbname {
            self.dbname = dbname;
        }
        if let Some(user) = overrides.user {
            self.user = user;
        }
        if let Some(password) = overrides.password {
            self.password = password;
        }
        self
    }

    /// Keyword/value connection string in the form the driver accepts.
    pub fn conn_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            self.host, self.port, self.dbname, self.user, self.password
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_target_local_cars_db() {
        let config = ConnectionConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "cars_db");
        assert_eq!(config.user, "postgres");
        assert_eq!(config.password, "labpass");
    }

    #[test]
    fn test_conn_string_contains_all_keywords() {
        let conn = ConnectionConfig::default().conn_string();
        for keyword in [
            "host=localhost",
            "port=5432",
            "dbname=cars_db",
            "user=postgres",
            "password=labpass",
        ] {
            assert!(conn.contains(keyword), "missing {keyword} in {conn}");
        }
    }

    #[test]
    fn test_yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host: db.internal\nport: 6432\npassword: secret").unwrap();

        let config = ConnectionConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6432);
        assert_eq!(config.password, "secret");
        // Unspecified fields keep their defaults.
        assert_eq!(config.dbname, "cars_db");
        assert_eq!(config.user, "postgres");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host: db.internal\ndatabase: cars_db").unwrap();

        let err = ConnectionConfig::from_yaml_file(file.path()).unwrap_err();
        assert!(matches!(err, DealerDbError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let err = ConnectionConfig::resolve(
            Some(Path::new("/nonexistent/dealerdb.yaml")),
            ConnectionOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DealerDbError::Io(_)));
    }

    #[test]
    fn test_flag_overrides_beat_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host: db.internal\nuser: reporting").unwrap();

        let overrides = ConnectionOverrides {
            host: Some("db.staging".to_string()),
            ..Default::default()
        };
        let config = ConnectionConfig::resolve(Some(file.path()), overrides).unwrap();
        assert_eq!(config.host, "db.staging");
        assert_eq!(config.user, "reporting");
    }
}
