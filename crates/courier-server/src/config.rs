use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Runtime settings, read from `COURIER_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Tokens registered at startup.
    pub tokens: Vec<String>,
    /// `None` when retention is disabled (`COURIER_RETENTION_HOURS=0`).
    pub retention_hours: Option<u64>,
    /// `retention_hours` in seconds, bounded to fit an `i64` timestamp offset.
    pub retention_secs: Option<i64>,
    pub cleanup_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("COURIER_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("COURIER_PORT")
            .unwrap_or_else(|| "8000".into())
            .parse()
            .context("COURIER_PORT must be a port number")?;
        let db_path: PathBuf = lookup("COURIER_DB_PATH")
            .unwrap_or_else(|| "courier.db".into())
            .into();
        let tokens: Vec<String> = lookup("COURIER_TOKENS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        // Tokens travel as a path segment, which cannot carry '/'
        if tokens.iter().any(|t| t.contains('/')) {
            bail!("COURIER_TOKENS entries must not contain '/'");
        }
        let retention_hours: u64 = lookup("COURIER_RETENTION_HOURS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("COURIER_RETENTION_HOURS must be a whole number of hours")?
            .unwrap_or(24);
        let cleanup_interval_secs: u64 = lookup("COURIER_CLEANUP_INTERVAL_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("COURIER_CLEANUP_INTERVAL_SECS must be a whole number of seconds")?
            .unwrap_or(3600);

        let retention_hours = (retention_hours > 0).then_some(retention_hours);
        let retention_secs = retention_hours
            .map(|h| {
                i64::try_from(h)
                    .ok()
                    .and_then(|h| h.checked_mul(3600))
                    .context("COURIER_RETENTION_HOURS is out of range")
            })
            .transpose()?;

        Ok(Self {
            host,
            port,
            db_path,
            tokens,
            retention_hours,
            retention_secs,
            cleanup_interval_secs: cleanup_interval_secs.max(1),
        })
    }
}
