use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Overrides the default `~/.kumbaras` location
pub const HOME_ENV: &str = "KUMBARAS_HOME";

/// File-backed state: config plus one processed CSV per month.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// `$KUMBARAS_HOME`, else `~/.kumbaras`; created if missing.
    pub fn locate() -> Result<Self> {
        let root = match std::env::var_os(HOME_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = std::env::var("HOME").context("HOME is not set")?;
                PathBuf::from(home).join(".kumbaras")
            }
        };
        Self::at(root)
    }

    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let ws = Self { root: root.into() };
        fs::create_dir_all(ws.processed_dir())
            .with_context(|| format!("create {}", ws.processed_dir().display()))?;
        Ok(ws)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("processed")
    }

    pub fn month_path(&self, month: &str) -> PathBuf {
        self.processed_dir().join(format!("corrected_{month}.csv"))
    }

    /// Months with a processed file, newest first
    pub fn months(&self) -> Result<Vec<String>> {
        let dir = self.processed_dir();
        let mut months: Vec<String> = fs::read_dir(&dir)
            .with_context(|| format!("read {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let month = name.strip_prefix("corrected_")?.strip_suffix(".csv")?;
                Some(month.to_string())
            })
            .collect();
        months.sort();
        months.reverse();
        Ok(months)
    }

    /// `month` if given, else the newest processed month
    pub fn resolve_month(&self, month: Option<String>) -> Result<String> {
        match month {
            Some(m) => Ok(m),
            None => self
                .months()?
                .into_iter()
                .next()
                .context("no processed months yet. Run: kumbaras import <statement>"),
        }
    }
}
