use anyhow::{Context, Result};
use kumbaras_core::{Category, SavingsGoal, default_goals};
use kumbaras_finance::default_limits;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

use crate::state::Workspace;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub display: DisplaySection,
    pub classifier: ClassifierSection,
    /// Monthly limit per category label
    pub budget: BTreeMap<String, f64>,
    pub goals: Vec<SavingsGoal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySection {
    /// IANA timezone used for "today" in goal projections
    pub timezone: String,
    pub top_expenses: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierSection {
    /// How the owner's name appears on transfers to their own accounts
    pub owner_aliases: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplaySection::default(),
            classifier: ClassifierSection::default(),
            budget: default_limits()
                .into_iter()
                .map(|(c, limit)| (c.label().to_string(), limit))
                .collect(),
            goals: default_goals(),
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            timezone: "Europe/Athens".to_string(),
            top_expenses: 10,
        }
    }
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            owner_aliases: vec!["TINIAKOS".to_string(), "ΤΗΝΙΑΚΟΣ".to_string()],
        }
    }
}

impl Config {
    /// Budget limits keyed by category. Unknown labels are skipped with a warning.
    pub fn limits(&self) -> BTreeMap<Category, f64> {
        self.budget
            .iter()
            .filter_map(|(label, limit)| match label.parse::<Category>() {
                Ok(c) => Some((c, *limit)),
                Err(e) => {
                    tracing::warn!("ignoring budget entry: {e}");
                    None
                }
            })
            .collect()
    }

    pub fn set_limit(&mut self, category: Category, limit: f64) {
        self.budget.insert(category.label().to_string(), limit);
    }

    pub fn goal_mut(&mut self, name: &str) -> Option<&mut SavingsGoal> {
        self.goals.iter_mut().find(|g| g.name == name)
    }
}

pub fn load_config(ws: &Workspace) -> Result<Config> {
    let p = ws.config_path();
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(ws: &Workspace, cfg: &Config) -> Result<()> {
    let p = ws.config_path();
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(ws: &Workspace) -> Result<()> {
    let p = ws.config_path();
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(ws, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
