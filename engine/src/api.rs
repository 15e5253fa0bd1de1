use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::{BotId, BotSummary, Catalog};
use crate::choice::Choice;
use crate::resolve::{bracket_label, resolve, Mode, QueryState};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LookupConfig {
    pub bot: BotId,
    #[serde(default = "default_hand_size")]
    pub hand_size: u8,
    #[serde(default)]
    pub choice_index: usize,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub desperate: bool,
    #[serde(default)]
    pub hitback: bool,
    /// YAML stream replacing the built-in bots.
    #[serde(default)]
    pub bots_path: Option<String>,
}

fn default_hand_size() -> u8 {
    QueryState::default().hand_size
}

impl LookupConfig {
    pub fn state(&self) -> QueryState {
        QueryState {
            hand_size: self.hand_size,
            choice_index: self.choice_index,
            mode: self.mode,
            desperate: self.desperate,
            hitback: self.hitback,
        }
        .clamped()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LookupResult {
    pub bot: String,
    pub difficulty: u8,
    pub bracket: String,
    pub state: QueryState,
    pub choice: Choice,
    pub flags: Vec<String>,
}

pub fn load_catalog(bots_path: Option<&str>) -> Result<Catalog> {
    match bots_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load bot tables: {}", path)),
        None => Catalog::builtin().context("built-in bot tables are invalid"),
    }
}

pub fn lookup_in(catalog: &Catalog, cfg: &LookupConfig) -> Result<LookupResult> {
    let bot = catalog
        .get(&cfg.bot)
        .ok_or_else(|| anyhow::anyhow!("bot '{}' not found", cfg.bot))?;
    let state = cfg.state();
    let choice = resolve(bot, &state);
    Ok(LookupResult {
        bot: bot.name.clone(),
        difficulty: bot.difficulty,
        bracket: bracket_label(state.hand_size),
        state,
        flags: choice.flag_labels(),
        choice: choice.clone(),
    })
}

pub fn lookup(cfg: LookupConfig) -> Result<LookupResult> {
    let catalog = load_catalog(cfg.bots_path.as_deref())?;
    lookup_in(&catalog, &cfg)
}

pub fn list_bots(bots_path: Option<&str>) -> Result<Vec<BotSummary>> {
    Ok(load_catalog(bots_path)?.summaries())
}
