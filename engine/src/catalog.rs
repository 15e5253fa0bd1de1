//! The process-wide set of assembled bots, built once and then only read.

use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bot::{BotDefinition, BotShorthand};
use crate::content::builtin_bots;
use crate::error::{AuthoringError, BuildError, CatalogError};

/// Stable catalog position (0-based) or short code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BotId {
    Index(usize),
    Code(String),
}

impl FromStr for BotId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<usize>() {
            Ok(index) => BotId::Index(index),
            Err(_) => BotId::Code(s.to_lowercase()),
        })
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotId::Index(i) => write!(f, "#{}", i),
            BotId::Code(code) => f.write_str(code),
        }
    }
}

/// `"Jandra, the Negator"` → `"jandra-the-negator"`.
pub fn bot_code(name: &str) -> String {
    let mut code = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            code.push(c.to_ascii_lowercase());
        } else if !code.is_empty() && !code.ends_with('-') {
            code.push('-');
        }
    }
    while code.ends_with('-') {
        code.pop();
    }
    code
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotSummary {
    pub index: usize,
    pub code: String,
    pub name: String,
    pub difficulty: u8,
}

#[derive(Debug, Clone)]
struct Entry {
    code: String,
    bot: BotDefinition,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    /// Assembles every table or nothing. Codes must be unique so every bot stays reachable.
    pub fn from_shorthands(tables: &[BotShorthand]) -> Result<Self, BuildError> {
        let mut entries: Vec<Entry> = Vec::with_capacity(tables.len());
        for table in tables {
            let bot = table.assemble()?;
            let code = bot_code(&bot.name);
            if entries.iter().any(|e| e.code == code) {
                return Err(BuildError {
                    bot: bot.name,
                    row: "name".into(),
                    source: AuthoringError::DuplicateCode(code),
                });
            }
            entries.push(Entry { code, bot });
        }
        info!(bots = entries.len(), "bot catalog built");
        Ok(Self { entries })
    }

    /// One YAML document per bot.
    pub fn from_yaml_documents<'a>(
        docs: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, CatalogError> {
        let tables = docs
            .into_iter()
            .map(|doc| serde_yaml::from_str::<BotShorthand>(doc))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_shorthands(&tables)?)
    }

    /// A YAML stream with `---`-separated bot documents.
    pub fn from_yaml_stream(text: &str) -> Result<Self, CatalogError> {
        let mut tables = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(text) {
            tables.push(BotShorthand::deserialize(doc)?);
        }
        Ok(Self::from_shorthands(&tables)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_stream(&text)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_documents(builtin_bots().iter().map(|(_, text)| *text))
    }

    pub fn get(&self, id: &BotId) -> Option<&BotDefinition> {
        self.position(id).map(|i| &self.entries[i].bot)
    }

    pub fn position(&self, id: &BotId) -> Option<usize> {
        match id {
            BotId::Index(i) => (*i < self.entries.len()).then_some(*i),
            BotId::Code(code) => {
                let wanted = bot_code(code);
                self.entries.iter().position(|e| e.code == wanted)
            }
        }
    }

    pub fn code(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BotDefinition> {
        self.entries.iter().map(|e| &e.bot)
    }

    pub fn summaries(&self) -> Vec<BotSummary> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, e)| BotSummary {
                index,
                code: e.code.clone(),
                name: e.bot.name.clone(),
                difficulty: e.bot.difficulty,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
