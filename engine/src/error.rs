use thiserror::Error;

/// Authoring errors found while compiling a single shorthand token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShorthandError {
    #[error("combo must reference at least one move")]
    EmptyCombo,
    #[error("pump symbol must follow a move in '{combo}'")]
    PumpWithoutMove { combo: String },
    #[error("unknown move '{name}' in '{combo}'")]
    UnknownMove { name: char, combo: String },
    #[error("move {name} cannot be pumped {count} times (has {available} pump tiers) in '{combo}'")]
    PumpOverflow {
        name: char,
        count: usize,
        available: usize,
        combo: String,
    },
    #[error("override sets a positive adjust ({adjust}) in '{combo}'")]
    PositiveAdjust { adjust: i32, combo: String },
}

/// Anything wrong with a bot table, from a bad combo string to out-of-range numbers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthoringError {
    #[error(transparent)]
    Shorthand(#[from] ShorthandError),
    #[error("difficulty {0} is outside 1-5")]
    Difficulty(u8),
    #[error("move '{name}' has negative {field} ({value})")]
    NegativeValue {
        name: char,
        field: &'static str,
        value: i32,
    },
    #[error("code '{0}' is already used by another bot")]
    DuplicateCode(String),
}

/// An authoring error located inside a bot's table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bot '{bot}', {row}: {source}")]
pub struct BuildError {
    pub bot: String,
    /// Row and slot label, e.g. `normal[2] slot 5`, `dragon hitback` or `moves`.
    pub row: String,
    #[source]
    pub source: AuthoringError,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read bot tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse bot table: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Build(#[from] BuildError),
}
