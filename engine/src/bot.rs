//! Bot assembler: turns an authoring table into an immutable [`BotDefinition`].

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::choice::Choice;
use crate::error::{AuthoringError, BuildError};
use crate::moves::MoveSet;
use crate::shorthand::{compile, ChoiceInit};

pub const ROW_LEN: usize = 8;
pub const BRACKETS: usize = 4;

/// Lowest wakeup speed; anything faster is slowed to the reversal threshold.
pub const WAKEUP_SPEED_FLOOR: i32 = 10;

/// Star rating range shown on the bot list.
pub const DIFFICULTY: RangeInclusive<u8> = 1..=5;

/// Hand-size brackets covered by `normal[0..4]`.
pub const BRACKET_RANGES: [(u8, u8); BRACKETS] = [(5, 6), (7, 8), (9, 10), (11, 12)];

/* ---------------- authoring shapes ---------------- */

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BracketShorthand {
    pub choices: [ChoiceInit; ROW_LEN],
    pub hitback: ChoiceInit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowShorthand {
    pub choices: [ChoiceInit; ROW_LEN],
    #[serde(default)]
    pub hitback: Option<ChoiceInit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideShorthand {
    pub choices: [Option<ChoiceInit>; ROW_LEN],
    #[serde(default)]
    pub hitback: Option<ChoiceInit>,
}

/// One bot's hand-written table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotShorthand {
    pub name: String,
    pub difficulty: u8,
    pub moves: MoveSet,
    pub normal: [BracketShorthand; BRACKETS],
    pub knockdown: RowShorthand,
    #[serde(default)]
    pub wakeup: Option<RowShorthand>,
    #[serde(default)]
    pub dragon: Option<RowShorthand>,
    #[serde(default)]
    pub desperate: Option<OverrideShorthand>,
}

/* ---------------- resolved shapes ---------------- */

/// Eight choices, indexed by roll, plus the retaliation after a blocked attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceRow {
    pub choices: [Choice; ROW_LEN],
    pub hitback: Choice,
}

/// A complete replacement row; without its own hitback the base row's is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SituationalRow {
    pub choices: [Choice; ROW_LEN],
    pub hitback: Option<Choice>,
}

/// Sparse overlay; `None` slots inherit the base row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideRow {
    pub choices: [Option<Choice>; ROW_LEN],
    pub hitback: Option<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotDefinition {
    pub name: String,
    pub difficulty: u8,
    pub normal: [ChoiceRow; BRACKETS],
    pub knockdown: SituationalRow,
    pub wakeup: Option<SituationalRow>,
    pub dragon: Option<SituationalRow>,
    pub desperate: Option<OverrideRow>,
}

/* ---------------- transforms ---------------- */

/// Strips combo-initiation data from a retaliation move and charges the extra card.
pub fn as_hitback(mut hitback: Choice) -> Choice {
    hitback.always = false;
    hitback.attrs.is_unsafe = false;
    hitback.attrs.backstep = false;
    hitback.attrs.recur = false;
    hitback.attrs.lockdown = false;
    hitback.attrs.speed = 0;
    hitback.attrs.block_damage = 0;
    hitback.first_damage = 0;
    // supers only cost meter
    if !hitback.attrs.is_super {
        hitback.adjust -= 1;
    }
    hitback
}

pub fn with_speed_floor(mut choice: Choice) -> Choice {
    if choice.attrs.speed != 0 && choice.attrs.speed < WAKEUP_SPEED_FLOOR {
        choice.attrs.speed = WAKEUP_SPEED_FLOOR;
    }
    choice
}

/// Dragon-form moves never touch hand size.
pub fn hand_neutral(mut choice: Choice) -> Choice {
    choice.adjust = 0;
    choice.attrs.recur = false;
    choice.attrs.draw_on_block = false;
    choice
}

impl SituationalRow {
    fn map(self, f: impl Fn(Choice) -> Choice) -> Self {
        Self {
            choices: self.choices.map(&f),
            hitback: self.hitback.map(&f),
        }
    }
}

/* ---------------- assembly ---------------- */

struct Assembler<'a> {
    bot: &'a str,
    moves: &'a MoveSet,
}

impl Assembler<'_> {
    fn error(&self, row: String, source: impl Into<AuthoringError>) -> BuildError {
        BuildError {
            bot: self.bot.to_string(),
            row,
            source: source.into(),
        }
    }

    fn check_numbers(&self, difficulty: u8) -> Result<(), BuildError> {
        if !DIFFICULTY.contains(&difficulty) {
            return Err(self.error("difficulty".into(), AuthoringError::Difficulty(difficulty)));
        }
        for mv in self.moves.iter() {
            mv.validate().map_err(|e| self.error("moves".into(), e))?;
        }
        Ok(())
    }

    fn compile(&self, init: &ChoiceInit, row: impl FnOnce() -> String) -> Result<Choice, BuildError> {
        compile(init, self.moves).map_err(|source| self.error(row(), source))
    }

    fn row(&self, label: &str, inits: &[ChoiceInit; ROW_LEN]) -> Result<[Choice; ROW_LEN], BuildError> {
        let mut out = Vec::with_capacity(ROW_LEN);
        for (slot, init) in inits.iter().enumerate() {
            out.push(self.compile(init, || format!("{} slot {}", label, slot + 1))?);
        }
        Ok(into_row(out))
    }

    fn hitback(&self, label: &str, init: &ChoiceInit) -> Result<Choice, BuildError> {
        self.compile(init, || format!("{} hitback", label))
            .map(as_hitback)
    }

    fn situational(&self, label: &str, init: &RowShorthand) -> Result<SituationalRow, BuildError> {
        let choices = self.row(label, &init.choices)?;
        let hitback = init
            .hitback
            .as_ref()
            .map(|h| self.hitback(label, h))
            .transpose()?;
        Ok(SituationalRow { choices, hitback })
    }

    fn overrides(&self, init: &OverrideShorthand) -> Result<OverrideRow, BuildError> {
        let mut out = Vec::with_capacity(ROW_LEN);
        for (slot, init) in init.choices.iter().enumerate() {
            let choice = init
                .as_ref()
                .map(|c| self.compile(c, || format!("desperate slot {}", slot + 1)))
                .transpose()?;
            out.push(choice);
        }
        let hitback = init
            .hitback
            .as_ref()
            .map(|h| self.hitback("desperate", h))
            .transpose()?;
        Ok(OverrideRow {
            choices: into_row(out),
            hitback,
        })
    }
}

fn into_row<T>(items: Vec<T>) -> [T; ROW_LEN] {
    match items.try_into() {
        Ok(row) => row,
        // callers always push exactly ROW_LEN items
        Err(items) => unreachable!("row has {} items", items.len()),
    }
}

/// Compiles every table of one bot. Any authoring error aborts the whole bot.
pub fn assemble(init: &BotShorthand) -> Result<BotDefinition, BuildError> {
    let asm = Assembler {
        bot: &init.name,
        moves: &init.moves,
    };
    asm.check_numbers(init.difficulty)?;

    let mut normal = Vec::with_capacity(BRACKETS);
    for (index, bracket) in init.normal.iter().enumerate() {
        let label = format!("normal[{}]", index);
        normal.push(ChoiceRow {
            choices: asm.row(&label, &bracket.choices)?,
            hitback: asm.hitback(&label, &bracket.hitback)?,
        });
    }
    let normal: [ChoiceRow; BRACKETS] = match normal.try_into() {
        Ok(rows) => rows,
        Err(rows) => unreachable!("{} brackets", rows.len()),
    };

    let knockdown = asm.situational("knockdown", &init.knockdown)?;
    let wakeup = init
        .wakeup
        .as_ref()
        .map(|w| asm.situational("wakeup", w).map(|row| row.map(with_speed_floor)))
        .transpose()?;
    let dragon = init
        .dragon
        .as_ref()
        .map(|d| asm.situational("dragon", d).map(|row| row.map(hand_neutral)))
        .transpose()?;
    let desperate = init.desperate.as_ref().map(|d| asm.overrides(d)).transpose()?;

    debug!(
        bot = %init.name,
        moves = init.moves.len(),
        wakeup = wakeup.is_some(),
        dragon = dragon.is_some(),
        desperate = desperate.is_some(),
        "assembled bot"
    );

    Ok(BotDefinition {
        name: init.name.clone(),
        difficulty: init.difficulty,
        normal,
        knockdown,
        wakeup,
        dragon,
        desperate,
    })
}

impl BotShorthand {
    pub fn assemble(&self) -> Result<BotDefinition, BuildError> {
        assemble(self)
    }
}
