//! Move-shorthand compiler.
//!
//! A combo string such as `"Y++DE"` is first parsed into [`ComboStep`]s (move letter plus the
//! number of trailing `+` pumps) and then resolved against a bot's [`MoveSet`] into a [`Choice`].
//!
//! Resolution rules:
//! - damage is the sum of every move's damage plus the pump tiers each step consumed;
//! - hand-size cost: a super costs its meter, otherwise the opener is free and each follow-up
//!   costs one card; `adjust` is the negated total;
//! - kind, speed, height, armor and the initiation flags come from the opening move,
//!   `knockdown` and `edge` from the finishing move;
//! - an override patch, when present, is applied last.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::choice::{Choice, ChoicePatch};
use crate::error::ShorthandError;
use crate::moves::{Move, MoveSet};
use crate::types::{Attributes, MoveType};

pub const PUMP: char = '+';

/// One move reference in a combo string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboStep {
    pub name: char,
    pub pumps: usize,
}

/// Compact authoring token for a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceInit {
    /// `"ABCX"`
    Combo(String),
    /// `["BZ", { adjust: 0 }]`
    Patched(String, ChoicePatch),
    /// A complete choice, used verbatim.
    Resolved(Box<Choice>),
}

impl From<&str> for ChoiceInit {
    fn from(combo: &str) -> Self {
        ChoiceInit::Combo(combo.to_string())
    }
}

impl From<(&str, ChoicePatch)> for ChoiceInit {
    fn from((combo, patch): (&str, ChoicePatch)) -> Self {
        ChoiceInit::Patched(combo.to_string(), patch)
    }
}

impl From<Choice> for ChoiceInit {
    fn from(choice: Choice) -> Self {
        ChoiceInit::Resolved(Box::new(choice))
    }
}

/// Splits a combo string into move references, attaching `+` markers to the preceding move.
pub fn parse_combo(combo: &str) -> Result<Vec<ComboStep>, ShorthandError> {
    let mut steps: Vec<ComboStep> = Vec::new();
    for c in combo.chars() {
        if c == PUMP {
            match steps.last_mut() {
                Some(step) => step.pumps += 1,
                None => {
                    return Err(ShorthandError::PumpWithoutMove {
                        combo: combo.to_string(),
                    });
                }
            }
        } else {
            steps.push(ComboStep { name: c, pumps: 0 });
        }
    }
    if steps.is_empty() {
        return Err(ShorthandError::EmptyCombo);
    }
    Ok(steps)
}

pub fn compile(init: &ChoiceInit, moves: &MoveSet) -> Result<Choice, ShorthandError> {
    match init {
        ChoiceInit::Combo(combo) => compile_combo(combo, moves, None),
        ChoiceInit::Patched(combo, patch) => compile_combo(combo, moves, Some(patch)),
        ChoiceInit::Resolved(choice) => Ok(choice.as_ref().clone()),
    }
}

fn compile_combo(
    combo: &str,
    moves: &MoveSet,
    patch: Option<&ChoicePatch>,
) -> Result<Choice, ShorthandError> {
    let steps = parse_combo(combo)?;

    let mut chain: Vec<&Move> = Vec::with_capacity(steps.len());
    let mut damage = 0;
    let mut cost = 0;
    for (index, step) in steps.iter().enumerate() {
        let mv = moves.lookup(step.name, combo)?;
        let tiers = mv
            .pump_damage
            .get(..step.pumps)
            .ok_or_else(|| ShorthandError::PumpOverflow {
                name: mv.name,
                count: step.pumps,
                available: mv.pump_damage.len(),
                combo: combo.to_string(),
            })?;

        damage += mv.attrs.damage + tiers.iter().sum::<i32>();
        cost += if mv.attrs.is_super {
            mv.meter
        } else if index == 0 {
            0
        } else {
            1
        };
        chain.push(mv);
    }

    // parse_combo guarantees at least one step
    let first = chain[0];
    let last = chain[chain.len() - 1];
    let has_followup = chain.len() > 1;

    let mut attrs = Attributes::new(first.attrs.kind);
    attrs.damage = damage;
    attrs.block_damage = first.attrs.block_damage;
    attrs.speed = first.attrs.speed;
    attrs.level = first.attrs.level;
    attrs.height = first.attrs.height;
    attrs.armor = first.attrs.armor;
    attrs.recur = first.attrs.recur;
    attrs.draw_on_block = first.attrs.draw_on_block;
    attrs.lockdown = first.attrs.lockdown;
    attrs.is_super = first.attrs.is_super;
    attrs.is_unsafe = first.attrs.is_unsafe;
    attrs.backstep = first.attrs.backstep;
    attrs.undodgeable = first.attrs.undodgeable;
    attrs.unblockable = first.attrs.unblockable;
    attrs.transform = first.attrs.transform;

    attrs.knockdown = last.attrs.knockdown;
    attrs.edge = last.attrs.edge;

    attrs.self_damage = chain.iter().map(|m| m.attrs.self_damage).sum();
    attrs.self_heal = chain.iter().map(|m| m.attrs.self_heal).sum();
    attrs.freeze = chain.iter().any(|m| m.attrs.freeze);
    attrs.oblivion = chain.iter().any(|m| m.attrs.oblivion);

    let mut choice = Choice {
        description: describe(combo, first, has_followup),
        first_damage: if has_followup { first.attrs.damage } else { 0 },
        adjust: -cost,
        always: first.attrs.is_super,
        attrs,
    };

    if let Some(patch) = patch {
        patch.apply(&mut choice);
        if choice.adjust > 0 {
            return Err(ShorthandError::PositiveAdjust {
                adjust: choice.adjust,
                combo: combo.to_string(),
            });
        }
    }

    debug!(
        combo,
        damage = choice.attrs.damage,
        adjust = choice.adjust,
        "compiled shorthand"
    );
    Ok(choice)
}

/// Blocks carry no text; combos render as `"A → BCX"` using the raw remainder of the string.
fn describe(combo: &str, first: &Move, has_followup: bool) -> String {
    if matches!(first.attrs.kind, MoveType::BlockLow | MoveType::BlockHigh) {
        return String::new();
    }
    if !has_followup {
        return first.name.to_string();
    }
    let mut chars = combo.chars();
    let head = chars.next().unwrap_or(first.name);
    format!("{} → {}", head, chars.as_str())
}
