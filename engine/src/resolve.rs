//! Query-time lookup: picks the row for the current hand size, applies at most one
//! situational substitution, and returns the requested slot.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bot::{BotDefinition, ChoiceRow, SituationalRow, BRACKETS, BRACKET_RANGES, ROW_LEN};
use crate::choice::Choice;

pub const MIN_HAND: u8 = 5;
pub const MAX_HAND: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    None,
    Knockdown,
    Wakeup,
    Dragon,
}

impl Mode {
    /// Toggle semantics: selecting the active mode switches it off.
    pub fn toggle(self, other: Mode) -> Mode {
        if self == other { Mode::None } else { other }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct QueryState {
    pub hand_size: u8,
    /// 0-based roll or choice index.
    pub choice_index: usize,
    pub mode: Mode,
    pub desperate: bool,
    pub hitback: bool,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            hand_size: 9,
            choice_index: 0,
            mode: Mode::None,
            desperate: false,
            hitback: false,
        }
    }
}

impl QueryState {
    /// Brings hand size and index back into range.
    pub fn clamped(self) -> Self {
        Self {
            hand_size: self.hand_size.clamp(MIN_HAND, MAX_HAND),
            choice_index: self.choice_index.min(ROW_LEN - 1),
            ..self
        }
    }

    pub fn step_hand(self, delta: i32) -> Self {
        let hand = (i32::from(self.hand_size) + delta).clamp(MIN_HAND.into(), MAX_HAND.into());
        Self {
            hand_size: hand as u8,
            ..self
        }
    }

    pub fn step_choice(self, delta: i32) -> Self {
        let max = (ROW_LEN - 1) as i64;
        let index = (self.choice_index as i64 + i64::from(delta)).clamp(0, max);
        Self {
            choice_index: index as usize,
            ..self
        }
    }
}

/// `floor((hand - 5) / 2)`: 5-6 → 0, 7-8 → 1, 9-10 → 2, 11-12 → 3.
pub fn bracket_index(hand_size: u8) -> usize {
    usize::from(hand_size.saturating_sub(MIN_HAND) / 2).min(BRACKETS - 1)
}

/// `"9-10"` for hand size 9.
pub fn bracket_label(hand_size: u8) -> String {
    let (min, max) = BRACKET_RANGES[bracket_index(hand_size)];
    format!("{}-{}", min, max)
}

/// A row assembled from borrowed choices of a bot definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRow<'a> {
    pub choices: [&'a Choice; ROW_LEN],
    pub hitback: &'a Choice,
}

impl<'a> ResolvedRow<'a> {
    fn base(row: &'a ChoiceRow) -> Self {
        Self {
            choices: row.choices.each_ref(),
            hitback: &row.hitback,
        }
    }

    fn substitute(self, row: &'a SituationalRow) -> Self {
        Self {
            choices: row.choices.each_ref(),
            hitback: row.hitback.as_ref().unwrap_or(self.hitback),
        }
    }

    pub fn pick(&self, state: &QueryState) -> &'a Choice {
        if state.hitback {
            self.hitback
        } else {
            self.choices[state.choice_index]
        }
    }
}

pub fn choice_row<'a>(bot: &'a BotDefinition, state: &QueryState) -> ResolvedRow<'a> {
    let mut row = ResolvedRow::base(&bot.normal[bracket_index(state.hand_size)]);

    if state.desperate {
        if let Some(over) = &bot.desperate {
            for (slot, choice) in row.choices.iter_mut().enumerate() {
                if let Some(replacement) = &over.choices[slot] {
                    *choice = replacement;
                }
            }
            if let Some(hitback) = &over.hitback {
                row.hitback = hitback;
            }
            return row;
        }
    }

    let situational = match state.mode {
        Mode::None => None,
        Mode::Knockdown => Some(&bot.knockdown),
        Mode::Wakeup => bot.wakeup.as_ref(),
        Mode::Dragon => bot.dragon.as_ref(),
    };
    match situational {
        Some(over) => row.substitute(over),
        None => {
            if state.mode != Mode::None {
                warn!(bot = %bot.name, mode = ?state.mode, "mode not defined for bot, using base row");
            }
            row
        }
    }
}

/// Expects a clamped state; see [`QueryState::clamped`].
pub fn resolve<'a>(bot: &'a BotDefinition, state: &QueryState) -> &'a Choice {
    choice_row(bot, state).pick(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_cover_two_hand_sizes_each() {
        let idx: Vec<usize> = (MIN_HAND..=MAX_HAND).map(bracket_index).collect();
        assert_eq!(idx, vec![0, 0, 1, 1, 2, 2, 3, 3]);
        assert_eq!(bracket_label(9), "9-10");
    }

    #[test]
    fn stepping_clamps() {
        let s = QueryState::default();
        assert_eq!(s.step_hand(10).hand_size, 12);
        assert_eq!(s.step_hand(-10).hand_size, 5);
        assert_eq!(s.step_choice(-1).choice_index, 0);
        assert_eq!(s.step_choice(20).choice_index, 7);
    }

    #[test]
    fn clamped_fixes_out_of_range_queries() {
        let s = QueryState {
            hand_size: 3,
            choice_index: 11,
            ..Default::default()
        }
        .clamped();
        assert_eq!((s.hand_size, s.choice_index), (5, 7));
    }

    #[test]
    fn toggling_active_mode_turns_it_off() {
        assert_eq!(Mode::Knockdown.toggle(Mode::Knockdown), Mode::None);
        assert_eq!(Mode::Knockdown.toggle(Mode::Wakeup), Mode::Wakeup);
    }
}
