use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flags;
use crate::types::{AttributePatch, Attributes, MoveType, NoUnknownKeys};

/// A resolved, display-ready move outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Choice {
    #[serde(flatten)]
    pub attrs: Attributes,
    #[serde(default)]
    pub description: String,
    /// Damage of the opening move of a combo, 0 for single moves.
    #[serde(default)]
    pub first_damage: i32,
    /// Hand-size cost, never positive.
    #[serde(default)]
    pub adjust: i32,
    /// Adjust hand size even if the move whiffs.
    #[serde(default)]
    pub always: bool,
}

impl Choice {
    pub fn new(attrs: Attributes) -> Self {
        Self {
            attrs,
            description: String::new(),
            first_damage: 0,
            adjust: 0,
            always: false,
        }
    }

    pub fn is_reversal(&self) -> bool {
        self.attrs.speed > 10
    }

    /// Active flag labels, in legend order.
    pub fn flag_labels(&self) -> Vec<String> {
        flags::labels_for(&self.attrs)
    }
}

/// Field-by-field override applied after compiling a combo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ChoicePatch {
    pub kind: Option<MoveType>,
    #[serde(flatten)]
    pub attrs: AttributePatch,
    pub description: Option<String>,
    pub first_damage: Option<i32>,
    pub adjust: Option<i32>,
    pub always: Option<bool>,
    #[serde(flatten)]
    pub unknown: NoUnknownKeys,
}

impl ChoicePatch {
    pub fn apply(&self, choice: &mut Choice) {
        if let Some(kind) = self.kind {
            choice.attrs.kind = kind;
        }
        self.attrs.apply(&mut choice.attrs);
        if let Some(description) = &self.description {
            choice.description.clone_from(description);
        }
        if let Some(first_damage) = self.first_damage {
            choice.first_damage = first_damage;
        }
        if let Some(adjust) = self.adjust {
            choice.adjust = adjust;
        }
        if let Some(always) = self.always {
            choice.always = always;
        }
    }

    pub fn adjust(adjust: i32) -> Self {
        Self {
            adjust: Some(adjust),
            ..Default::default()
        }
    }
}

/// One-line card summary, e.g. `11 (4) spd 7 blk 1 adj -1 | B → Z | KD`.
impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.attrs;
        let mut parts: Vec<String> = Vec::new();

        let mut head = format!("{:?}", a.kind);
        if a.damage != 0 {
            head.push_str(&format!(" {}", a.damage));
        }
        if self.first_damage != 0 {
            head.push_str(&format!(" ({})", self.first_damage));
        }
        parts.push(head);

        if a.level != 0 {
            parts.push("I".repeat(a.level.max(0) as usize));
        }
        if a.speed != 0 {
            let marker = if self.is_reversal() { "R" } else { "" };
            parts.push(format!("spd {}{}", a.speed, marker));
        }
        if a.block_damage != 0 {
            parts.push(format!("blk {}", a.block_damage));
        }
        if self.adjust != 0 {
            let bang = if self.always { "!" } else { "" };
            parts.push(format!("adj {}{}", self.adjust, bang));
        }

        write!(f, "{}", parts.join(" "))?;
        if !self.description.is_empty() {
            write!(f, " | {}", self.description)?;
        }
        let labels = self.flag_labels();
        if !labels.is_empty() {
            write!(f, " | {}", labels.join(" "))?;
        }
        Ok(())
    }
}
