//! Per-bot move registry.
//!
//! Moves are authored as sparse [`MoveSpec`]s keyed by a single character and completed
//! against the template for their kind when the registry is built.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AuthoringError, ShorthandError};
use crate::types::{
    ArmorType, AttributePatch, Attributes, MoveType, NoUnknownKeys, StrikeHeight,
};

/// Authoring-level move: a kind plus whatever differs from that kind's template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MoveSpec {
    pub kind: MoveType,
    #[serde(flatten)]
    pub attrs: AttributePatch,
    #[serde(default)]
    pub pump_damage: Vec<i32>,
    /// Super meter spent; only meaningful with `super`.
    #[serde(default)]
    pub meter: i32,
    #[serde(flatten)]
    pub unknown: NoUnknownKeys,
}

impl MoveSpec {
    pub fn new(kind: MoveType) -> Self {
        Self {
            kind,
            attrs: AttributePatch::default(),
            pump_damage: Vec::new(),
            meter: 0,
            unknown: NoUnknownKeys,
        }
    }

    pub fn strike(damage: i32, speed: i32) -> Self {
        Self::new(MoveType::Strike).damage(damage).speed(speed)
    }

    pub fn throw(damage: i32, speed: i32) -> Self {
        Self::new(MoveType::Throw).damage(damage).speed(speed)
    }

    pub fn projectile(damage: i32, speed: i32) -> Self {
        Self::new(MoveType::Projectile).damage(damage).speed(speed)
    }

    pub fn dodge() -> Self {
        Self::new(MoveType::Dodge)
    }

    pub fn block_low() -> Self {
        Self::new(MoveType::BlockLow)
    }

    pub fn block_high() -> Self {
        Self::new(MoveType::BlockHigh)
    }

    pub fn damage(mut self, damage: i32) -> Self {
        self.attrs.damage = Some(damage);
        self
    }

    pub fn speed(mut self, speed: i32) -> Self {
        self.attrs.speed = Some(speed);
        self
    }

    pub fn block_damage(mut self, damage: i32) -> Self {
        self.attrs.block_damage = Some(damage);
        self
    }

    pub fn height(mut self, height: StrikeHeight) -> Self {
        self.attrs.height = Some(height);
        self
    }

    pub fn armor(mut self, armor: ArmorType) -> Self {
        self.attrs.armor = Some(armor);
        self
    }

    pub fn pump(mut self, tiers: &[i32]) -> Self {
        self.pump_damage = tiers.to_vec();
        self
    }

    /// Marks the move as a super costing `meter`.
    pub fn super_meter(mut self, meter: i32) -> Self {
        self.attrs.is_super = Some(true);
        self.meter = meter;
        self
    }

    /// Free-form tweak for the flags without a dedicated builder.
    pub fn with(mut self, f: impl FnOnce(&mut AttributePatch)) -> Self {
        f(&mut self.attrs);
        self
    }
}

/// A fully defaulted move tagged with its registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub name: char,
    #[serde(flatten)]
    pub attrs: Attributes,
    pub pump_damage: Vec<i32>,
    pub meter: i32,
}

impl Move {
    pub fn from_spec(name: char, spec: MoveSpec) -> Self {
        let mut attrs = Attributes::template(spec.kind);
        spec.attrs.apply(&mut attrs);
        Self {
            name,
            attrs,
            pump_damage: spec.pump_damage,
            meter: spec.meter,
        }
    }

    /// Numbers feeding damage and hand-size cost must not be negative.
    pub fn validate(&self) -> Result<(), AuthoringError> {
        let a = &self.attrs;
        let fields = [
            ("damage", a.damage),
            ("block_damage", a.block_damage),
            ("self_damage", a.self_damage),
            ("self_heal", a.self_heal),
            ("speed", a.speed),
            ("level", a.level),
            ("meter", self.meter),
        ];
        let tiers = self.pump_damage.iter().map(|&v| ("pump_damage", v));
        match fields.into_iter().chain(tiers).find(|&(_, value)| value < 0) {
            Some((field, value)) => Err(AuthoringError::NegativeValue {
                name: self.name,
                field,
                value,
            }),
            None => Ok(()),
        }
    }
}

/// Immutable character-keyed move dictionary for one bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<char, MoveSpec>")]
pub struct MoveSet {
    moves: IndexMap<char, Move>,
}

impl MoveSet {
    pub fn get(&self, name: char) -> Option<&Move> {
        self.moves.get(&name)
    }

    /// Looks up a move referenced from `combo`, failing with an authoring error if absent.
    pub fn lookup(&self, name: char, combo: &str) -> Result<&Move, ShorthandError> {
        self.get(name).ok_or_else(|| ShorthandError::UnknownMove {
            name,
            combo: combo.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.values()
    }
}

impl From<IndexMap<char, MoveSpec>> for MoveSet {
    fn from(specs: IndexMap<char, MoveSpec>) -> Self {
        specs.into_iter().collect()
    }
}

impl FromIterator<(char, MoveSpec)> for MoveSet {
    fn from_iter<I: IntoIterator<Item = (char, MoveSpec)>>(iter: I) -> Self {
        let moves = iter
            .into_iter()
            .map(|(name, spec)| (name, Move::from_spec(name, spec)))
            .collect();
        Self { moves }
    }
}
