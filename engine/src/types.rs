use std::collections::BTreeMap;

use serde::de::{self, IgnoredAny};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    Dodge,
    Throw,
    Strike,
    Projectile,
    BlockLow,
    BlockHigh,
    BlockFull,
}

impl MoveType {
    pub fn is_block(self) -> bool {
        matches!(self, MoveType::BlockLow | MoveType::BlockHigh | MoveType::BlockFull)
    }
}

/// Which block beats a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeHeight {
    Low,
    #[default]
    Mid,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorType {
    #[default]
    None,
    /// vs A, B, C normals
    Light,
    /// vs normals
    Medium,
    /// vs normals and specials
    Heavy,
}

/// Card attributes shared by base moves and resolved choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Attributes {
    pub kind: MoveType,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub block_damage: i32,
    #[serde(default)]
    pub self_damage: i32,
    #[serde(default)]
    pub self_heal: i32,
    /// Above 10 is a reversal.
    #[serde(default)]
    pub speed: i32,
    /// Projectile level, 0 for everything else.
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub height: StrikeHeight,
    #[serde(default)]
    pub armor: ArmorType,

    #[serde(default, rename = "super")]
    pub is_super: bool,
    #[serde(default, rename = "unsafe")]
    pub is_unsafe: bool, // hit back if blocked
    #[serde(default)]
    pub knockdown: bool,
    #[serde(default)]
    pub edge: bool,
    #[serde(default)]
    pub recur: bool, // draw if not hit
    #[serde(default)]
    pub draw_on_block: bool,
    #[serde(default)]
    pub lockdown: bool, // prevent draw on block
    #[serde(default)]
    pub backstep: bool,
    #[serde(default)]
    pub undodgeable: bool,
    #[serde(default)]
    pub unblockable: bool,
    #[serde(default)]
    pub freeze: bool,
    #[serde(default)]
    pub oblivion: bool,
    #[serde(default)]
    pub transform: bool,
}

impl Attributes {
    /// All numbers zeroed, mid height, no armor, no flags.
    pub fn new(kind: MoveType) -> Self {
        Self {
            kind,
            damage: 0,
            block_damage: 0,
            self_damage: 0,
            self_heal: 0,
            speed: 0,
            level: 0,
            height: StrikeHeight::Mid,
            armor: ArmorType::None,
            is_super: false,
            is_unsafe: false,
            knockdown: false,
            edge: false,
            recur: false,
            draw_on_block: false,
            lockdown: false,
            backstep: false,
            undodgeable: false,
            unblockable: false,
            freeze: false,
            oblivion: false,
            transform: false,
        }
    }

    /// Per-kind template used when a move spec names only its kind.
    pub fn template(kind: MoveType) -> Self {
        let mut attrs = Self::new(kind);
        match kind {
            MoveType::Throw => attrs.knockdown = true,
            MoveType::Projectile => {
                attrs.level = 1;
                attrs.recur = true;
                attrs.lockdown = true;
            }
            MoveType::BlockLow | MoveType::BlockHigh | MoveType::BlockFull => {
                attrs.draw_on_block = true;
                attrs.recur = true;
            }
            MoveType::Strike | MoveType::Dodge => {}
        }
        attrs
    }
}

/// Sparse set of attribute overrides; `Some` fields win when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct AttributePatch {
    pub damage: Option<i32>,
    pub block_damage: Option<i32>,
    pub self_damage: Option<i32>,
    pub self_heal: Option<i32>,
    pub speed: Option<i32>,
    pub level: Option<i32>,
    pub height: Option<StrikeHeight>,
    pub armor: Option<ArmorType>,
    #[serde(rename = "super")]
    pub is_super: Option<bool>,
    #[serde(rename = "unsafe")]
    pub is_unsafe: Option<bool>,
    pub knockdown: Option<bool>,
    pub edge: Option<bool>,
    pub recur: Option<bool>,
    pub draw_on_block: Option<bool>,
    pub lockdown: Option<bool>,
    pub backstep: Option<bool>,
    pub undodgeable: Option<bool>,
    pub unblockable: Option<bool>,
    pub freeze: Option<bool>,
    pub oblivion: Option<bool>,
    pub transform: Option<bool>,
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl AttributePatch {
    pub fn apply(&self, attrs: &mut Attributes) {
        set(&mut attrs.damage, self.damage);
        set(&mut attrs.block_damage, self.block_damage);
        set(&mut attrs.self_damage, self.self_damage);
        set(&mut attrs.self_heal, self.self_heal);
        set(&mut attrs.speed, self.speed);
        set(&mut attrs.level, self.level);
        set(&mut attrs.height, self.height);
        set(&mut attrs.armor, self.armor);
        set(&mut attrs.is_super, self.is_super);
        set(&mut attrs.is_unsafe, self.is_unsafe);
        set(&mut attrs.knockdown, self.knockdown);
        set(&mut attrs.edge, self.edge);
        set(&mut attrs.recur, self.recur);
        set(&mut attrs.draw_on_block, self.draw_on_block);
        set(&mut attrs.lockdown, self.lockdown);
        set(&mut attrs.backstep, self.backstep);
        set(&mut attrs.undodgeable, self.undodgeable);
        set(&mut attrs.unblockable, self.unblockable);
        set(&mut attrs.freeze, self.freeze);
        set(&mut attrs.oblivion, self.oblivion);
        set(&mut attrs.transform, self.transform);
    }
}

/// Catch-all for structs that flatten a patch, where `deny_unknown_fields` is unavailable.
///
/// Declared as the last flattened field, it receives every key no other field claimed and
/// fails on the first one. Serializes to nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoUnknownKeys;

impl<'de> Deserialize<'de> for NoUnknownKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rest = BTreeMap::<String, IgnoredAny>::deserialize(deserializer)?;
        match rest.keys().next() {
            None => Ok(NoUnknownKeys),
            Some(key) => Err(de::Error::custom(format!("unknown field `{}`", key))),
        }
    }
}

impl Serialize for NoUnknownKeys {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_map(Some(0))?.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_follow_kind() {
        let throw = Attributes::template(MoveType::Throw);
        assert!(throw.knockdown);

        let proj = Attributes::template(MoveType::Projectile);
        assert_eq!(proj.level, 1);
        assert!(proj.recur && proj.lockdown);

        let block = Attributes::template(MoveType::BlockFull);
        assert!(block.draw_on_block && block.recur);

        assert_eq!(Attributes::template(MoveType::Strike), Attributes::new(MoveType::Strike));
    }

    #[test]
    fn patch_only_touches_named_fields() {
        let mut attrs = Attributes::template(MoveType::Projectile);
        let patch = AttributePatch {
            lockdown: Some(false),
            level: Some(2),
            ..Default::default()
        };
        patch.apply(&mut attrs);
        assert_eq!(attrs.level, 2);
        assert!(!attrs.lockdown);
        assert!(attrs.recur);
    }

    #[derive(Debug, Deserialize)]
    struct Patched {
        #[serde(flatten)]
        attrs: AttributePatch,
        #[serde(flatten)]
        _rest: NoUnknownKeys,
    }

    #[test]
    fn leftover_keys_fail_after_the_patch_takes_its_own() {
        let ok: Patched = serde_yaml::from_str("{ damage: 4, super: true }").unwrap();
        assert_eq!(ok.attrs.damage, Some(4));
        assert_eq!(ok.attrs.is_super, Some(true));

        let err = serde_yaml::from_str::<Patched>("{ damage: 4, blok_damage: 2 }").unwrap_err();
        assert!(err.to_string().contains("unknown field `blok_damage`"), "{}", err);
    }
}
