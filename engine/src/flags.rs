//! Icon legend for the boolean card flags and the non-boolean specials.

use crate::types::{ArmorType, Attributes};

#[derive(Debug, Clone, Copy)]
pub struct FlagDef {
    pub key: &'static str,
    pub icon: &'static str,
    pub desc: &'static str,
    pub is_set: fn(&Attributes) -> bool,
}

const fn def(
    key: &'static str,
    icon: &'static str,
    desc: &'static str,
    is_set: fn(&Attributes) -> bool,
) -> FlagDef {
    FlagDef {
        key,
        icon,
        desc,
        is_set,
    }
}

pub const FLAGS: &[FlagDef] = &[
    def("unsafe", "⚠", "Unsafe on block", |a| a.is_unsafe),
    def("edge", "⊕", "Edge on block or hit", |a| a.edge),
    def("knockdown", "KD", "Knockdown on hit", |a| a.knockdown),
    def("recur", "RECUR", "+1 handsize if not hit", |a| a.recur),
    def("lockdown", "LOCK", "Prevent draw from block", |a| a.lockdown),
    def("draw", "DRAW", "+1 handsize if blocked a strike", |a| a.draw_on_block),
    def(
        "backstep",
        "STEP",
        "Beats normal/special strikes of speed 8 or higher",
        |a| a.backstep,
    ),
    def("undodgeable", "CAN'T DODGE", "Cannot be dodged", |a| a.undodgeable),
    def("unblockable", "CAN'T BLOCK", "Cannot be blocked", |a| a.unblockable),
    def(
        "freeze",
        "FREEZE",
        "If this hits on the bot's turn, skip your next main phase",
        |a| a.freeze,
    ),
    def(
        "oblivion",
        "BREAK",
        "If this hits, remove a random discarded card from the game",
        |a| a.oblivion,
    ),
    def("transform", "DRAGON", "Transforms into a dragon", |a| a.transform),
];

const ARMOR_NOTE: &str = "If your faster attack hits the bot's armored attack, your attack can't \
combo, pump, or knock the bot down. Then the bot's attack hits you.";

pub const SPECIAL_FLAGS: &[FlagDef] = &[
    def("armor_light", "[L]", "Has armor versus A, B, C normal attacks.", |a| {
        a.armor == ArmorType::Light
    }),
    def("armor_medium", "[M]", "Has armor versus normal attacks.", |a| {
        a.armor == ArmorType::Medium
    }),
    def("armor_heavy", "[H]", "Has armor versus normal and special attacks.", |a| {
        a.armor == ArmorType::Heavy
    }),
    def("self_damage", "(X) SELF DMG", "The bot takes (X) damage", |a| a.self_damage != 0),
    def("self_heal", "(X) SELF HEAL", "The bot heals (X) damage", |a| a.self_heal != 0),
];

pub fn armor_note() -> &'static str {
    ARMOR_NOTE
}

pub(crate) fn labels_for(attrs: &Attributes) -> Vec<String> {
    let mut labels: Vec<String> = FLAGS
        .iter()
        .filter(|f| (f.is_set)(attrs))
        .map(|f| f.icon.to_string())
        .collect();

    match attrs.armor {
        ArmorType::None => {}
        ArmorType::Light => labels.push("[L]".into()),
        ArmorType::Medium => labels.push("[M]".into()),
        ArmorType::Heavy => labels.push("[H]".into()),
    }
    if attrs.self_damage != 0 {
        labels.push(format!("{} SELF DMG", attrs.self_damage));
    }
    if attrs.self_heal != 0 {
        labels.push(format!("{} SELF HEAL", attrs.self_heal));
    }
    labels
}

/// `★★☆☆☆` for difficulty 2.
pub fn difficulty_stars(difficulty: u8) -> String {
    let filled = difficulty.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
