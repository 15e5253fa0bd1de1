pub mod api;
pub mod bot;
pub mod catalog;
pub mod choice;
pub mod content;
pub mod dice;
pub mod error;
pub mod flags;
pub mod moves;
pub mod resolve;
pub mod shorthand;
pub mod types;

pub use bot::{
    as_hitback, assemble, hand_neutral, with_speed_floor, BotDefinition, BotShorthand, ChoiceRow,
    OverrideRow, SituationalRow,
};
pub use catalog::{bot_code, BotId, Catalog};
pub use choice::{Choice, ChoicePatch};
pub use dice::Dice;
pub use error::{AuthoringError, BuildError, CatalogError, ShorthandError};
pub use moves::{Move, MoveSet, MoveSpec};
pub use resolve::{bracket_index, choice_row, resolve, Mode, QueryState, ResolvedRow};
pub use shorthand::{compile, parse_combo, ChoiceInit, ComboStep};
pub use types::{ArmorType, AttributePatch, Attributes, MoveType, NoUnknownKeys, StrikeHeight};
