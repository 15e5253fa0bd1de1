use y2_engine::{choice_row, resolve, BotDefinition, BotId, Catalog, Mode, MoveType, QueryState};

fn bot(code: &str) -> BotDefinition {
    Catalog::builtin()
        .unwrap()
        .get(&BotId::Code(code.into()))
        .unwrap()
        .clone()
}

fn query(hand_size: u8, choice_index: usize) -> QueryState {
    QueryState {
        hand_size,
        choice_index,
        ..Default::default()
    }
}

#[test]
fn hand_size_picks_the_bracket() {
    let gm = bot("glass-monk");
    assert_eq!(resolve(&gm, &query(9, 5)).description, "A → BCX");
    assert_eq!(resolve(&gm, &query(10, 5)).description, "A → BCX");
    assert_eq!(resolve(&gm, &query(5, 4)).description, "B → Z");
    assert_eq!(resolve(&gm, &query(8, 4)).description, "A → BC");
    assert_eq!(resolve(&gm, &query(12, 0)).description, "2");
}

#[test]
fn default_query_reads_the_middle_bracket() {
    let gm = bot("glass-monk");
    let c = resolve(&gm, &QueryState::default());
    assert_eq!(c, &gm.normal[2].choices[0]);
}

#[test]
fn hitback_flag_returns_the_retaliation() {
    let gm = bot("glass-monk");
    let state = QueryState {
        hitback: true,
        ..query(5, 3)
    };
    assert_eq!(resolve(&gm, &state), &gm.normal[0].hitback);
}

#[test]
fn knockdown_replaces_the_whole_row() {
    let gm = bot("glass-monk");
    let state = QueryState {
        mode: Mode::Knockdown,
        ..query(5, 0)
    };
    let row = choice_row(&gm, &state);
    assert_eq!(row.choices[0].attrs.kind, MoveType::BlockHigh);
    assert!(row.choices[2..].iter().all(|c| c.description == "Y"));
    // no knockdown hitback authored, so the bracket's stays
    assert_eq!(row.hitback, &gm.normal[0].hitback);
}

#[test]
fn desperate_overlay_wins_over_modes() {
    let gm = bot("glass-monk");
    let state = QueryState {
        mode: Mode::Knockdown,
        desperate: true,
        ..query(11, 4)
    };
    assert_eq!(resolve(&gm, &state).description, "1");

    // null slots inherit the base row, not the knockdown row
    let state = QueryState {
        choice_index: 1,
        ..state
    };
    let c = resolve(&gm, &state);
    assert_eq!(c, &gm.normal[3].choices[1]);
    assert_eq!(c.description, "d → t");

    let state = QueryState {
        hitback: true,
        ..state
    };
    assert_eq!(resolve(&gm, &state), &gm.normal[3].hitback);
}

#[test]
fn desperate_without_an_overlay_falls_through_to_the_mode() {
    let fox = bot("fox-primus");
    let state = QueryState {
        mode: Mode::Knockdown,
        desperate: true,
        ..query(9, 7)
    };
    assert_eq!(resolve(&fox, &state), &fox.knockdown.choices[7]);
}

#[test]
fn undefined_mode_uses_the_base_row() {
    let gm = bot("glass-monk");
    for mode in [Mode::Wakeup, Mode::Dragon] {
        let state = QueryState {
            mode,
            ..query(7, 5)
        };
        assert_eq!(resolve(&gm, &state), &gm.normal[1].choices[5]);
    }
}

#[test]
fn wakeup_row_is_served_floored() {
    let col = bot("colossus");
    let state = QueryState {
        mode: Mode::Wakeup,
        ..query(11, 7)
    };
    let c = resolve(&col, &state);
    assert_eq!(c.attrs.kind, MoveType::Throw);
    assert_eq!(c.attrs.speed, 10);
}

#[test]
fn dragon_mode_uses_its_own_hitback() {
    let dc = bot("dragonborn-centurion");
    let state = QueryState {
        mode: Mode::Dragon,
        hitback: true,
        ..query(6, 0)
    };
    let hb = resolve(&dc, &state);
    assert_eq!(hb.attrs.kind, MoveType::Throw);
    assert_eq!(hb.attrs.damage, 23);
    assert_eq!(hb.adjust, 0);
    assert_ne!(hb, &dc.normal[0].hitback);
}

#[test]
fn every_state_resolves() {
    let catalog = Catalog::builtin().unwrap();
    for bot in catalog.iter() {
        for hand_size in 5..=12 {
            for choice_index in 0..8 {
                for mode in [Mode::None, Mode::Knockdown, Mode::Wakeup, Mode::Dragon] {
                    for (desperate, hitback) in [(false, false), (true, false), (false, true), (true, true)] {
                        let state = QueryState {
                            hand_size,
                            choice_index,
                            mode,
                            desperate,
                            hitback,
                        };
                        assert!(resolve(bot, &state).adjust <= 0);
                    }
                }
            }
        }
    }
}
