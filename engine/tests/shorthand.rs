use y2_engine::{
    compile, Attributes, ChoiceInit, ChoicePatch, MoveSet, MoveSpec, MoveType, ShorthandError,
    StrikeHeight,
};

fn moves() -> MoveSet {
    [
        ('A', MoveSpec::strike(3, 8).height(StrikeHeight::Low)),
        ('B', MoveSpec::strike(4, 7).height(StrikeHeight::Low)),
        ('C', MoveSpec::strike(5, 6)),
        ('D', MoveSpec::strike(6, 5).height(StrikeHeight::High)),
        ('E', MoveSpec::strike(7, 4).height(StrikeHeight::High)),
        ('t', MoveSpec::throw(7, 5)),
        ('h', MoveSpec::block_high()),
        ('l', MoveSpec::block_low()),
        ('d', MoveSpec::dodge()),
        (
            'X',
            MoveSpec::projectile(8, 7).block_damage(4).with(|p| p.edge = Some(true)),
        ),
        ('Y', MoveSpec::strike(1, 9).block_damage(1).pump(&[4, 4])),
        (
            'Z',
            MoveSpec::strike(7, 7)
                .block_damage(1)
                .height(StrikeHeight::High)
                .with(|p| p.knockdown = Some(true)),
        ),
        (
            '1',
            MoveSpec::strike(20, 15)
                .super_meter(2)
                .block_damage(1)
                .with(|p| p.is_unsafe = Some(true)),
        ),
    ]
    .into_iter()
    .collect()
}

fn run(combo: &str) -> Result<y2_engine::Choice, ShorthandError> {
    compile(&ChoiceInit::from(combo), &moves())
}

#[test]
fn two_move_combo_takes_height_from_opener_and_knockdown_from_finisher() {
    let c = run("BZ").unwrap();
    assert_eq!(c.attrs.damage, 11);
    assert_eq!(c.first_damage, 4);
    assert_eq!(c.attrs.height, StrikeHeight::Low);
    assert!(c.attrs.knockdown);
    assert_eq!(c.attrs.block_damage, 0);
    assert_eq!(c.attrs.speed, 7);
    assert_eq!(c.adjust, -1);
    insta::assert_snapshot!(c.description, @"B → Z");
}

#[test]
fn single_move_has_no_first_damage_and_costs_nothing() {
    let c = run("X").unwrap();
    assert_eq!(c.attrs.kind, MoveType::Projectile);
    assert_eq!(c.attrs.damage, 8);
    assert_eq!(c.first_damage, 0);
    assert_eq!(c.adjust, 0);
    assert_eq!(c.attrs.level, 1);
    assert!(c.attrs.recur && c.attrs.lockdown && c.attrs.edge);
    assert_eq!(c.description, "X");
}

#[test]
fn pumps_consume_tiers_in_order() {
    let c = run("Y++").unwrap();
    assert_eq!(c.attrs.damage, 1 + 4 + 4);
    assert_eq!(c.adjust, 0);
    assert_eq!(c.description, "Y");

    let c = run("Y+DE").unwrap();
    assert_eq!(c.attrs.damage, 1 + 4 + 6 + 7);
    assert_eq!(c.first_damage, 1);
    assert_eq!(c.adjust, -2);
    insta::assert_snapshot!(c.description, @"Y → +DE");
}

#[test]
fn pumping_past_the_table_fails() {
    assert_eq!(
        run("Y+++"),
        Err(ShorthandError::PumpOverflow {
            name: 'Y',
            count: 3,
            available: 2,
            combo: "Y+++".into(),
        })
    );
    assert!(matches!(run("A+"), Err(ShorthandError::PumpOverflow { name: 'A', .. })));
}

#[test]
fn pump_counter_resets_on_each_move() {
    let c = run("Y++dY++").unwrap();
    assert_eq!(c.attrs.damage, 9 + 9);
}

#[test]
fn authoring_errors() {
    assert_eq!(run(""), Err(ShorthandError::EmptyCombo));
    assert_eq!(
        run("+Y"),
        Err(ShorthandError::PumpWithoutMove { combo: "+Y".into() })
    );
    assert_eq!(
        run("AQ"),
        Err(ShorthandError::UnknownMove {
            name: 'Q',
            combo: "AQ".into()
        })
    );
}

#[test]
fn super_costs_meter_wherever_it_appears() {
    let c = run("1").unwrap();
    assert_eq!(c.adjust, -2);
    assert!(c.always);
    assert!(c.attrs.is_unsafe);

    // opener free, two follow-ups, then the super's meter
    let c = run("ABC1").unwrap();
    assert_eq!(c.adjust, -(0 + 1 + 1 + 2));
    assert!(!c.always);

    let c = run("1DE").unwrap();
    assert_eq!(c.adjust, -(2 + 1 + 1));
    assert!(c.always);
}

#[test]
fn blocks_have_no_description() {
    let c = run("l").unwrap();
    assert_eq!(c.attrs.kind, MoveType::BlockLow);
    assert!(c.description.is_empty());
    assert!(c.attrs.draw_on_block && c.attrs.recur);

    let c = run("h").unwrap();
    assert!(c.description.is_empty());
}

#[test]
fn throw_combo_ends_without_knockdown() {
    let c = run("tCD").unwrap();
    assert_eq!(c.attrs.kind, MoveType::Throw);
    assert_eq!(c.attrs.damage, 18);
    assert_eq!(c.first_damage, 7);
    assert!(!c.attrs.knockdown);
    assert_eq!(c.description, "t → CD");
}

#[test]
fn patch_fields_replace_computed_values() {
    let patch = ChoicePatch {
        adjust: Some(0),
        always: Some(true),
        description: Some("special".into()),
        ..Default::default()
    };
    let c = compile(&ChoiceInit::from(("BZ", patch)), &moves()).unwrap();
    assert_eq!(c.adjust, 0);
    assert!(c.always);
    assert_eq!(c.description, "special");
    assert_eq!(c.attrs.damage, 11);
}

#[test]
fn patch_can_clear_a_flag() {
    let mut patch = ChoicePatch::default();
    patch.attrs.knockdown = Some(false);
    let c = compile(&ChoiceInit::from(("dt", patch)), &moves()).unwrap();
    assert!(!c.attrs.knockdown);
    assert_eq!(c.attrs.kind, MoveType::Dodge);
}

#[test]
fn resolved_choice_passes_through_untouched() {
    let mut choice = y2_engine::Choice::new(Attributes::template(MoveType::BlockFull));
    choice.description = "b".into();
    choice.adjust = -3;
    let out = compile(&ChoiceInit::from(choice.clone()), &MoveSet::default()).unwrap();
    assert_eq!(out, choice);
}

#[test]
fn card_text_summarises_the_choice() {
    let c = run("1").unwrap();
    insta::assert_snapshot!(c.to_string(), @"Strike 20 spd 15R blk 1 adj -2! | 1 | ⚠");

    let c = run("BZ").unwrap();
    insta::assert_snapshot!(c.to_string(), @"Strike 11 (4) spd 7 adj -1 | B → Z | KD");
}
