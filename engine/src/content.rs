/// Built-in authoring tables in catalog order, keyed by file stem.
pub fn builtin_bots() -> &'static [(&'static str, &'static str)] {
    &[
        ("glass_monk", include_str!("../content/bots/01_glass_monk.yaml")),
        ("fox_primus", include_str!("../content/bots/02_fox_primus.yaml")),
        ("colossus", include_str!("../content/bots/03_colossus.yaml")),
        ("twilight_baron", include_str!("../content/bots/04_twilight_baron.yaml")),
        (
            "dragonborn_centurion",
            include_str!("../content/bots/05_dragonborn_centurion.yaml"),
        ),
        ("soothing_monk", include_str!("../content/bots/06_soothing_monk.yaml")),
        (
            "whitestar_grappler",
            include_str!("../content/bots/07_whitestar_grappler.yaml"),
        ),
        ("ancient_hero", include_str!("../content/bots/08_ancient_hero.yaml")),
        (
            "jandra_the_negator",
            include_str!("../content/bots/09_jandra_the_negator.yaml"),
        ),
        (
            "dragonborn_firebat",
            include_str!("../content/bots/10_dragonborn_firebat.yaml"),
        ),
    ]
}
