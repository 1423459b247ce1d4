use manor_core::manor::{ManorBuilder, ManorConfig, seeded_rng};
use manor_core::{ManorStyle, build_manor};

fn plan_fingerprint(seed: u64) -> u64 {
    build_manor(seed, ManorStyle::OneCorridor)
        .expect("default manor builds")
        .plan()
        .expect("plan renders")
        .fingerprint()
}

#[test]
fn identical_seeds_produce_identical_plans() {
    for seed in [0, 1, 42, 12345, u64::MAX] {
        assert_eq!(plan_fingerprint(seed), plan_fingerprint(seed), "seed {seed}");
    }
}

#[test]
fn different_seeds_produce_more_than_one_plan() {
    let mut fingerprints: Vec<u64> = (0..32).map(plan_fingerprint).collect();
    fingerprints.sort_unstable();
    fingerprints.dedup();

    assert!(fingerprints.len() > 1, "32 seeds all built the same plan");
}

#[test]
fn builder_is_reusable_across_builds() {
    let builder = ManorBuilder::new(ManorConfig::default()).expect("valid config");

    let first = builder.build(&mut seeded_rng(9), ManorStyle::OneCorridor).expect("builds");
    let _other = builder.build(&mut seeded_rng(10), ManorStyle::OneCorridor).expect("builds");
    let again = builder.build(&mut seeded_rng(9), ManorStyle::OneCorridor).expect("builds");

    assert_eq!(first, again);
}

#[test]
fn config_glyphs_change_the_plan_but_not_the_layout() {
    let hashed = ManorConfig { wall_glyph: "%".to_owned(), ..ManorConfig::default() };
    let default_builder = ManorBuilder::new(ManorConfig::default()).expect("valid config");
    let hashed_builder = ManorBuilder::new(hashed).expect("valid config");

    let plain = default_builder.build(&mut seeded_rng(5), ManorStyle::OneCorridor).expect("builds");
    let custom = hashed_builder.build(&mut seeded_rng(5), ManorStyle::OneCorridor).expect("builds");

    assert_eq!(plain.rooms(), custom.rooms());
    let plain_plan = plain.plan().expect("renders");
    let custom_plan = custom.plan().expect("renders");
    assert_eq!(plain_plan.size(), custom_plan.size());
    assert_ne!(plain_plan.fingerprint(), custom_plan.fingerprint());
    assert!(custom_plan.to_string().contains('%'));
}
