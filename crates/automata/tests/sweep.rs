use popdyn_automata::{Automaton, Grid, RuleSweep, RuleTable, Variant};

#[test]
fn parallel_sweep_matches_individual_runs() {
    let initial = Grid::seeded(40, 0xC0FFEE).unwrap();

    for variant in [Variant::Plain, Variant::Memory] {
        let sweep = RuleSweep::new(variant).run(&initial, 12);

        assert_eq!(sweep.len(), 256);
        for (&rule, history) in &sweep {
            let expected = Automaton::new(RuleTable::from(rule), variant).evolve(&initial, 12);
            assert_eq!(history, &expected, "rule {rule} ({variant:?})");
        }
    }
}

#[test]
fn sweep_keys_are_ordered_rule_numbers() {
    let initial = Grid::single(9, 4).unwrap();
    let sweep = RuleSweep::new(Variant::Memory).run(&initial, 1);

    let rules: Vec<u8> = sweep.keys().copied().collect();
    assert_eq!(rules, (0..=255).collect::<Vec<u8>>());
    assert!(sweep.values().all(|history| history.initial() == &initial));
}

#[test]
fn custom_reach_applies_to_every_rule() {
    let initial = Grid::single(15, 7).unwrap();
    let sweep = RuleSweep::new(Variant::Plain)
        .with_reach(3)
        .unwrap()
        .run(&initial, 2);

    let expected = Automaton::plain(RuleTable::from(90))
        .with_reach(3)
        .unwrap()
        .evolve(&initial, 2);
    assert_eq!(sweep[&90], expected);
    assert_eq!(sweep[&90].to_matrix()[1][4], 1);
    assert_eq!(sweep[&90].to_matrix()[1][10], 1);
}

#[test]
fn every_cell_stays_binary() {
    let initial = Grid::seeded(25, 3).unwrap();
    let sweep = RuleSweep::new(Variant::Memory).run(&initial, 5);

    for history in sweep.values() {
        assert!(history.to_matrix().iter().flatten().all(|&cell| cell <= 1));
        assert!(history.densities().iter().all(|d| (0.0..=1.0).contains(d)));
    }
}
