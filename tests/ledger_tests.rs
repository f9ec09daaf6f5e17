use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use stakeladder::domain::{
    reconcile, CycleGroups, CycleIndex, CycleLedgerEntry, CycleStatus, Ladder, StakingPlan, Wager,
};
use stakeladder::testkit::domain::wager_in_cycle;

fn plan(start: Decimal, division: u32, cap: Option<Decimal>) -> StakingPlan {
    StakingPlan::try_new(start, division, cap).expect("valid plan")
}

fn ledger(plan: &StakingPlan, wagers: &[Wager], active: u32) -> Vec<CycleLedgerEntry> {
    let active = CycleIndex::new(active);
    let ladder = Ladder::build(plan, active.as_usize()).expect("ladder");
    let groups = CycleGroups::assign(wagers, active);
    reconcile(&ladder, &groups, active).expect("reconcile")
}

#[test]
fn surplus_is_capped_and_carried_forward() {
    let plan = plan(dec!(100), 10, None);
    let wagers = vec![
        wager_in_cycle(0, 0, dec!(20)),
        wager_in_cycle(0, 1, dec!(10)),
    ];

    let entries = ledger(&plan, &wagers, 1);

    assert_eq!(entries[0].planned_stake, dec!(10));
    assert_eq!(entries[0].planned_goal, dec!(25));
    assert_eq!(entries[1].bank_at_start, dec!(125));

    assert_eq!(entries[0].status, CycleStatus::Closed);
    assert_eq!(entries[0].raw_profit, dec!(30));
    assert_eq!(entries[0].display_profit, dec!(25));
    assert_eq!(entries[0].outgoing_carry, dec!(5));
    assert!(entries[0].met_goal);
    assert_eq!(entries[1].incoming_carry, dec!(5));
}

#[test]
fn losing_cycle_carries_no_debt() {
    let plan = plan(dec!(100), 10, None);
    let wagers = vec![wager_in_cycle(0, 0, dec!(-40))];

    let entries = ledger(&plan, &wagers, 1);

    assert_eq!(entries[0].display_profit, dec!(-40));
    assert_eq!(entries[0].outgoing_carry, Decimal::ZERO);
    assert!(!entries[0].met_goal);
    assert_eq!(entries[1].incoming_carry, Decimal::ZERO);
}

#[test]
fn active_cycle_is_uncapped() {
    let plan = plan(dec!(100), 10, None);
    let wagers = vec![
        wager_in_cycle(0, 0, dec!(30)),
        wager_in_cycle(1, 3, dec!(12)),
    ];

    let entries = ledger(&plan, &wagers, 1);
    let active = &entries[1];

    assert_eq!(active.status, CycleStatus::InProgress);
    assert_eq!(active.planned_goal, dec!(31.25));
    assert_eq!(active.display_profit, dec!(17));
    assert_eq!(active.outgoing_carry, Decimal::ZERO);
    assert!(!active.met_goal);
}

#[test]
fn wagers_beyond_active_cycle_are_not_reconciled() {
    let plan = plan(dec!(100), 10, None);
    let wagers = vec![
        wager_in_cycle(0, 0, dec!(5)),
        wager_in_cycle(4, 1, dec!(500)),
    ];

    let entries = ledger(&plan, &wagers, 0);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].raw_profit, dec!(5));
}

/// Deterministic profit pattern mixing wins, losses and big surpluses.
fn synthetic_history(cycles: u32, seed: i64) -> Vec<Wager> {
    let mut wagers = Vec::new();
    for cycle in 0..cycles {
        for n in 0..3u32 {
            let k = i64::from(cycle * 3 + n) + seed;
            let profit = Decimal::from((k * 37) % 61 - 25);
            wagers.push(wager_in_cycle(cycle, cycle * 3 + n, profit));
        }
    }
    wagers
}

#[test]
fn bank_never_decreases_along_the_ladder() {
    for start in [dec!(1), dec!(50), dec!(100), dec!(1234.56)] {
        for division in [1, 3, 10, 20] {
            for cap in [None, Some(dec!(5)), Some(dec!(80))] {
                let ladder = Ladder::build(&plan(start, division, cap), 0).expect("ladder");
                for pair in ladder.steps().windows(2) {
                    assert!(
                        pair[1].bank_at_start >= pair[0].bank_at_start,
                        "bank fell for start={start} division={division} cap={cap:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn carry_conserves_profit_across_past_cycles() {
    let plan = plan(dec!(100), 10, None);
    for seed in 0..12 {
        let wagers = synthetic_history(7, seed);
        let entries = ledger(&plan, &wagers, 6);
        let past = &entries[..entries.len() - 1];

        for entry in past {
            assert_eq!(
                entry.display_profit + entry.outgoing_carry,
                entry.raw_profit + entry.incoming_carry,
                "cycle {} seed {seed}",
                entry.index
            );
        }

        let shown: Decimal = past.iter().map(|e| e.display_profit).sum();
        let raw: Decimal = past.iter().map(|e| e.raw_profit).sum();
        let last_carry = past.last().map_or(Decimal::ZERO, |e| e.outgoing_carry);
        assert_eq!(shown + last_carry, raw, "seed {seed}");
    }
}

#[test]
fn carry_is_never_negative() {
    let plan = plan(dec!(100), 10, Some(dec!(25)));
    for seed in 0..12 {
        let wagers = synthetic_history(9, seed);
        for entry in ledger(&plan, &wagers, 8) {
            assert!(entry.outgoing_carry >= Decimal::ZERO);
            assert!(entry.incoming_carry >= Decimal::ZERO);
        }
    }
}

#[test]
fn reconcile_is_idempotent() {
    let plan = plan(dec!(250), 8, Some(dec!(60)));
    let wagers = synthetic_history(5, 3);

    assert_eq!(ledger(&plan, &wagers, 4), ledger(&plan, &wagers, 4));
}
