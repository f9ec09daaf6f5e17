use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{FixedOffset, TimeZone, Utc};
use rust_decimal_macros::dec;

use stakeladder::adapter::outbound::{Book, MemoryStore};
use stakeladder::application::LedgerService;
use stakeladder::domain::{Advancement, AdvancementGate, CycleIndex, Wager};
use stakeladder::error::{Error, StoreError};
use stakeladder::port::BookStore;
use stakeladder::testkit::domain::{
    active_days, compounding_project, for_project, standard_project, wager_at,
};

#[test]
fn gate_opens_exactly_at_ten_distinct_days() {
    let gate = AdvancementGate::default();
    for days in 0..=15 {
        let wagers = active_days(0, 0, days, dec!(1));
        assert_eq!(gate.can_advance(&wagers), days >= 10, "{days} days");
    }
}

#[test]
fn repeated_bets_on_one_day_count_once() {
    let gate = AdvancementGate::default();
    let mut wagers = active_days(0, 0, 9, dec!(1));
    wagers.extend(active_days(0, 0, 9, dec!(2)));

    assert_eq!(gate.active_days(&wagers), 9);
    assert!(!gate.can_advance(&wagers));
}

#[test]
fn calendar_days_follow_the_configured_offset() {
    let late = Utc.with_ymd_and_hms(2025, 3, 1, 23, 30, 0).unwrap();
    let early = Utc.with_ymd_and_hms(2025, 3, 2, 0, 30, 0).unwrap();
    let wagers: Vec<Wager> = vec![wager_at(late), wager_at(early)];

    let utc = AdvancementGate::new(2, FixedOffset::east_opt(0).unwrap());
    let brasilia = AdvancementGate::new(2, FixedOffset::west_opt(3 * 3600).unwrap());

    assert!(utc.can_advance(&wagers));
    assert!(!brasilia.can_advance(&wagers));
}

fn ledger_with(wagers: Vec<Wager>) -> (LedgerService<MemoryStore>, stakeladder::domain::ProjectId) {
    let project = compounding_project(dec!(100), 10, None);
    let id = project.id().clone();
    let wagers = wagers
        .into_iter()
        .map(|w| for_project(w, &id))
        .collect();
    let store = MemoryStore::with_book(Book::new(vec![project], wagers));
    (
        LedgerService::new(Arc::new(store), AdvancementGate::default()),
        id,
    )
}

#[test]
fn advancing_moves_exactly_one_cycle_and_resets_activity() {
    let (service, id) = ledger_with(active_days(0, 0, 12, dec!(3)));

    assert!(service.advance(&id).unwrap().is_advanced());

    let ledger = service.view(&id).unwrap();
    assert_eq!(ledger.project.active_cycle(), CycleIndex::new(1));
    assert_eq!(ledger.entries.len(), 2);
    let gate = ledger.gate.unwrap();
    assert_eq!(gate.active_days, 0);
    assert!(!gate.can_advance);

    let again = service.advance(&id).unwrap();
    assert_eq!(
        again,
        Advancement::Rejected {
            active_days: 0,
            required: 10
        }
    );
}

#[test]
fn standard_projects_cannot_advance() {
    let project = standard_project(dec!(100));
    let id = project.id().clone();
    let store = MemoryStore::with_book(Book::new(vec![project], Vec::new()));
    let service = LedgerService::new(Arc::new(store), AdvancementGate::default());

    assert_eq!(service.advance(&id).unwrap(), Advancement::NotCompounding);
}

#[test]
fn racing_advances_increment_once() {
    let (service, id) = ledger_with(active_days(0, 0, 10, dec!(3)));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            let id = id.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service.advance(&id)
            })
        })
        .collect();

    let mut advanced = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(outcome) if outcome.is_advanced() => advanced += 1,
            Ok(_) => {}
            Err(Error::Store(StoreError::Conflict { .. })) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(advanced, 1);
    let stored = service.store().project(&id).unwrap().unwrap();
    assert_eq!(stored.active_cycle(), CycleIndex::new(1));
}
