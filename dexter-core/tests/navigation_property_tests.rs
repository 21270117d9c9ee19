use dexter_core::{
    Locale, NavError, NavSettings, NavigationController, RandomSource, RecordCache, SeededRandom,
};
use dexter_test_utils::fixtures::id;
use dexter_test_utils::generators::arb_record_id;
use dexter_test_utils::{shared_catalog, ScriptedCatalog, SequenceRandom};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn controller<R: RandomSource>(
    settings: NavSettings,
    rng: R,
) -> (Arc<ScriptedCatalog>, NavigationController<R>) {
    let (catalog, client) = shared_catalog(ScriptedCatalog::new());
    let cache = RecordCache::new(client);
    (catalog, NavigationController::new(settings, rng, cache))
}

#[tokio::test(start_paused = true)]
async fn next_locks_and_prefetches_ahead() {
    let (catalog, mut nav) = controller(NavSettings::new(), SequenceRandom::new([500, 42]));
    settle().await;
    // Construction warms current + 1 and the first candidate.
    assert_eq!(catalog.request_count(2), 1);
    assert_eq!(catalog.request_count(500), 1);

    assert_eq!(nav.next().unwrap(), id(2));
    assert!(nav.is_locked());
    assert_eq!(nav.epoch(), 1);
    settle().await;
    assert_eq!(catalog.request_count(3), 1);

    tokio::time::advance(Duration::from_millis(2499)).await;
    assert!(nav.is_locked());
    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(!nav.is_locked());
}

#[tokio::test(start_paused = true)]
async fn actions_during_cooldown_are_rejected() {
    let (_catalog, mut nav) = controller(NavSettings::new(), SequenceRandom::new([10, 20]));
    nav.next().unwrap();

    tokio::time::advance(Duration::from_millis(1000)).await;
    let err = nav.next().unwrap_err();
    let NavError::Locked { remaining } = err;
    assert_eq!(remaining, Duration::from_millis(1500));
    assert!(nav.random().is_err());
    assert!(nav.prev().is_err());

    assert_eq!(nav.current(), id(2));
    assert_eq!(nav.random_candidate(), id(10));
    assert_eq!(nav.epoch(), 1);
}

#[tokio::test]
async fn prev_at_first_stays_at_first() {
    let settings = NavSettings::new().with_cooldown(Duration::ZERO);
    let (_catalog, mut nav) = controller(settings, SequenceRandom::default());
    assert_eq!(nav.prev().unwrap(), id(1));
    assert_eq!(nav.prev().unwrap(), id(1));
    // Still counts as a navigation.
    assert_eq!(nav.epoch(), 2);
}

#[tokio::test]
async fn next_has_no_ceiling() {
    let settings = NavSettings::new()
        .with_cooldown(Duration::ZERO)
        .with_start(id(1025));
    let (_catalog, mut nav) = controller(settings, SequenceRandom::default());
    assert_eq!(nav.next().unwrap(), id(1026));
    assert_eq!(nav.next().unwrap(), id(1027));
}

#[tokio::test(start_paused = true)]
async fn random_jumps_to_stored_candidate_and_draws_a_new_one() {
    let (catalog, mut nav) = controller(NavSettings::new(), SequenceRandom::new([123, 456, 789]));
    assert_eq!(nav.random_candidate(), id(123));

    assert_eq!(nav.random().unwrap(), id(123));
    assert_eq!(nav.random_candidate(), id(456));
    settle().await;
    assert_eq!(catalog.request_count(124), 1);
    assert_eq!(catalog.request_count(456), 1);

    tokio::time::advance(Duration::from_millis(2500)).await;
    assert_eq!(nav.random().unwrap(), id(456));
    assert_eq!(nav.random_candidate(), id(789));
}

#[tokio::test]
async fn seeded_controllers_replay_the_same_jumps() {
    let settings = NavSettings::new().with_cooldown(Duration::ZERO);
    let (_a, mut left) = controller(settings.clone(), SeededRandom::from_seed(2024));
    let (_b, mut right) = controller(settings, SeededRandom::from_seed(2024));
    for _ in 0..20 {
        let a = left.random().unwrap();
        let b = right.random().unwrap();
        assert_eq!(a, b);
        assert!((1..1000).contains(&a.get()));
    }
}

#[tokio::test(start_paused = true)]
async fn locale_toggle_leaves_navigation_alone() {
    let (_catalog, mut nav) = controller(NavSettings::new(), SequenceRandom::default());
    nav.next().unwrap();
    let before = nav.snapshot();
    assert_eq!(before.locale, Locale::Czech);

    assert_eq!(nav.toggle_locale(), Locale::English);
    assert_eq!(nav.toggle_locale(), Locale::Czech);

    let after = nav.snapshot();
    assert_eq!(after, before);
    assert!(after.locked);
}

#[tokio::test]
async fn custom_random_range_is_respected() {
    let settings = NavSettings::new()
        .with_cooldown(Duration::ZERO)
        .with_random_range(0, 3);
    assert_eq!(settings.random_range(), (1, 3));
    let (_catalog, mut nav) = controller(settings, SeededRandom::from_seed(9));
    for _ in 0..50 {
        let target = nav.random().unwrap().get();
        assert!((1..3).contains(&target));
    }
}

#[tokio::test]
async fn empty_random_range_is_widened_to_one_target() {
    let settings = NavSettings::new()
        .with_cooldown(Duration::ZERO)
        .with_random_range(5, 5);
    assert_eq!(settings.random_range(), (5, 6));
    let (_catalog, mut nav) = controller(settings, SeededRandom::from_seed(3));
    assert_eq!(nav.random_candidate(), id(5));
    for _ in 0..5 {
        assert_eq!(nav.random().unwrap(), id(5));
    }

    let inverted = NavSettings::new().with_random_range(900, 10);
    assert_eq!(inverted.random_range(), (900, 901));
}

proptest! {
    #[test]
    fn random_range_is_never_empty(low in any::<u32>(), high in any::<u32>()) {
        let (low, high) = NavSettings::new().with_random_range(low, high).random_range();
        prop_assert!(low >= 1);
        prop_assert!(high > low);
    }

    #[test]
    fn prev_never_drops_below_one(start in arb_record_id(), steps in 1usize..20) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let settings = NavSettings::new()
                .with_cooldown(Duration::ZERO)
                .with_start(start);
            let (_catalog, mut nav) = controller(settings, SequenceRandom::default());
            for step in 1..=steps {
                let expected = start.get().saturating_sub(step as u32).max(1);
                assert_eq!(nav.prev().unwrap().get(), expected);
            }
        });
    }
}
