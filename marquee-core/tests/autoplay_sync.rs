mod support;

use std::time::Duration;

use marquee_contracts::PositionController;
use marquee_core::autoplay::AutoplayPhase;
use marquee_core::engine::EngineConfig;
use marquee_model::Category;
use support::{Harness, StubDetail, StubListing, spec};

const TICK: Duration = Duration::from_secs(5);
const SLACK: Duration = Duration::from_millis(100);

fn three_slides() -> Harness {
    Harness::new(
        StubListing::new()
            .with_items(Category::Movie, 2)
            .with_items(Category::Tv, 1),
        StubDetail::new(),
    )
}

#[tokio::test(start_paused = true)]
async fn ticks_advance_active_index_modulo_length() {
    let harness = three_slides();
    harness
        .engine
        .reconfigure(vec![spec(Category::Movie, 2), spec(Category::Tv, 1)])
        .await;
    assert_eq!(harness.engine.autoplay_phase(), AutoplayPhase::Running);

    let mut elapsed = 0;
    for ticks in [1_u32, 2, 3, 7] {
        tokio::time::sleep(TICK * (ticks - elapsed)).await;
        elapsed = ticks;
        tokio::time::sleep(SLACK).await;

        let snapshot = harness.engine.snapshot();
        let expected = ticks as usize % 3;
        assert_eq!(snapshot.active_index, Some(expected), "after {ticks}");
        assert_eq!(harness.position.current_index(), expected);
        let category = if expected < 2 {
            Category::Movie
        } else {
            Category::Tv
        };
        assert_eq!(snapshot.active_category, Some(category));
    }
    harness.engine.teardown();
}

#[tokio::test(start_paused = true)]
async fn no_ticks_observable_after_teardown() {
    let harness = three_slides();
    harness
        .engine
        .reconfigure(vec![spec(Category::Movie, 2), spec(Category::Tv, 1)])
        .await;

    tokio::time::sleep(TICK + SLACK).await;
    assert_eq!(harness.engine.snapshot().active_index, Some(1));

    harness.engine.teardown();
    assert_eq!(harness.engine.autoplay_phase(), AutoplayPhase::Idle);
    assert_eq!(harness.position.subscriber_count(), 0);

    tokio::time::sleep(TICK * 10).await;
    assert_eq!(harness.position.current_index(), 1);
    assert_eq!(harness.engine.snapshot().active_index, Some(1));
}

#[tokio::test(start_paused = true)]
async fn loading_pauses_autoplay_until_commit() {
    let listing = StubListing::new().with_items(Category::Anime, 4);
    let harness = Harness::new(listing, StubDetail::new());
    let engine = &harness.engine;
    engine.reconfigure(vec![spec(Category::Anime, 4)]).await;
    assert_eq!(engine.autoplay_phase(), AutoplayPhase::Running);

    let gate = harness.listing.gate(Category::Anime);
    let cycle = engine.retry();
    let observe = async {
        tokio::task::yield_now().await;
        assert!(engine.snapshot().loading);
        assert_eq!(engine.autoplay_phase(), AutoplayPhase::Idle);

        // Time passes while loading; the index must not move.
        tokio::time::sleep(TICK * 3).await;
        assert_eq!(harness.position.current_index(), 0);
        gate.notify_one();
    };
    tokio::join!(cycle, observe);

    assert!(!engine.snapshot().loading);
    assert_eq!(engine.autoplay_phase(), AutoplayPhase::Running);
    tokio::time::sleep(TICK + SLACK).await;
    assert_eq!(engine.snapshot().active_index, Some(1));
    engine.teardown();
}

#[tokio::test(start_paused = true)]
async fn empty_sequence_never_starts_autoplay() {
    let harness = Harness::new(
        StubListing::new().with_items(Category::Show, 0),
        StubDetail::new(),
    );
    harness.engine.reconfigure(vec![spec(Category::Show, 3)]).await;

    let snapshot = harness.engine.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.active_index, None);
    assert_eq!(harness.engine.autoplay_phase(), AutoplayPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn user_jump_is_reflected_and_autoplay_continues_from_there() {
    let harness = Harness::with_config(
        StubListing::new().with_items(Category::Movie, 5),
        StubDetail::new(),
        EngineConfig {
            autoplay_interval: Duration::from_secs(2),
            ..EngineConfig::default()
        },
    );
    harness.engine.reconfigure(vec![spec(Category::Movie, 5)]).await;

    harness.engine.jump_to(3);
    assert_eq!(harness.engine.snapshot().active_index, Some(3));

    tokio::time::sleep(Duration::from_secs(4) + SLACK).await;
    assert_eq!(harness.engine.snapshot().active_index, Some(0));
    harness.engine.teardown();
}

#[tokio::test(start_paused = true)]
async fn repeated_reconfiguration_keeps_a_single_timer() {
    let harness = three_slides();
    let specs = vec![spec(Category::Movie, 2), spec(Category::Tv, 1)];
    for _ in 0..3 {
        harness.engine.reconfigure(specs.clone()).await;
    }
    assert_eq!(harness.position.subscriber_count(), 1);

    tokio::time::sleep(TICK * 2 + SLACK).await;
    assert_eq!(harness.engine.snapshot().active_index, Some(2));
    harness.engine.teardown();
}
