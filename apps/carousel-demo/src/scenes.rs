//! Scripted scenes. Each one plays the host: it feeds gestures, animates the
//! returned requests and prints the outcome.

use slidekit_animation::Transition;
use slidekit_core::{
    check_label_count, page_count_for, AutoScroller, ConfigError, CoverflowTransform, Deck,
    DeckMotion, DepthTransform, IndexBounds, LayoutMetrics, PagerConfig, PagerState,
    PairTransform, TransformKind,
};
use slidekit_foundation::{GestureEvent, PositionSample, ScrollPhase};
use slidekit_testing::GestureRobot;
use web_time::{Duration, Instant};

const CARD: f32 = 300.0;
const FRAME_NANOS: u64 = 16_000_000;
const MAX_FRAMES: u64 = 600;

pub fn coverflow_pager() -> Result<(), ConfigError> {
    println!("-- coverflow pager, 6 cards --");
    let metrics = LayoutMetrics::paged(CARD, 6)?;
    let kind = TransformKind::Coverflow(CoverflowTransform::default());
    let mut robot = GestureRobot::new(PagerConfig::new(CARD), metrics, kind)?;

    let swipes = [
        (-240.0, -600.0),
        (-80.0, -200.0),
        (-120.0, -900.0),
        (150.0, 400.0),
    ];
    for (translation, velocity) in swipes {
        if let Some(request) = robot.swipe(translation, 8, velocity) {
            let frames = robot.run_until_idle();
            println!(
                "swipe {translation:>6} @ {velocity:>6}/s -> card {} ({frames} frames)",
                request.target_index
            );
        }
    }
    let frame = robot.state().frame();
    println!("resting frame lists {} cards", frame.len());
    println!();
    Ok(())
}

pub fn looping_cards() -> Result<(), ConfigError> {
    println!("-- stacked cards, looping --");
    let config = PagerConfig::new(CARD).with_bounds(IndexBounds::Looping);
    let metrics = LayoutMetrics::paged(CARD, 4)?;
    let kind = TransformKind::Depth(DepthTransform::default());
    let mut robot = GestureRobot::new(config, metrics, kind)?;

    for lap in 0..6 {
        robot.swipe(-220.0, 6, -800.0);
        robot.run_until_idle();
        let index = robot.state().pair().active_index;
        println!(
            "swipe {} -> card {} (offset {:.0})",
            lap + 1,
            index.rem_euclid(4),
            robot.state().offset()
        );
    }
    println!();
    Ok(())
}

pub fn paging_indicator() -> Result<(), ConfigError> {
    println!("-- paging indicator --");
    let content = 1600.0;
    let viewport = 400.0;
    let labels = ["intro", "gallery", "details", "checkout"];
    let pages = check_label_count(labels.len(), content, viewport)?;
    debug_assert_eq!(pages, page_count_for(content, viewport));

    // The pager config decides whether idle dots fade.
    let config = PagerConfig::new(viewport).with_opacity_effect(true);
    let indicator = PairTransform::indicator(8.0, 10.0, config.opacity_effect)?;
    let metrics = config.metrics(pages, viewport)?;
    let mut state = PagerState::new(config, metrics, TransformKind::Pair(indicator))?;

    for offset in [0.0, 200.0, 400.0, 700.0, 1200.0] {
        let frame = state.on_sample(PositionSample::at(offset));
        let dots: Vec<String> = (0..pages as i64)
            .map(|page| {
                let dot = frame.state_of(page);
                format!("{:.0}@{:.1}", dot.extent.unwrap_or(0.0), dot.opacity)
            })
            .collect();
        println!("offset {offset:>6} -> dots (width@opacity) [{}]", dots.join(", "));
    }
    println!();
    Ok(())
}

pub fn marquee() -> Result<(), ConfigError> {
    println!("-- auto-scrolling marquee --");
    let metrics = LayoutMetrics::new(120.0, 12.0, 5, 400.0)?;
    let mut scroller = AutoScroller::new(metrics)?.with_step(40.0, Duration::from_millis(10));
    let start = Instant::now();
    scroller.tick(start);

    let mut rebases = 0;
    for step in 1..=40u32 {
        if step == 20 {
            scroller.on_phase_change(ScrollPhase::Interacting);
        }
        if step == 25 {
            scroller.on_phase_change(ScrollPhase::Idle);
        }
        if let Some(outcome) = scroller.tick(start + Duration::from_millis(10) * step) {
            if outcome.rebased() {
                rebases += 1;
            }
        }
    }
    println!(
        "offset {:.0}, showing item {}, {rebases} rebases",
        scroller.offset(),
        scroller.current_item()
    );
    println!();
    Ok(())
}

pub fn card_deck() -> Result<(), ConfigError> {
    println!("-- card deck --");
    let mut deck = Deck::new(4, 280.0, 2)?;

    for push in 0..3 {
        deck.on_gesture(GestureEvent::Began);
        deck.on_gesture(GestureEvent::Changed {
            translation: -200.0,
            timestamp: Duration::from_millis(16),
        });
        let mut next = deck.on_gesture(GestureEvent::Ended {
            translation: -200.0,
            velocity: -500.0,
        });
        while let Some(request) = next {
            let mut transition =
                Transition::new(deck.offset(), request.target_offset, request.animation);
            for frame in 1..=MAX_FRAMES {
                let sample = transition.sample(frame * FRAME_NANOS);
                deck.set_offset(sample.value);
                if sample.finished {
                    break;
                }
            }
            if request.motion == DeckMotion::Push {
                log::info!("card {} pushed to the back", request.card);
            }
            next = deck.settle_finished();
        }
        let order: Vec<String> = deck.order().map(|card| card.to_string()).collect();
        println!("push {} -> order [{}]", push + 1, order.join(", "));
    }
    println!();
    Ok(())
}
