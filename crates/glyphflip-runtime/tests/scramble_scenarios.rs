//! End-to-end scramble scenarios on simulated time.

use std::time::Duration;

use glyphflip_core::clock::ManualClock;
use glyphflip_core::event::CellId;
use glyphflip_runtime::{
    Element, ElementRegistry, ScrambleConfig, ScrambleState, Simulator, TickOutcome, attach,
};
use glyphflip_text::Alphabet;
use rand::SeedableRng;
use rand::rngs::StdRng;

const SEED: u64 = 0x5EED;

fn sim(text: &str) -> Simulator {
    Simulator::new(text, ScrambleConfig::default(), SEED)
}

#[test]
fn name_segments_into_four_cells() {
    let sim = sim("AB C");
    let originals: Vec<char> = sim
        .surface()
        .controllers()
        .map(|c| c.cell().original())
        .collect();
    assert_eq!(originals, vec!['A', 'B', ' ', 'C']);
}

#[test]
fn letter_scrambles_then_restores() {
    let mut sim = sim("AB C");
    sim.enter(0);

    sim.advance_to_ms(14);
    let early = sim.displayed(0).unwrap();
    assert!(Alphabet::STANDARD.contains(early));
    assert_eq!(sim.state(0), Some(ScrambleState::Scrambling));

    sim.advance_to_ms(200);
    assert!(Alphabet::STANDARD.contains(sim.displayed(0).unwrap()));

    sim.advance_to_ms(448);
    assert_eq!(sim.displayed(0), Some('A'));
    assert_eq!(sim.state(0), Some(ScrambleState::Idle));
    assert_eq!(sim.displayed_text(), "AB C");
}

#[test]
fn scrambled_glyphs_actually_change() {
    let mut sim = sim("A");
    sim.enter(0);
    sim.advance_to_ms(400);
    let scrambled = sim
        .ticks_for(0)
        .filter(|t| matches!(t.outcome, TickOutcome::Scrambled(c) if c != 'A'))
        .count();
    assert!(scrambled > 0, "14 draws from 36 symbols should not all be 'A'");
}

#[test]
fn space_never_changes() {
    let mut sim = sim("AB C");
    sim.enter(2);
    for t in (0..=600).step_by(7) {
        sim.advance_to_ms(t);
        assert_eq!(sim.displayed(2), Some(' '), "space changed at t={t}");
    }
    assert!(sim.ticks_for(2).all(|t| matches!(
        t.outcome,
        TickOutcome::Held | TickOutcome::Restored
    )));
    assert_eq!(sim.state(2), Some(ScrambleState::Idle));
}

#[test]
fn retrigger_extends_the_window() {
    let mut sim = sim("AB C");
    sim.enter(0);
    sim.advance_to_ms(100);
    sim.enter(0);

    sim.advance_to_ms(448);
    assert_eq!(
        sim.state(0),
        Some(ScrambleState::Scrambling),
        "first trigger's window must not end the second session"
    );

    sim.advance_to_ms(520 + 28);
    assert_eq!(sim.state(0), Some(ScrambleState::Idle));
    assert_eq!(sim.displayed(0), Some('A'));

    let restored_at = sim
        .ticks_for(0)
        .find(|t| t.outcome == TickOutcome::Restored)
        .map(|t| t.at)
        .unwrap();
    assert!(restored_at >= Duration::from_millis(520));
    assert!(restored_at < Duration::from_millis(548));
    assert_eq!(sim.runtime().live_timers(), 0);
}

#[test]
fn pointer_leave_lets_scramble_finish() {
    let mut sim = sim("AB C");
    sim.enter(1);
    sim.advance_to_ms(56);
    sim.leave(1);
    assert_eq!(sim.state(1), Some(ScrambleState::Scrambling));
    sim.advance_to_ms(448);
    assert_eq!(sim.displayed(1), Some('B'));
}

#[test]
fn restore_on_leave_cancels_immediately() {
    let config = ScrambleConfig::default().with_restore_on_leave(true);
    let mut sim = Simulator::new("AB C", config, SEED);
    sim.enter(1);
    sim.advance_to_ms(56);
    sim.leave(1);
    assert_eq!(sim.state(1), Some(ScrambleState::Idle));
    assert_eq!(sim.displayed(1), Some('B'));

    sim.clear_ticks();
    sim.advance_to_ms(600);
    assert!(sim.ticks().is_empty());
}

#[test]
fn cells_scramble_independently() {
    let mut sim = sim("AB C");
    sim.enter(0);
    sim.advance_to_ms(200);
    sim.enter(3);

    sim.advance_to_ms(448);
    assert_eq!(sim.state(0), Some(ScrambleState::Idle));
    assert_eq!(sim.state(3), Some(ScrambleState::Scrambling));
    assert_eq!(sim.state(1), Some(ScrambleState::Idle));

    sim.advance_to_ms(700);
    assert_eq!(sim.displayed_text(), "AB C");
    assert!(sim.surface().is_settled());
}

#[test]
fn cancelling_an_idle_cell_changes_nothing() {
    let mut sim = sim("AB C");
    assert!(!sim.cancel(0));
    assert!(!sim.cancel(99));
    assert_eq!(sim.displayed_text(), "AB C");
    assert!(sim.surface().is_settled());
}

#[test]
fn whitespace_only_text_never_changes() {
    let mut sim = sim(" \t ");
    for idx in 0..3 {
        sim.enter(idx);
    }
    for t in (0..=500).step_by(28) {
        sim.advance_to_ms(t);
        assert_eq!(sim.displayed_text(), " \t ");
    }
}

#[test]
fn page_boot_timings_restore_within_one_tick_of_window() {
    let config = ScrambleConfig::default().with_tick_ms(26);
    let mut sim = Simulator::new("GLYPH", config, SEED);
    sim.enter(4);
    sim.advance_to_ms(420 + 26);
    assert_eq!(sim.state(4), Some(ScrambleState::Idle));
    assert_eq!(sim.displayed(4), Some('H'));
}

#[test]
fn attached_runtime_scrambles_host_text() {
    let mut host = ElementRegistry::new();
    host.insert("scrambleName", Element::with_text("Grace"));
    let clock = ManualClock::new();
    let mut rt = attach(
        &mut host,
        "scrambleName",
        ScrambleConfig::default(),
        clock.clone(),
        StdRng::seed_from_u64(SEED),
    )
    .unwrap();

    rt.trigger(CellId(0));
    clock.advance(Duration::from_millis(28));
    let records = rt.run_due();
    assert_eq!(records.len(), 1);
    assert!(matches!(records[0].outcome, TickOutcome::Scrambled(_)));

    clock.advance(Duration::from_millis(500));
    rt.run_due();
    assert_eq!(rt.surface().displayed_text(), "Grace");
}
