//! Property tests for the mapping demo

use proptest::prelude::*;
use zbot_core::config::SequencerTiming;
use zbot_core::sequencer::{DemoSequencer, Grid};
use zbot_core::state::{Event, Phase};
use zbot_core::timer::Millis;
use zbot_core::traits::{drain, Animated};

/// Grid dimensions plus an arbitrary wall subset
fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1u8..=12, 1u8..=12)
        .prop_flat_map(|(cols, rows)| {
            let units = cols as u16 * rows as u16;
            (
                Just(cols),
                Just(rows),
                proptest::collection::vec(0..units, 0..units as usize),
            )
        })
        .prop_map(|(cols, rows, walls)| {
            Grid::with_walls(cols, rows, walls).expect("walls are in range")
        })
}

fn timing_strategy() -> impl Strategy<Value = SequencerTiming> {
    (1u32..=40, 1u32..=3000, 1u32..=80).prop_map(|(progress, scan, unit)| SequencerTiming {
        progress_tick_ms: progress,
        scan_duration_ms: scan,
        unit_interval_ms: unit,
    })
}

/// Run to completion, sleeping until each deadline
fn run_to_idle(seq: &mut DemoSequencer, mut on_event: impl FnMut(Millis, Event)) -> Millis {
    let mut now = 0;
    while let Some(due) = seq.next_deadline() {
        now = due;
        drain(seq, due, |e| on_event(due, e));
    }
    now
}

proptest! {
    #[test]
    fn full_run_cleans_every_non_wall_unit(grid in grid_strategy(), timing in timing_strategy()) {
        let mut seq = DemoSequencer::new(grid, timing);
        prop_assert_eq!(seq.start(0), Some(Event::Start));

        run_to_idle(&mut seq, |_, _| {});

        let expected: Vec<u16> = grid.cleanable().collect();
        prop_assert_eq!(seq.completed_units(), expected.as_slice());
        prop_assert_eq!(seq.phase(), Phase::Idle);
        prop_assert_eq!(seq.progress(), 0);
        prop_assert!(!seq.is_animating());
    }

    #[test]
    fn completed_units_stay_sorted_and_unique(grid in grid_strategy(), stop in 0u64..6000) {
        let mut seq = DemoSequencer::new(grid, SequencerTiming::default());
        seq.start(0);
        drain(&mut seq, stop, |_| {});

        let units = seq.completed_units();
        prop_assert!(units.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(units.iter().all(|&u| !grid.is_wall(u)));
    }

    #[test]
    fn progress_is_monotonic_and_bounded(timing in timing_strategy()) {
        let mut seq = DemoSequencer::new(Grid::default(), timing);
        seq.start(0);

        let mut last = 0u8;
        while let Some(due) = seq.next_deadline() {
            drain(&mut seq, due, |_| {});
            if seq.phase() == Phase::Idle {
                break;
            }
            let progress = seq.progress();
            prop_assert!(progress <= 100);
            prop_assert!(progress >= last);
            last = progress;
        }
    }

    #[test]
    fn second_start_while_running_changes_nothing(grid in grid_strategy(), at in 0u64..5000) {
        let mut seq = DemoSequencer::new(grid, SequencerTiming::default());
        seq.start(0);
        drain(&mut seq, at, |_| {});
        prop_assume!(seq.phase().is_running());

        let before = seq.state();
        let deadline = seq.next_deadline();
        prop_assert_eq!(seq.start(at), None);
        prop_assert_eq!(seq.state(), before);
        prop_assert_eq!(seq.next_deadline(), deadline);
    }

    #[test]
    fn late_polling_matches_on_time_polling(grid in grid_strategy(), step in 1u64..700) {
        let mut on_time = DemoSequencer::new(grid, SequencerTiming::default());
        let mut late = on_time.clone();
        on_time.start(0);
        late.start(0);

        let mut expected = Vec::new();
        run_to_idle(&mut on_time, |_, e| expected.push(e));

        let mut seen = Vec::new();
        let mut now = 0;
        while late.is_animating() {
            now += step;
            drain(&mut late, now, |e| seen.push(e));
        }

        prop_assert_eq!(seen, expected);
        prop_assert_eq!(late.completed_units(), on_time.completed_units());
    }

    #[test]
    fn events_follow_phase_order(grid in grid_strategy()) {
        let mut seq = DemoSequencer::new(grid, SequencerTiming::default());
        seq.start(0);

        let mut events = Vec::new();
        run_to_idle(&mut seq, |_, e| events.push(e));

        prop_assert_eq!(events.first(), Some(&Event::ScanElapsed));
        prop_assert_eq!(events.last(), Some(&Event::CleaningFinished));
        let visits = events
            .iter()
            .filter(|e| matches!(e, Event::UnitCleaned(_) | Event::UnitSkipped(_)))
            .count();
        prop_assert_eq!(visits, grid.len() as usize);
    }
}
