//! Autoplay timer.
//!
//! A cooperative, per-frame progress loop. The host calls
//! [`AutoplayTimer::tick`] on every display refresh with a monotonic
//! [`Instant`]; the timer never sleeps or spawns anything itself, so
//! dropping or cancelling it leaves nothing dangling.
//!
//! Each loop is bound to the session's `epoch`. When the step changes by
//! any other path the epoch moves on, the old loop is discarded and a new
//! one starts from zero, so a stale loop can never advance twice.

use std::time::{Duration, Instant};

use log::debug;

use crate::{
    models::{PlaybackSpeed, Step},
    session::{SessionState, Walkthrough},
};

/// Time a step stays on screen during autoplay, or `None` for manual steps.
///
/// The configured duration is raised to the speed's dwell floor and then
/// divided by the multiplier, so faster speeds always advance sooner.
///
/// ```rust
/// use std::time::Duration;
/// use walkthrough_core::{autoplay::effective_duration, models::PlaybackSpeed};
///
/// assert_eq!(effective_duration(10, PlaybackSpeed::Double), Some(Duration::from_secs(5)));
/// assert_eq!(effective_duration(0, PlaybackSpeed::Double), None);
/// ```
pub fn effective_duration(step_secs: u32, speed: PlaybackSpeed) -> Option<Duration> {
    if step_secs == 0 {
        return None;
    }
    let nominal = Duration::from_secs(u64::from(step_secs)).max(speed.minimum_dwell());
    Some(nominal.div_f64(speed.multiplier()))
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Nothing is scheduled
    Idle,
    /// Fraction of the current step's duration elapsed, in `[0, 1)`
    Progress(f64),
    /// The loop reached the end of the step and advanced the session
    Advanced,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    epoch: u64,
    started_at: Instant,
}

/// Drives automatic advancing while the session is playing.
#[derive(Debug, Default)]
pub struct AutoplayTimer {
    run: Option<Run>,
    progress: f64,
}

impl AutoplayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one frame.
    pub fn tick(&mut self, walkthrough: &mut Walkthrough, now: Instant) -> Tick {
        let state = walkthrough.state();
        let step = walkthrough.current_step();
        let Some(duration) = schedulable(state, step) else {
            self.cancel();
            return Tick::Idle;
        };

        let run = match self.run {
            Some(run) if run.epoch == state.epoch => run,
            _ => {
                let run = Run {
                    epoch: state.epoch,
                    started_at: now,
                };
                self.run = Some(run);
                run
            }
        };

        let elapsed = now.saturating_duration_since(run.started_at);
        let progress = (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0);
        if progress < 1.0 {
            self.progress = progress;
            return Tick::Progress(progress);
        }

        debug!(
            "Autoplay advancing from step {} after {:.2}s",
            state.current_step,
            elapsed.as_secs_f64()
        );
        self.cancel();
        walkthrough.advance();
        Tick::Advanced
    }

    /// Drops the current loop, if any.
    pub fn cancel(&mut self) {
        self.run = None;
        self.progress = 0.0;
    }

    /// Progress of the current loop for progress-bar rendering.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }
}

fn schedulable(state: &SessionState, step: &Step) -> Option<Duration> {
    let eligible = state.is_playing && state.is_overlay_visible() && state.active_modal.is_none();
    if !eligible {
        return None;
    }
    effective_duration(step.duration_secs, state.playback_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::Catalog,
        models::StepKind,
        store::MemoryFlagStore,
    };

    fn step(id: u32, duration_secs: u32) -> Step {
        Step {
            id,
            name: format!("Step {id}"),
            phase: "Test".to_string(),
            kind: StepKind::FullPage,
            route: "/app/dashboard".to_string(),
            duration_secs,
            instruction: None,
            focus_element: None,
            trigger_element: None,
            hotspots: Vec::new(),
            modal: None,
            accepts_route: None,
            advance_on_route: None,
        }
    }

    fn playing(durations: &[u32]) -> Walkthrough {
        let steps = durations
            .iter()
            .enumerate()
            .map(|(i, secs)| step(i as u32 + 1, *secs))
            .collect();
        let mut walkthrough = Walkthrough::new(
            Catalog::new(steps).unwrap(),
            Box::new(MemoryFlagStore::new()),
        );
        walkthrough.start();
        walkthrough.close_welcome();
        walkthrough.set_playing(true);
        walkthrough
    }

    #[test]
    fn test_effective_duration_respects_dwell_floor() {
        assert_eq!(
            effective_duration(2, PlaybackSpeed::Normal),
            Some(Duration::from_secs(12))
        );
        assert_eq!(
            effective_duration(10, PlaybackSpeed::Normal),
            Some(Duration::from_secs(12))
        );
        assert_eq!(
            effective_duration(10, PlaybackSpeed::Half),
            Some(Duration::from_secs(40))
        );
        assert_eq!(
            effective_duration(10, PlaybackSpeed::Double),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            effective_duration(30, PlaybackSpeed::Normal),
            Some(Duration::from_secs(30))
        );
        for speed in PlaybackSpeed::ALL {
            assert_eq!(effective_duration(0, speed), None);
        }
    }

    #[test]
    fn test_double_speed_advances_at_half_the_configured_time() {
        let mut walkthrough = playing(&[10, 10]);
        walkthrough.set_playback_speed(PlaybackSpeed::Double);
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();

        assert_eq!(timer.tick(&mut walkthrough, t0), Tick::Progress(0.0));
        let Tick::Progress(p) = timer.tick(&mut walkthrough, t0 + Duration::from_millis(4900))
        else {
            panic!("expected progress before 5s");
        };
        assert!(p > 0.95);
        assert_eq!(walkthrough.state().current_step, 1);

        assert_eq!(
            timer.tick(&mut walkthrough, t0 + Duration::from_millis(5016)),
            Tick::Advanced
        );
        assert_eq!(walkthrough.state().current_step, 2);
    }

    #[test]
    fn test_manual_step_never_advances() {
        let mut walkthrough = playing(&[0, 10]);
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();

        for secs in [0, 10, 60, 3600] {
            assert_eq!(
                timer.tick(&mut walkthrough, t0 + Duration::from_secs(secs)),
                Tick::Idle
            );
        }
        assert_eq!(walkthrough.state().current_step, 1);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_advances_exactly_once_per_step() {
        let mut walkthrough = playing(&[12, 12, 12]);
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();

        timer.tick(&mut walkthrough, t0);
        assert_eq!(
            timer.tick(&mut walkthrough, t0 + Duration::from_secs(12)),
            Tick::Advanced
        );
        // The next frame belongs to a fresh loop for step 2.
        assert_eq!(
            timer.tick(&mut walkthrough, t0 + Duration::from_secs(12)),
            Tick::Progress(0.0)
        );
        assert_eq!(walkthrough.state().current_step, 2);
    }

    #[test]
    fn test_external_step_change_restarts_loop() {
        let mut walkthrough = playing(&[12, 12, 12]);
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();

        timer.tick(&mut walkthrough, t0);
        timer.tick(&mut walkthrough, t0 + Duration::from_secs(11));
        walkthrough.go_to_step(2);

        // The stale loop would have fired at 12s; the new one starts there.
        assert_eq!(
            timer.tick(&mut walkthrough, t0 + Duration::from_secs(12)),
            Tick::Progress(0.0)
        );
        assert_eq!(walkthrough.state().current_step, 2);
        assert!(matches!(
            timer.tick(&mut walkthrough, t0 + Duration::from_secs(23)),
            Tick::Progress(_)
        ));
        assert_eq!(
            timer.tick(&mut walkthrough, t0 + Duration::from_secs(24)),
            Tick::Advanced
        );
        assert_eq!(walkthrough.state().current_step, 3);
    }

    #[test]
    fn test_pause_and_modal_cancel_loop() {
        let mut walkthrough = playing(&[12, 12]);
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();

        timer.tick(&mut walkthrough, t0);
        walkthrough.set_playing(false);
        assert_eq!(timer.tick(&mut walkthrough, t0 + Duration::from_secs(7)), Tick::Idle);
        assert_eq!(timer.progress(), 0.0);
        assert_eq!(walkthrough.state().current_step, 1);

        walkthrough.set_playing(true);
        timer.tick(&mut walkthrough, t0);
        walkthrough.open_modal(crate::models::ModalContent::new("Details", "Read me"));
        assert!(!walkthrough.state().is_playing);
        assert_eq!(timer.tick(&mut walkthrough, t0 + Duration::from_secs(60)), Tick::Idle);
    }

    #[test]
    fn test_last_step_shows_completion_and_stops() {
        let mut walkthrough = playing(&[12]);
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();

        timer.tick(&mut walkthrough, t0);
        assert_eq!(
            timer.tick(&mut walkthrough, t0 + Duration::from_secs(12)),
            Tick::Advanced
        );
        assert!(walkthrough.state().show_completion);
        assert!(!walkthrough.state().is_playing);
        assert_eq!(timer.tick(&mut walkthrough, t0 + Duration::from_secs(60)), Tick::Idle);
    }
}
