//! Pure state transitions.

use jiff::Timestamp;

use super::SessionState;
use crate::{
    catalog::Catalog,
    error::Result,
    models::{ModalContent, PlaybackSpeed, SkipPreference},
    store::StoredProgress,
};

/// A request to change the session, dispatched by a surface, the autoplay
/// timer or the host router.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Enter the sequence at step 1 with the welcome screen up
    Start,
    /// Dismiss the sequence from the welcome screen without completing it
    Skip,
    Advance,
    Retreat,
    /// Jump to a step; out-of-range requests are clamped
    GoToStep(i64),
    MarkHotspotVisited(String),
    OpenModal(ModalContent),
    CloseModal,
    TogglePlay,
    SetPlaying(bool),
    /// Speed multiplier, validated against the supported set
    SetSpeed(f64),
    CloseWelcome,
    CompleteSequence(Timestamp),
    Restart,
    Exit,
    SetSkipPreference(SkipPreference),
    /// Re-enter the sequence from a stored snapshot, skipping the welcome
    Resume(StoredProgress),
}

/// Applies `intent` to `state` and returns the successor state.
///
/// The input is never modified. Only [`Intent::SetSpeed`] can fail; every
/// index operation clamps and every illegal-in-context request is a no-op.
pub fn transition(state: &SessionState, catalog: &Catalog, intent: Intent) -> Result<SessionState> {
    let mut next = state.clone();

    // The welcome screen hides the tour; it has to be closed or skipped
    // before the step can move.
    if next.show_welcome
        && matches!(
            intent,
            Intent::Advance | Intent::Retreat | Intent::GoToStep(_)
        )
    {
        return Ok(next);
    }

    match intent {
        Intent::Start => {
            enter(&mut next);
            next.show_welcome = true;
        }
        Intent::Skip => {
            leave(&mut next);
        }
        Intent::Advance => {
            if next.show_completion {
                return Ok(next);
            }
            if next.current_step >= catalog.total_steps() {
                next.active_modal = None;
                next.show_completion = true;
                next.is_playing = false;
            } else {
                let target = next.current_step + 1;
                move_to(&mut next, target);
            }
        }
        Intent::Retreat => {
            if next.current_step > 1 {
                next.show_completion = false;
                let target = next.current_step - 1;
                move_to(&mut next, target);
            }
        }
        Intent::GoToStep(requested) => {
            next.show_completion = false;
            move_to(&mut next, catalog.clamp(requested));
        }
        Intent::MarkHotspotVisited(id) => {
            if next.is_active {
                next.visited_hotspots.insert(id);
            }
        }
        Intent::OpenModal(content) => {
            next.is_playing = false;
            if !next.show_welcome && !next.show_completion {
                next.active_modal = Some(content);
            }
        }
        Intent::CloseModal => {
            next.active_modal = None;
        }
        Intent::TogglePlay => {
            let playing = !next.is_playing;
            set_playing(&mut next, playing);
        }
        Intent::SetPlaying(playing) => {
            set_playing(&mut next, playing);
        }
        Intent::SetSpeed(multiplier) => {
            next.playback_speed = PlaybackSpeed::try_from(multiplier)?;
        }
        Intent::CloseWelcome => {
            next.show_welcome = false;
        }
        Intent::CompleteSequence(at) => {
            leave(&mut next);
            next.has_completed_before = true;
            next.completed_at = Some(at);
        }
        Intent::Restart => {
            enter(&mut next);
            next.show_welcome = true;
        }
        Intent::Exit => {
            leave(&mut next);
        }
        Intent::SetSkipPreference(preference) => {
            next.skip_preference = preference;
        }
        Intent::Resume(progress) => {
            enter(&mut next);
            next.current_step = catalog.clamp(i64::from(progress.step));
            next.visited_steps.clear();
            for step in progress.visited_steps {
                if (1..=catalog.total_steps()).contains(&step) {
                    visit(&mut next, step);
                }
            }
            let resumed = next.current_step;
            visit(&mut next, resumed);
            next.visited_hotspots = progress.visited_hotspots.into_iter().collect();
        }
    }

    Ok(next)
}

/// Fresh session at step 1; speed and persisted fields carry over.
fn enter(state: &mut SessionState) {
    state.is_active = true;
    state.current_step = 1;
    state.is_playing = false;
    state.visited_steps = vec![1];
    state.visited_hotspots.clear();
    state.active_modal = None;
    state.show_welcome = false;
    state.show_completion = false;
    state.epoch += 1;
}

fn leave(state: &mut SessionState) {
    state.is_active = false;
    state.is_playing = false;
    state.active_modal = None;
    state.show_welcome = false;
    state.show_completion = false;
}

fn move_to(state: &mut SessionState, step: u32) {
    state.active_modal = None;
    if step != state.current_step {
        state.current_step = step;
        state.epoch += 1;
    }
    visit(state, step);
}

fn visit(state: &mut SessionState, step: u32) {
    if !state.visited_steps.contains(&step) {
        state.visited_steps.push(step);
    }
}

// Pausing is always allowed; playing needs the tour itself on screen.
fn set_playing(state: &mut SessionState, playing: bool) {
    if !playing {
        state.is_playing = false;
    } else if state.is_overlay_visible() && state.active_modal.is_none() {
        state.is_playing = true;
    }
}
