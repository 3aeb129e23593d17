//! Named signals published after each committed transition.

use crate::models::PlaybackSpeed;

use super::{Intent, SessionState};

/// Change notification observers subscribe to.
///
/// Signals are published strictly after the state they describe has been
/// committed, so a subscriber reading the session sees the new values.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Sequence entered, either fresh or resumed from a snapshot
    Started,
    /// Sequence reset to step 1 with the welcome screen
    Restarted,
    StepChanged { from: u32, to: u32 },
    WelcomeClosed,
    ModalOpened,
    ModalClosed,
    PlaybackChanged { playing: bool },
    SpeedChanged(PlaybackSpeed),
    HotspotVisited(String),
    CompletionShown,
    /// Sequence finished and the completion flag recorded
    Completed,
    /// Sequence left without completing
    Exited,
    /// Host viewport resized
    ViewportChanged,
    /// Something scrolled in the host page
    Scrolled,
}

impl Signal {
    /// Whether the signal means hotspot anchors may have moved.
    pub fn affects_layout(&self) -> bool {
        matches!(
            self,
            Signal::Started
                | Signal::Restarted
                | Signal::StepChanged { .. }
                | Signal::WelcomeClosed
                | Signal::ViewportChanged
                | Signal::Scrolled
        )
    }
}

/// Signals describing the move from `prev` to `next` caused by `intent`.
pub(crate) fn diff(prev: &SessionState, next: &SessionState, intent: &Intent) -> Vec<Signal> {
    let mut signals = Vec::new();

    match intent {
        Intent::Start | Intent::Resume(_) => signals.push(Signal::Started),
        Intent::Restart => signals.push(Signal::Restarted),
        Intent::CompleteSequence(_) => signals.push(Signal::Completed),
        Intent::Exit | Intent::Skip if prev.is_active => signals.push(Signal::Exited),
        _ => {}
    }

    if prev.current_step != next.current_step && next.is_active {
        signals.push(Signal::StepChanged {
            from: prev.current_step,
            to: next.current_step,
        });
    }
    if prev.show_welcome && !next.show_welcome && next.is_active {
        signals.push(Signal::WelcomeClosed);
    }
    match (prev.active_modal.is_some(), next.active_modal.is_some()) {
        (false, true) => signals.push(Signal::ModalOpened),
        (true, false) => signals.push(Signal::ModalClosed),
        _ => {}
    }
    if prev.is_playing != next.is_playing {
        signals.push(Signal::PlaybackChanged {
            playing: next.is_playing,
        });
    }
    if prev.playback_speed != next.playback_speed {
        signals.push(Signal::SpeedChanged(next.playback_speed));
    }
    signals.extend(
        next.visited_hotspots
            .difference(&prev.visited_hotspots)
            .cloned()
            .map(Signal::HotspotVisited),
    );
    if !prev.show_completion && next.show_completion {
        signals.push(Signal::CompletionShown);
    }

    signals
}
