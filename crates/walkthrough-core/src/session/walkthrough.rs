//! The session container: single owner of the session state.

use jiff::Timestamp;
use log::{debug, info, warn};
use tokio::sync::broadcast;

use super::{signal, transition, Intent, Key, SessionState, Signal};
use crate::{
    catalog::Catalog,
    error::Result,
    models::{Hotspot, ModalContent, PlaybackSpeed, SkipPreference, Step, StepKind},
    store::{FlagStore, PersistedFlags},
};

const SIGNAL_CAPACITY: usize = 64;

/// Owns the session state, the catalog it walks and the durable flag store.
///
/// Every mutation funnels through [`Walkthrough::dispatch`], which computes
/// the successor with [`transition`], commits it in one assignment, persists
/// whatever durable fields changed and then publishes [`Signal`]s.
pub struct Walkthrough {
    catalog: Catalog,
    state: SessionState,
    store: Box<dyn FlagStore + Send>,
    signals: broadcast::Sender<Signal>,
    route: Option<String>,
}

impl Walkthrough {
    /// Creates an inactive session, seeding persisted fields from `store`.
    ///
    /// An unreadable store is treated as "no prior session".
    pub fn new(catalog: Catalog, store: Box<dyn FlagStore + Send>) -> Self {
        let flags = store.load().unwrap_or_else(|e| {
            warn!("Flag storage unavailable, starting without prior session: {e}");
            PersistedFlags::default()
        });
        let (signals, _) = broadcast::channel(SIGNAL_CAPACITY);

        Self {
            catalog,
            state: SessionState::new(&flags),
            store,
            signals,
            route: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The step currently on screen.
    pub fn current_step(&self) -> &Step {
        self.state.current_step_config(&self.catalog)
    }

    /// Hotspots the resolver should place right now.
    pub fn active_hotspots(&self) -> &[Hotspot] {
        self.state.active_hotspots(&self.catalog)
    }

    /// Last route reported by the host.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// Receives every signal published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.signals.subscribe()
    }

    /// Applies an intent atomically.
    ///
    /// Fails only for an unsupported speed, in which case nothing changes.
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        let next = transition(&self.state, &self.catalog, intent.clone())?;
        if next == self.state {
            return Ok(());
        }

        let prev = std::mem::replace(&mut self.state, next);
        debug!(
            "{intent:?}: step {} -> {}, epoch {}",
            prev.current_step, self.state.current_step, self.state.epoch
        );
        self.persist(&prev, &intent);

        for signal in signal::diff(&prev, &self.state, &intent) {
            // No subscribers is fine.
            let _ = self.signals.send(signal);
        }
        Ok(())
    }

    // Intents other than SetSpeed never fail.
    fn apply(&mut self, intent: Intent) {
        if let Err(e) = self.dispatch(intent) {
            warn!("Transition rejected: {e}");
        }
    }

    fn persist(&self, prev: &SessionState, intent: &Intent) {
        let outcome = match intent {
            Intent::CompleteSequence(at) => {
                info!("Walkthrough completed");
                self.store
                    .mark_completed(*at)
                    .and_then(|_| self.store.clear_progress())
            }
            Intent::Restart => self.store.clear_progress(),
            Intent::SetSkipPreference(preference) => {
                self.store.save_skip_preference(*preference)
            }
            _ => {
                let progress = self.state.progress();
                if self.state.is_active && progress != prev.progress() {
                    self.store.save_progress(&progress)
                } else {
                    Ok(())
                }
            }
        };

        if let Err(e) = outcome {
            warn!("Could not persist walkthrough flags: {e}");
        }
    }

    /// Enters the sequence with the welcome screen up.
    pub fn start(&mut self) {
        info!("Walkthrough started");
        self.apply(Intent::Start);
    }

    /// Leaves from the welcome screen without marking completion.
    pub fn skip(&mut self) {
        self.apply(Intent::Skip);
    }

    pub fn advance(&mut self) {
        self.apply(Intent::Advance);
    }

    pub fn retreat(&mut self) {
        self.apply(Intent::Retreat);
    }

    pub fn go_to_step(&mut self, step: i64) {
        self.apply(Intent::GoToStep(step));
    }

    pub fn mark_hotspot_visited(&mut self, id: &str) {
        self.apply(Intent::MarkHotspotVisited(id.to_string()));
    }

    /// Activates a hotspot of the current step: marks it visited and opens
    /// its modal, if it carries one.
    pub fn open_hotspot(&mut self, id: &str) -> Result<()> {
        let step = self.state.current_step;
        let modal = self.catalog.hotspot(step, id)?.modal.clone();

        self.mark_hotspot_visited(id);
        if let Some(content) = modal {
            self.open_modal(content);
        }
        Ok(())
    }

    pub fn open_modal(&mut self, content: ModalContent) {
        self.apply(Intent::OpenModal(content));
    }

    pub fn close_modal(&mut self) {
        self.apply(Intent::CloseModal);
    }

    pub fn toggle_play(&mut self) {
        self.apply(Intent::TogglePlay);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.apply(Intent::SetPlaying(playing));
    }

    /// Sets the speed multiplier; anything outside the supported set is
    /// rejected with [`crate::WalkthroughError::InvalidSpeed`].
    pub fn set_speed(&mut self, multiplier: f64) -> Result<()> {
        self.dispatch(Intent::SetSpeed(multiplier))
    }

    pub fn set_playback_speed(&mut self, speed: PlaybackSpeed) {
        self.apply(Intent::SetSpeed(speed.multiplier()));
    }

    pub fn close_welcome(&mut self) {
        self.apply(Intent::CloseWelcome);
    }

    /// Finishes the sequence and records the completion flag.
    pub fn complete_sequence(&mut self) {
        self.apply(Intent::CompleteSequence(Timestamp::now()));
    }

    pub fn restart(&mut self) {
        self.apply(Intent::Restart);
    }

    /// Abandons the sequence without marking completion.
    pub fn exit(&mut self) {
        self.apply(Intent::Exit);
    }

    pub fn set_skip_preference(&mut self, preference: SkipPreference) {
        self.apply(Intent::SetSkipPreference(preference));
    }

    /// Re-enters the sequence from the stored progress snapshot.
    ///
    /// Returns `false` when there is nothing to resume or the store cannot
    /// be read.
    pub fn resume(&mut self) -> bool {
        match self.store.load() {
            Ok(PersistedFlags {
                progress: Some(progress),
                ..
            }) => {
                info!("Resuming walkthrough at step {}", progress.step);
                self.apply(Intent::Resume(progress));
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!("Flag storage unavailable, cannot resume: {e}");
                false
            }
        }
    }

    /// Reads the durable flags as currently stored.
    pub fn flags(&self) -> Result<PersistedFlags> {
        self.store.load()
    }

    /// Wipes durable flags and returns to a fresh, inactive session.
    pub fn forget(&mut self) -> Result<()> {
        self.store.reset()?;
        info!("Walkthrough flags reset");
        let mut fresh = SessionState::new(&PersistedFlags::default());
        fresh.playback_speed = self.state.playback_speed;
        let prev = std::mem::replace(&mut self.state, fresh);
        if prev.is_active {
            let _ = self.signals.send(Signal::Exited);
        }
        Ok(())
    }

    /// Whether the host should open the welcome screen on entry.
    pub fn should_auto_start(&self) -> bool {
        match self.state.skip_preference {
            SkipPreference::AlwaysShow => true,
            SkipPreference::NeverShow => false,
            SkipPreference::Ask => !self.state.has_completed_before,
        }
    }

    /// The route the host must navigate to, if it is not already there.
    ///
    /// Navigation steps never demand a route: they wait for the user to
    /// follow the real click path.
    pub fn required_route(&self) -> Option<&str> {
        if !self.state.is_active {
            return None;
        }
        let step = self.current_step();
        if step.kind == StepKind::Navigation {
            return None;
        }
        match self.route.as_deref() {
            Some(path) if step.accepts(path) => None,
            _ => Some(step.route.as_str()),
        }
    }

    /// Records a host navigation and follows it when the tour expects it.
    ///
    /// Returns whether the step changed.
    pub fn on_route_changed(&mut self, path: &str) -> bool {
        self.route = Some(path.to_string());
        if !self.state.is_overlay_visible() {
            return false;
        }

        let step = self.current_step();
        let follow = (step.kind == StepKind::Navigation && step.accepts(path))
            || step
                .advance_on_route
                .as_deref()
                .is_some_and(|pattern| crate::models::route_matches(pattern, path));
        if !follow {
            return false;
        }

        let before = self.state.current_step;
        debug!("Route {path} reached, following from step {before}");
        self.advance();
        self.state.current_step != before
    }

    /// Maps a key press to an intent. Returns whether the key was used.
    ///
    /// While a modal is open only Escape is honoured; the welcome screen
    /// ignores navigation and playback keys.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.state.is_active {
            return false;
        }
        if self.state.active_modal.is_some() {
            if key == Key::Escape {
                self.close_modal();
                return true;
            }
            return false;
        }
        if self.state.show_welcome
            && matches!(key, Key::Left | Key::Right | Key::Space | Key::Digit(_))
        {
            return false;
        }

        match key {
            Key::Left => self.retreat(),
            Key::Right => self.advance(),
            Key::Space => self.toggle_play(),
            Key::Digit(n @ 1..=9) => self.go_to_step(i64::from(n)),
            Key::Char('r' | 'R') => self.restart(),
            _ => return false,
        }
        true
    }

    /// Host hook: the viewport was resized.
    pub fn notify_viewport_changed(&self) {
        let _ = self.signals.send(Signal::ViewportChanged);
    }

    /// Host hook: something in the page scrolled.
    pub fn notify_scrolled(&self) {
        let _ = self.signals.send(Signal::Scrolled);
    }
}

impl std::fmt::Debug for Walkthrough {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walkthrough")
            .field("state", &self.state)
            .field("total_steps", &self.catalog.total_steps())
            .field("route", &self.route)
            .finish()
    }
}
