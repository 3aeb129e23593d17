//! Session state record and derived views.

use std::collections::BTreeSet;

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    catalog::Catalog,
    models::{Hotspot, ModalContent, PlaybackSpeed, SkipPreference, Step},
    store::{PersistedFlags, StoredProgress},
};

/// Mutable record of guided-sequence progress for one user session.
///
/// Values of this type are only ever replaced wholesale by
/// [`super::transition`]; observers hold shared references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    /// Sequence currently engaged at all
    pub is_active: bool,

    /// 1-based step index, always within `[1, total_steps]`
    pub current_step: u32,

    /// Autoplay engaged
    pub is_playing: bool,

    pub playback_speed: PlaybackSpeed,

    /// Distinct step ids reached this session, in first-visit order
    pub visited_steps: Vec<u32>,

    /// Hotspot ids opened this session
    pub visited_hotspots: BTreeSet<String>,

    /// Modal currently displayed
    pub active_modal: Option<ModalContent>,

    pub show_welcome: bool,

    pub show_completion: bool,

    /// Persisted: the sequence was completed at least once
    pub has_completed_before: bool,

    /// Persisted: when the sequence was last completed
    pub completed_at: Option<Timestamp>,

    /// Persisted: whether to offer the welcome screen automatically
    pub skip_preference: SkipPreference,

    /// Bumped whenever the active step identity changes or the session is
    /// re-entered. Autoplay loops compare against it to detect staleness.
    pub epoch: u64,
}

impl SessionState {
    /// Inactive state seeded from persisted flags.
    pub fn new(flags: &PersistedFlags) -> Self {
        Self {
            is_active: false,
            current_step: 1,
            is_playing: false,
            playback_speed: PlaybackSpeed::default(),
            visited_steps: Vec::new(),
            visited_hotspots: BTreeSet::new(),
            active_modal: None,
            show_welcome: false,
            show_completion: false,
            has_completed_before: flags.completed_before,
            completed_at: flags.completed_at,
            skip_preference: flags.skip_preference,
            epoch: 0,
        }
    }

    /// Whether the step overlay (banner, hotspots, navigation bar) is shown.
    pub fn is_overlay_visible(&self) -> bool {
        self.is_active && !self.show_welcome && !self.show_completion
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step > 1
    }

    pub fn can_go_forward(&self, catalog: &Catalog) -> bool {
        self.current_step < catalog.total_steps()
    }

    /// Share of the sequence reached, in percent.
    pub fn progress_percentage(&self, catalog: &Catalog) -> f64 {
        f64::from(self.current_step) / f64::from(catalog.total_steps()) * 100.0
    }

    /// The active step's definition.
    pub fn current_step_config<'a>(&self, catalog: &'a Catalog) -> &'a Step {
        let id = catalog.clamp(i64::from(self.current_step));
        &catalog.steps()[id as usize - 1]
    }

    /// Hotspots to render right now; none while a bracketing screen is up.
    pub fn active_hotspots<'a>(&self, catalog: &'a Catalog) -> &'a [Hotspot] {
        if self.is_overlay_visible() {
            &self.current_step_config(catalog).hotspots
        } else {
            &[]
        }
    }

    pub fn is_step_visited(&self, step: u32) -> bool {
        self.visited_steps.contains(&step)
    }

    pub fn is_hotspot_visited(&self, id: &str) -> bool {
        self.visited_hotspots.contains(id)
    }

    /// Snapshot of the resumable part of the session.
    pub fn progress(&self) -> StoredProgress {
        StoredProgress {
            step: self.current_step,
            visited_steps: self.visited_steps.clone(),
            visited_hotspots: self.visited_hotspots.iter().cloned().collect(),
        }
    }

    /// Checks the structural invariants of the session against a catalog.
    ///
    /// - `current_step` lies in `[1, total_steps]`
    /// - at most one of modal, welcome, completion is showing
    /// - autoplay is off while welcome or completion is showing
    /// - visited steps are distinct and in range
    pub fn is_consistent(&self, catalog: &Catalog) -> bool {
        let in_range = |step: u32| (1..=catalog.total_steps()).contains(&step);

        let overlays = [
            self.active_modal.is_some(),
            self.show_welcome,
            self.show_completion,
        ]
        .iter()
        .filter(|shown| **shown)
        .count();

        let mut seen = BTreeSet::new();
        let distinct_visits = self.visited_steps.iter().all(|step| seen.insert(*step));

        in_range(self.current_step)
            && overlays <= 1
            && !(self.is_playing && (self.show_welcome || self.show_completion))
            && distinct_visits
            && self.visited_steps.iter().all(|step| in_range(*step))
    }
}
