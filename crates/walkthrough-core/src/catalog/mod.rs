//! Static, ordered step catalog.
//!
//! A [`Catalog`] is validated once when it is built and is read-only from
//! then on. Every clamping computation in the session relies on step ids
//! being exactly `1..=N`, so a catalog that breaks this is rejected up front
//! rather than producing an off-by-one session later.

use std::{collections::HashSet, path::Path};

use serde::Deserialize;

use crate::{
    error::{Result, WalkthroughError},
    models::{Hotspot, Step},
};

mod deepsafe;

/// Validated, ordered list of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    steps: Vec<Step>,
}

#[derive(Deserialize)]
struct CatalogFile {
    steps: Vec<Step>,
}

impl Catalog {
    /// Builds a catalog, failing fast when step ids are not contiguous from 1
    /// or a step carries duplicate hotspot ids.
    pub fn new(steps: Vec<Step>) -> Result<Self> {
        if steps.is_empty() {
            return Err(WalkthroughError::invalid_catalog(
                "catalog must contain at least one step",
            ));
        }

        for (index, step) in steps.iter().enumerate() {
            let expected = index as u32 + 1;
            if step.id != expected {
                return Err(WalkthroughError::invalid_catalog(format!(
                    "step at position {expected} has id {}, ids must be contiguous from 1",
                    step.id
                )));
            }

            let mut seen = HashSet::new();
            if let Some(duplicate) = step.hotspots.iter().find(|h| !seen.insert(h.id.as_str())) {
                return Err(WalkthroughError::invalid_catalog(format!(
                    "step {} has duplicate hotspot id '{}'",
                    step.id, duplicate.id
                )));
            }
        }

        Ok(Self { steps })
    }

    /// The built-in DeepSafe dashboard tour: 15 steps across 6 phases.
    pub fn deepsafe() -> Self {
        Self {
            steps: deepsafe::steps(),
        }
    }

    /// Parses and validates a catalog from JSON of the form
    /// `{ "steps": [ ... ] }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.steps)
    }

    /// Reads a JSON catalog file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| WalkthroughError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    /// Number of steps; always at least 1.
    pub fn total_steps(&self) -> u32 {
        self.steps.len() as u32
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Looks up a step by its 1-based id.
    pub fn get(&self, id: u32) -> Option<&Step> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.steps.get(index)
    }

    /// Like [`Catalog::get`] but reports a missing step as an error.
    pub fn step(&self, id: u32) -> Result<&Step> {
        self.get(id).ok_or(WalkthroughError::StepNotFound { id })
    }

    /// Looks up a hotspot on a given step.
    pub fn hotspot(&self, step: u32, id: &str) -> Result<&Hotspot> {
        self.step(step)?
            .hotspot(id)
            .ok_or_else(|| WalkthroughError::HotspotNotFound {
                step,
                id: id.to_string(),
            })
    }

    /// Steps belonging to a phase, in catalog order.
    pub fn by_phase(&self, phase: &str) -> Vec<&Step> {
        self.steps.iter().filter(|step| step.phase == phase).collect()
    }

    /// Distinct phase names in first-seen order.
    pub fn phases(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.steps
            .iter()
            .map(|step| step.phase.as_str())
            .filter(|phase| seen.insert(*phase))
            .collect()
    }

    /// Clamps an arbitrary step request into `[1, total_steps]`.
    pub fn clamp(&self, step: i64) -> u32 {
        step.clamp(1, i64::from(self.total_steps())) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HotspotKind, StepKind};

    fn step(id: u32, phase: &str) -> Step {
        Step {
            id,
            name: format!("Step {id}"),
            phase: phase.to_string(),
            kind: StepKind::FullPage,
            route: "/app/dashboard".to_string(),
            duration_secs: 10,
            instruction: None,
            focus_element: None,
            trigger_element: None,
            hotspots: Vec::new(),
            modal: None,
            accepts_route: None,
            advance_on_route: None,
        }
    }

    fn hotspot(id: &str) -> Hotspot {
        Hotspot {
            id: id.to_string(),
            kind: HotspotKind::Info,
            anchor: format!("#{id}"),
            tooltip: id.to_string(),
            offset_x: 0.0,
            offset_y: 0.0,
            side: None,
            modal: None,
        }
    }

    #[test]
    fn test_new_accepts_contiguous_ids() {
        let catalog = Catalog::new(vec![step(1, "A"), step(2, "A"), step(3, "B")]).unwrap();
        assert_eq!(catalog.total_steps(), 3);
    }

    #[test]
    fn test_new_rejects_empty_catalog() {
        assert!(matches!(
            Catalog::new(Vec::new()),
            Err(WalkthroughError::InvalidCatalog { .. })
        ));
    }

    #[test]
    fn test_new_rejects_gap_in_ids() {
        let err = Catalog::new(vec![step(1, "A"), step(3, "A")]).unwrap_err();
        assert!(err.to_string().contains("contiguous"));
    }

    #[test]
    fn test_new_rejects_ids_not_starting_at_one() {
        assert!(Catalog::new(vec![step(0, "A"), step(1, "A")]).is_err());
    }

    #[test]
    fn test_new_rejects_duplicate_hotspots() {
        let mut first = step(1, "A");
        first.hotspots = vec![hotspot("chart"), hotspot("chart")];
        let err = Catalog::new(vec![first]).unwrap_err();
        assert!(err.to_string().contains("duplicate hotspot id 'chart'"));
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(vec![step(1, "A"), step(2, "B")]).unwrap();
        assert_eq!(catalog.get(2).map(|s| s.id), Some(2));
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(3).is_none());
        assert!(matches!(
            catalog.step(9),
            Err(WalkthroughError::StepNotFound { id: 9 })
        ));
    }

    #[test]
    fn test_phases_are_distinct_and_ordered() {
        let catalog =
            Catalog::new(vec![step(1, "Intro"), step(2, "Metrics"), step(3, "Intro")]).unwrap();
        assert_eq!(catalog.phases(), vec!["Intro", "Metrics"]);
        let intro: Vec<u32> = catalog.by_phase("Intro").iter().map(|s| s.id).collect();
        assert_eq!(intro, vec![1, 3]);
        assert!(catalog.by_phase("Missing").is_empty());
    }

    #[test]
    fn test_clamp() {
        let catalog = Catalog::new(vec![step(1, "A"), step(2, "A"), step(3, "A")]).unwrap();
        assert_eq!(catalog.clamp(-4), 1);
        assert_eq!(catalog.clamp(0), 1);
        assert_eq!(catalog.clamp(2), 2);
        assert_eq!(catalog.clamp(99), 3);
    }

    #[test]
    fn test_hotspot_lookup_errors() {
        let mut first = step(1, "A");
        first.hotspots = vec![hotspot("metrics-area")];
        let catalog = Catalog::new(vec![first]).unwrap();
        assert!(catalog.hotspot(1, "metrics-area").is_ok());
        assert!(matches!(
            catalog.hotspot(1, "nope"),
            Err(WalkthroughError::HotspotNotFound { step: 1, .. })
        ));
    }

    #[test]
    fn test_from_json_str_validates() {
        let json = r#"{"steps": [
            {"id": 1, "name": "Welcome", "phase": "Intro", "kind": "modal", "route": "/"},
            {"id": 3, "name": "Oops", "phase": "Intro", "kind": "full-page", "route": "/"}
        ]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(WalkthroughError::InvalidCatalog { .. })
        ));

        let malformed = r#"{"steps": [{"id": "one"}]}"#;
        assert!(matches!(
            Catalog::from_json_str(malformed),
            Err(WalkthroughError::Serialization { .. })
        ));
    }

    #[test]
    fn test_deepsafe_catalog_is_valid() {
        let builtin = Catalog::deepsafe();
        let validated = Catalog::new(builtin.steps().to_vec()).unwrap();
        assert_eq!(validated.total_steps(), 15);
        assert_eq!(
            validated.phases(),
            vec![
                "Introduction",
                "Dashboard Metrics",
                "Meeting Analysis",
                "Participant Intelligence",
                "Customization",
                "Completion",
            ]
        );
        assert!(validated.get(1).unwrap().is_manual());
        assert!(validated.get(15).unwrap().is_manual());
        assert_eq!(validated.get(6).unwrap().kind, StepKind::Navigation);
        assert!(validated.hotspot(2, "metrics-area").is_ok());
    }
}
