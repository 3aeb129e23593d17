//! Collection wrappers for listing catalog contents.

use std::fmt;

use crate::{catalog::Catalog, models::Step};

/// Compact one-line-per-step listing.
///
/// ```rust
/// use walkthrough_core::{display::StepList, Catalog};
///
/// let catalog = Catalog::deepsafe();
/// let output = StepList(catalog.by_phase("Completion")).to_string();
/// assert!(output.contains("15."));
/// ```
pub struct StepList<'a>(pub Vec<&'a Step>);

impl<'a> StepList<'a> {
    /// Every step of a catalog, in order.
    pub fn all(catalog: &'a Catalog) -> Self {
        Self(catalog.steps().iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for StepList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No steps found.");
        }

        for step in &self.0 {
            let duration = if step.is_manual() {
                "manual".to_string()
            } else {
                format!("{}s", step.duration_secs)
            };
            let hotspots = match step.hotspots.len() {
                0 => String::new(),
                1 => ", 1 hotspot".to_string(),
                n => format!(", {n} hotspots"),
            };
            writeln!(
                f,
                "{}. **{}** ({}, {duration}{hotspots}) `{}`",
                step.id, step.name, step.kind, step.route
            )?;
        }
        Ok(())
    }
}

/// Phase overview: each phase with the step range it spans.
pub struct PhaseList<'a>(pub &'a Catalog);

impl fmt::Display for PhaseList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for phase in self.0.phases() {
            let ids: Vec<String> = self
                .0
                .by_phase(phase)
                .iter()
                .map(|step| step.id.to_string())
                .collect();
            writeln!(f, "- **{phase}**: steps {}", ids.join(", "))?;
        }
        Ok(())
    }
}
