//! Display implementations for catalog models.
//!
//! Each renders markdown meant for a termimad skin; the plain string forms
//! of the small enums are their catalog names.

use std::fmt;

use crate::models::{Hotspot, HotspotKind, ModalContent, Side, SkipPreference, Step, StepKind};

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for HotspotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SkipPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ModalContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;

        if !self.features.is_empty() {
            writeln!(f)?;
            for feature in &self.features {
                writeln!(f, "- {feature}")?;
            }
        }

        if let Some(metrics) = &self.metrics {
            writeln!(f)?;
            writeln!(f, "- **Steps completed**: {}", metrics.steps_completed)?;
            writeln!(f, "- **Features explored**: {}", metrics.features_explored)?;
        }

        if !self.next_steps.is_empty() {
            writeln!(f)?;
            writeln!(f, "### Next steps")?;
            writeln!(f)?;
            for (index, suggestion) in self.next_steps.iter().enumerate() {
                writeln!(f, "{}. {suggestion}", index + 1)?;
            }
        }

        if let Some(link) = &self.help_link {
            writeln!(f)?;
            writeln!(f, "Need help? See `{link}`")?;
        }

        Ok(())
    }
}

impl fmt::Display for Hotspot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} **{}**: {}", self.kind.icon(), self.id, self.tooltip)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Phase: {}", self.phase)?;
        writeln!(f, "- Kind: {}", self.kind)?;
        writeln!(f, "- Route: `{}`", self.route)?;
        if self.is_manual() {
            writeln!(f, "- Duration: manual")?;
        } else {
            writeln!(f, "- Duration: {}s", self.duration_secs)?;
        }
        if let Some(focus) = &self.focus_element {
            writeln!(f, "- Focus: `{focus}`")?;
        }
        if let Some(trigger) = &self.trigger_element {
            writeln!(f, "- Trigger: `{trigger}`")?;
        }

        if let Some(instruction) = &self.instruction {
            writeln!(f)?;
            writeln!(f, "> {instruction}")?;
        }

        if !self.hotspots.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Hotspots")?;
            writeln!(f)?;
            for hotspot in &self.hotspots {
                writeln!(f, "- {hotspot}")?;
            }
        }

        if let Some(modal) = &self.modal {
            writeln!(f)?;
            write!(f, "{modal}")?;
        }

        Ok(())
    }
}
