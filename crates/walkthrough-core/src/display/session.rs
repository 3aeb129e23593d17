//! Presentation surfaces for a running session.
//!
//! These wrappers only read session state; every surface a host renders is
//! built from one of them.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    catalog::Catalog,
    models::{CompletionMetrics, ModalContent},
    resolver::ResolvedHotspot,
    session::SessionState,
    store::PersistedFlags,
};

const BAR_WIDTH: usize = 20;

/// Progress dots for the bottom navigation bar.
///
/// `◉` marks the current step, `●` visited steps and `○` the rest.
pub struct ProgressDots<'a> {
    pub state: &'a SessionState,
    pub catalog: &'a Catalog,
}

impl fmt::Display for ProgressDots<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dots: Vec<&str> = (1..=self.catalog.total_steps())
            .map(|id| {
                if id == self.state.current_step {
                    "◉"
                } else if self.state.is_step_visited(id) {
                    "●"
                } else {
                    "○"
                }
            })
            .collect();
        write!(
            f,
            "{} {}/{}",
            dots.join(" "),
            self.state.current_step,
            self.catalog.total_steps()
        )
    }
}

/// Welcome screen shown when the sequence is entered.
pub struct WelcomeCard<'a>(pub &'a Catalog);

impl fmt::Display for WelcomeCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get(1).and_then(|step| step.modal.as_ref()) {
            Some(modal) => write!(f, "{modal}")?,
            None => writeln!(f, "## Welcome")?,
        }
        writeln!(f)?;
        writeln!(
            f,
            "*{} steps across {} phases*",
            self.0.total_steps(),
            self.0.phases().len()
        )
    }
}

/// Completion screen, with counters taken from the live session.
pub struct CompletionCard<'a> {
    pub state: &'a SessionState,
    pub catalog: &'a Catalog,
}

impl fmt::Display for CompletionCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.catalog.get(self.catalog.total_steps());
        let mut modal = last
            .and_then(|step| step.modal.clone())
            .unwrap_or_else(|| ModalContent::new("Walkthrough complete", "You reached the end."));
        modal.metrics = Some(CompletionMetrics {
            steps_completed: self.state.visited_steps.len() as u32,
            features_explored: self.state.visited_hotspots.len() as u32,
        });
        write!(f, "{modal}")
    }
}

/// The step overlay: banner, hotspots and playback status.
pub struct StepCard<'a> {
    pub state: &'a SessionState,
    pub catalog: &'a Catalog,
    /// Autoplay progress of the current step, if a loop is running
    pub progress: Option<f64>,
}

impl fmt::Display for StepCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = self.state.current_step_config(self.catalog);

        writeln!(
            f,
            "**Step {} of {}** · {}",
            step.id,
            self.catalog.total_steps(),
            step.phase
        )?;
        writeln!(f)?;
        writeln!(f, "## {}", step.name)?;

        if let Some(instruction) = &step.instruction {
            writeln!(f)?;
            writeln!(f, "> {instruction}")?;
        }

        if !step.hotspots.is_empty() {
            writeln!(f)?;
            for hotspot in &step.hotspots {
                let mark = if self.state.is_hotspot_visited(&hotspot.id) {
                    "✓"
                } else {
                    " "
                };
                writeln!(f, "- [{mark}] {hotspot}")?;
            }
        }

        writeln!(f)?;
        let playback = if self.state.is_playing {
            "playing"
        } else {
            "paused"
        };
        write!(f, "{playback} at {}", self.state.playback_speed)?;
        if let Some(progress) = self.progress {
            let filled = ((progress.clamp(0.0, 1.0)) * BAR_WIDTH as f64).round() as usize;
            write!(
                f,
                " `{}{}`",
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled)
            )?;
        }
        writeln!(f)?;
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            ProgressDots {
                state: self.state,
                catalog: self.catalog,
            }
        )
    }
}

/// Markdown table of resolved hotspot positions.
pub struct PositionTable<'a>(pub &'a [ResolvedHotspot]);

impl fmt::Display for PositionTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No hotspots can be placed in this layout.");
        }

        writeln!(f, "| Hotspot | Top | Left | Side | Tooltip |")?;
        writeln!(f, "|:-|-:|-:|:-:|:-:|")?;
        for position in self.0 {
            writeln!(
                f,
                "| {} | {:.0} | {:.0} | {} | {} |",
                position.hotspot_id,
                position.top,
                position.left,
                position.side,
                position.tooltip_side
            )?;
        }
        Ok(())
    }
}

/// Summary of the durable flags.
pub struct StatusReport<'a> {
    pub flags: &'a PersistedFlags,
    pub catalog: &'a Catalog,
}

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Walkthrough status")?;
        writeln!(f)?;
        match &self.flags.completed_at {
            Some(at) => writeln!(f, "- Completed: yes, {}", LocalDateTime(at))?,
            None if self.flags.completed_before => writeln!(f, "- Completed: yes")?,
            None => writeln!(f, "- Completed: no")?,
        }
        writeln!(f, "- Skip preference: {}", self.flags.skip_preference)?;
        match &self.flags.progress {
            Some(progress) => writeln!(
                f,
                "- Saved progress: step {} of {}, {} hotspots explored",
                progress.step,
                self.catalog.total_steps(),
                progress.visited_hotspots.len()
            )?,
            None => writeln!(f, "- Saved progress: none")?,
        }
        Ok(())
    }
}
