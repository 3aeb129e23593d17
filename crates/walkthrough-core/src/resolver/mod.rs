//! Hotspot position resolver.
//!
//! Placement is a pure function of the host layout and the active step's
//! hotspot list. [`PositionResolver`] only adds scheduling on top: it
//! listens for [`Signal`]s, waits for layout to settle after a step change,
//! and keeps the last computed positions for rendering.

use std::time::{Duration, Instant};

use log::trace;
use serde::Serialize;

use crate::{
    models::{Hotspot, Side},
    session::Signal,
};

mod layout;

pub use layout::{Layout, Rect, StaticLayout};

/// Marker edge length in pixels.
pub const HOTSPOT_SIZE: f64 = 28.0;

/// Gap between anchor and marker, and minimum distance to either viewport
/// edge.
pub const MARGIN: f64 = 8.0;

/// A right-hand marker ending closer than this to the viewport's right edge
/// flips to the left of its anchor.
pub const SCREEN_EDGE_BUFFER: f64 = 60.0;

/// Wait after a step change before reading the layout.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Screen placement of one hotspot marker.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedHotspot {
    pub hotspot_id: String,
    pub top: f64,
    pub left: f64,
    /// Side of the anchor the marker sits on
    pub side: Side,
    /// Direction the tooltip opens; follows `side`
    pub tooltip_side: Side,
}

/// Places one hotspot, or returns `None` when its anchor is not in the
/// current layout.
pub fn resolve_hotspot(hotspot: &Hotspot, layout: &dyn Layout) -> Option<ResolvedHotspot> {
    let Some(rect) = layout.anchor_rect(&hotspot.anchor) else {
        trace!("Anchor {} not present, skipping {}", hotspot.anchor, hotspot.id);
        return None;
    };
    let width = layout.viewport_width();

    let side = hotspot.side.unwrap_or_else(|| {
        if rect.right() + MARGIN + HOTSPOT_SIZE > width - SCREEN_EDGE_BUFFER {
            Side::Left
        } else {
            Side::Right
        }
    });

    let top = rect.top + rect.height / 2.0 - HOTSPOT_SIZE / 2.0 + hotspot.offset_y;
    let left = match side {
        Side::Left => rect.left - HOTSPOT_SIZE - MARGIN + hotspot.offset_x,
        Side::Right => rect.right() + MARGIN + hotspot.offset_x,
    };
    let left = left.min(width - HOTSPOT_SIZE - MARGIN).max(MARGIN);

    Some(ResolvedHotspot {
        hotspot_id: hotspot.id.clone(),
        top,
        left,
        side,
        tooltip_side: side,
    })
}

/// Places every hotspot whose anchor is present, preserving order.
pub fn resolve_all(hotspots: &[Hotspot], layout: &dyn Layout) -> Vec<ResolvedHotspot> {
    hotspots
        .iter()
        .filter_map(|hotspot| resolve_hotspot(hotspot, layout))
        .collect()
}

/// Signal-driven recompute scheduler holding the last computed positions.
#[derive(Debug, Clone)]
pub struct PositionResolver {
    attached: bool,
    due_at: Option<Instant>,
    positions: Vec<ResolvedHotspot>,
}

impl PositionResolver {
    /// Attached resolver with nothing scheduled.
    pub fn new() -> Self {
        Self {
            attached: true,
            due_at: None,
            positions: Vec::new(),
        }
    }

    /// Schedules a recompute in response to a session or host signal.
    ///
    /// Step changes wait for [`SETTLE_DELAY`]; resize and scroll recompute
    /// on the next poll. Exit and completion detach the resolver; only a new
    /// session re-attaches it.
    pub fn on_signal(&mut self, signal: &Signal, now: Instant) {
        if !self.attached {
            if !matches!(signal, Signal::Started | Signal::Restarted) {
                return;
            }
            self.attach();
        }

        match signal {
            Signal::Exited | Signal::Completed => self.detach(),
            Signal::Restarted => {
                self.positions.clear();
                self.due_at = Some(now + SETTLE_DELAY);
            }
            Signal::ViewportChanged | Signal::Scrolled => {
                self.due_at = Some(self.due_at.map_or(now, |due| due.min(now)));
            }
            signal if signal.affects_layout() => {
                self.due_at = Some(now + SETTLE_DELAY);
            }
            _ => {}
        }
    }

    /// Recomputes if a scheduled recompute is due. Returns whether the
    /// positions were refreshed.
    pub fn poll(&mut self, now: Instant, hotspots: &[Hotspot], layout: &dyn Layout) -> bool {
        match self.due_at {
            Some(due) if self.attached && now >= due => {
                self.recompute(hotspots, layout);
                true
            }
            _ => false,
        }
    }

    /// Recomputes immediately and clears any pending schedule.
    pub fn recompute(&mut self, hotspots: &[Hotspot], layout: &dyn Layout) -> &[ResolvedHotspot] {
        self.due_at = None;
        self.positions = resolve_all(hotspots, layout);
        &self.positions
    }

    /// Last computed positions.
    pub fn positions(&self) -> &[ResolvedHotspot] {
        &self.positions
    }

    pub fn position(&self, hotspot_id: &str) -> Option<&ResolvedHotspot> {
        self.positions.iter().find(|p| p.hotspot_id == hotspot_id)
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Stops reacting to signals and drops pending work and positions.
    pub fn detach(&mut self) {
        self.attached = false;
        self.due_at = None;
        self.positions.clear();
    }

    /// Resumes reacting to signals, e.g. when a new session is entered.
    pub fn attach(&mut self) {
        self.attached = true;
    }
}

impl Default for PositionResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
