//! Command handlers: each subcommand renders one markdown surface.

use anyhow::{Context, Result};
use log::info;
use walkthrough_core::{
    display::{PhaseList, PositionTable, StatusReport, StepList},
    resolve_all, SkipPreference, StaticLayout, Walkthrough,
};

use crate::{
    args::{PlayArgs, ResolveArgs},
    player::Player,
    renderer::TerminalRenderer,
};

pub struct Cli {
    walkthrough: Walkthrough,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(walkthrough: Walkthrough, renderer: TerminalRenderer) -> Self {
        Self {
            walkthrough,
            renderer,
        }
    }

    pub fn list_steps(&self, phase: Option<&str>) -> Result<()> {
        let catalog = self.walkthrough.catalog();
        let steps = match phase {
            Some(phase) => StepList(catalog.by_phase(phase)),
            None => StepList::all(catalog),
        };
        self.renderer.render(&steps.to_string())
    }

    pub fn show_step(&self, id: u32) -> Result<()> {
        let step = self
            .walkthrough
            .catalog()
            .step(id)
            .with_context(|| format!("Failed to show step {id}"))?;
        self.renderer.render(&step.to_string())
    }

    pub fn list_phases(&self) -> Result<()> {
        self.renderer
            .render(&PhaseList(self.walkthrough.catalog()).to_string())
    }

    /// Places the hotspots of one step against a layout file.
    pub fn resolve(&self, args: &ResolveArgs) -> Result<()> {
        let step = self
            .walkthrough
            .catalog()
            .step(args.step)
            .with_context(|| format!("Failed to resolve step {}", args.step))?;
        let mut layout = StaticLayout::from_json_file(&args.layout)
            .with_context(|| format!("Failed to load layout {}", args.layout.display()))?;
        if let Some(width) = args.width {
            layout
                .set_viewport_width(width)
                .with_context(|| format!("Invalid --width {width}"))?;
        }

        let positions = resolve_all(&step.hotspots, &layout);
        let mut output = format!("# {}. {}\n\n{}", step.id, step.name, PositionTable(&positions));
        let missing: Vec<&str> = step
            .hotspots
            .iter()
            .filter(|hotspot| !positions.iter().any(|p| p.hotspot_id == hotspot.id))
            .map(|hotspot| hotspot.id.as_str())
            .collect();
        if !missing.is_empty() {
            output.push_str(&format!("\nNot on screen: {}\n", missing.join(", ")));
        }
        self.renderer.render(&output)
    }

    pub fn status(&self) -> Result<()> {
        let flags = self
            .walkthrough
            .flags()
            .context("Failed to read walkthrough flags")?;
        self.renderer.render(
            &StatusReport {
                flags: &flags,
                catalog: self.walkthrough.catalog(),
            }
            .to_string(),
        )
    }

    pub fn reset(mut self) -> Result<()> {
        self.walkthrough
            .forget()
            .context("Failed to reset walkthrough flags")?;
        self.renderer.notice("Walkthrough state cleared.")
    }

    pub fn prefer(mut self, preference: SkipPreference) -> Result<()> {
        self.walkthrough.set_skip_preference(preference);
        self.renderer
            .notice(&format!("Skip preference set to {preference}."))
    }

    /// Runs the interactive player.
    pub async fn play(mut self, args: &PlayArgs) -> Result<()> {
        if let Some(speed) = args.speed {
            self.walkthrough.set_playback_speed(speed);
        }
        let layout = match &args.layout {
            Some(path) => Some(
                StaticLayout::from_json_file(path)
                    .with_context(|| format!("Failed to load layout {}", path.display()))?,
            ),
            None => None,
        };

        let mut player = Player::new(self.walkthrough, self.renderer, layout);
        player.open(args.resume, args.autoplay);
        player.run().await
    }

    /// Entry without a command: offer the walkthrough if the saved
    /// preference allows it.
    pub async fn auto_start(self) -> Result<()> {
        if !self.walkthrough.should_auto_start() {
            info!("Auto-start declined by saved preference");
            return self
                .renderer
                .notice("Walkthrough not shown automatically. Run `wt play` to start it.");
        }
        self.play(&PlayArgs::default()).await
    }
}
