//! Interactive player: line commands on stdin, one frame every 16ms.
//!
//! Each frame drives the autoplay timer, drains session signals into the
//! position resolver and re-renders whatever surface is on screen when the
//! session changed.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    signal,
    sync::broadcast::{self, error::TryRecvError},
    time::{self, MissedTickBehavior},
};
use walkthrough_core::{
    display::{CompletionCard, PositionTable, StepCard, WelcomeCard},
    AutoplayTimer, Key, PlaybackSpeed, PositionResolver, Signal, StaticLayout, Tick, Walkthrough,
};

use crate::renderer::TerminalRenderer;

const FRAME: Duration = Duration::from_millis(16);

const HELP: &str = "\
## Commands

- `next`, `prev`, `goto N`: move between steps
- `play`, `pause`, `toggle`, `speed X`: control autoplay (X is 0.5, 1, 1.5 or 2)
- `open HOTSPOT`, `close`: explore a hotspot and dismiss its details
- `start`, `skip`, `restart`, `finish`: enter, leave, rewind or complete the tour
- `route PATH`, `resize WIDTH`, `scroll`: report host navigation and layout changes
- `key NAME`: press a key (left, right, space, esc, 1-9, r)
- `quit`: leave the player, keeping progress
";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Player {
    walkthrough: Walkthrough,
    renderer: TerminalRenderer,
    layout: Option<StaticLayout>,
    resolver: PositionResolver,
    timer: AutoplayTimer,
    signals: broadcast::Receiver<Signal>,
}

impl Player {
    pub fn new(
        walkthrough: Walkthrough,
        renderer: TerminalRenderer,
        layout: Option<StaticLayout>,
    ) -> Self {
        let signals = walkthrough.subscribe();
        Self {
            walkthrough,
            renderer,
            layout,
            resolver: PositionResolver::new(),
            timer: AutoplayTimer::new(),
            signals,
        }
    }

    /// Enters the tour, from saved progress when `resume` is set and there
    /// is some.
    pub fn open(&mut self, resume: bool, autoplay: bool) {
        if !(resume && self.walkthrough.resume()) {
            self.walkthrough.start();
        }
        if autoplay {
            self.walkthrough.close_welcome();
            self.walkthrough.set_playing(true);
        }
    }

    /// Runs until `quit` or end of input. Leaving an unfinished tour keeps
    /// its progress for `wt play --resume`.
    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(io::stdin()).lines();
        let mut frames = time::interval(FRAME);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.drain_signals(Instant::now());
        self.render_surface()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read command")? else {
                        break;
                    };
                    if self.execute(line.trim())? == Flow::Quit {
                        break;
                    }
                    self.refresh(Instant::now())?;
                }
                _ = frames.tick() => self.frame(Instant::now())?,
                _ = signal::ctrl_c() => {
                    info!("Interrupted, leaving walkthrough");
                    break;
                }
            }
        }

        if self.walkthrough.state().is_active {
            self.walkthrough.exit();
        }
        Ok(())
    }

    fn frame(&mut self, now: Instant) -> Result<()> {
        if self.timer.tick(&mut self.walkthrough, now) == Tick::Advanced {
            debug!("Autoplay moved to step {}", self.walkthrough.state().current_step);
        }
        self.refresh(now)?;

        if let Some(layout) = &self.layout {
            if self
                .resolver
                .poll(now, self.walkthrough.active_hotspots(), layout)
            {
                self.renderer
                    .render(&PositionTable(self.resolver.positions()).to_string())?;
            }
        }
        Ok(())
    }

    /// Forwards pending signals and re-renders if the session changed.
    fn refresh(&mut self, now: Instant) -> Result<()> {
        if self.drain_signals(now) {
            self.render_surface()?;
        }
        Ok(())
    }

    fn drain_signals(&mut self, now: Instant) -> bool {
        let mut changed = false;
        loop {
            match self.signals.try_recv() {
                Ok(signal) => {
                    debug!("Signal: {signal:?}");
                    self.resolver.on_signal(&signal, now);
                    changed |= !matches!(signal, Signal::ViewportChanged | Signal::Scrolled);
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Missed {skipped} walkthrough signals");
                    changed = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        changed
    }

    fn render_surface(&self) -> Result<()> {
        let state = self.walkthrough.state();
        let catalog = self.walkthrough.catalog();

        let surface = if !state.is_active {
            "Walkthrough closed. Type `start` to begin again or `quit` to leave.\n".to_string()
        } else if state.show_welcome {
            format!("{}\nType `start` to begin or `skip` to leave.\n", WelcomeCard(catalog))
        } else if state.show_completion {
            format!(
                "{}\nType `finish` to finish or `restart` to go again.\n",
                CompletionCard { state, catalog }
            )
        } else if let Some(modal) = &state.active_modal {
            format!("{modal}\nType `close` to return to the tour.\n")
        } else {
            let mut card = StepCard {
                state,
                catalog,
                progress: self.timer.is_running().then(|| self.timer.progress()),
            }
            .to_string();
            if let Some(route) = self.walkthrough.required_route() {
                card.push_str(&format!("\nNavigate to `{route}` to continue.\n"));
            }
            card
        };
        self.renderer.render(&surface)
    }

    fn execute(&mut self, line: &str) -> Result<Flow> {
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "next" | "n" => self.walkthrough.advance(),
            "prev" | "p" | "back" => self.walkthrough.retreat(),
            "goto" | "g" => match arg.parse::<i64>() {
                Ok(step) => self.walkthrough.go_to_step(step),
                Err(_) => self.renderer.notice(&format!("Not a step number: {arg}"))?,
            },
            "play" => self.walkthrough.set_playing(true),
            "pause" => self.walkthrough.set_playing(false),
            "toggle" => self.walkthrough.toggle_play(),
            "speed" => self.change_speed(arg)?,
            "open" => {
                if let Err(e) = self.walkthrough.open_hotspot(arg) {
                    self.renderer.notice(&e.to_string())?;
                }
            }
            "close" => self.close(),
            "start" => {
                if self.walkthrough.state().show_welcome {
                    self.walkthrough.close_welcome();
                } else {
                    self.walkthrough.start();
                }
            }
            "skip" => self.walkthrough.skip(),
            "restart" => self.walkthrough.restart(),
            "finish" => self.walkthrough.complete_sequence(),
            "route" => {
                self.walkthrough.on_route_changed(arg);
            }
            "resize" => self.resize(arg)?,
            "scroll" => self.walkthrough.notify_scrolled(),
            "key" => match arg.parse::<Key>() {
                Ok(key) => {
                    if !self.walkthrough.handle_key(key) {
                        debug!("Key {key:?} ignored");
                    }
                }
                Err(e) => self.renderer.notice(&e)?,
            },
            "help" | "?" => self.renderer.render(HELP)?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => self
                .renderer
                .notice(&format!("Unknown command: {other}. Type `help` for a list."))?,
        }
        Ok(Flow::Continue)
    }

    fn change_speed(&mut self, arg: &str) -> Result<()> {
        let outcome = match arg.trim_end_matches(['x', 'X']).parse::<f64>() {
            Ok(multiplier) => self.walkthrough.set_speed(multiplier),
            Err(_) => arg
                .parse::<PlaybackSpeed>()
                .map(|speed| self.walkthrough.set_playback_speed(speed)),
        };
        match outcome {
            Ok(()) => Ok(()),
            Err(e) => self.renderer.notice(&e.to_string()),
        }
    }

    /// Dismisses whatever overlay is on top.
    fn close(&mut self) {
        let state = self.walkthrough.state();
        if state.active_modal.is_some() {
            self.walkthrough.close_modal();
        } else if state.show_welcome {
            self.walkthrough.close_welcome();
        } else if state.show_completion {
            self.walkthrough.complete_sequence();
        } else {
            self.walkthrough.exit();
        }
    }

    fn resize(&mut self, arg: &str) -> Result<()> {
        let Ok(width) = arg.parse::<f64>() else {
            return self.renderer.notice(&format!("Not a width: {arg}"));
        };
        match &mut self.layout {
            Some(layout) => match layout.set_viewport_width(width) {
                Ok(()) => {
                    self.walkthrough.notify_viewport_changed();
                    Ok(())
                }
                Err(e) => self.renderer.notice(&e.to_string()),
            },
            None => self
                .renderer
                .notice("No layout loaded. Pass `--layout` to place hotspots."),
        }
    }
}
