use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::interval;
use tracing::{info, warn};

use crate::game::{FrameQueue, Game, GameConfig, GameEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Animation frame period, roughly 60 fps; ticks are gated separately by the engine
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Keyboard-driven play in the terminal
pub struct HumanMode {
    game: Game<FrameQueue>,
    events: UnboundedReceiver<GameEvent>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    clock: Instant,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let mut game = Game::new(config, FrameQueue::new()).context("Failed to create game")?;
        let events = game.subscribe();

        Ok(Self {
            game,
            events,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            clock: Instant::now(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.game.stop();
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Animation frame
                _ = frame_timer.tick() => {
                    self.advance_frame();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(action) => self.game.apply(action),
                KeyAction::Start => self.start_round(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        self.drain_events();
    }

    fn start_round(&mut self) {
        if let Err(err) = self.game.start() {
            warn!(%err, "Could not start a round");
        }
    }

    /// Serve the engine's pending frame request, then fold its events into the metrics
    fn advance_frame(&mut self) {
        if self.game.scheduler_mut().take_due().is_some() {
            if let Err(err) = self.game.on_frame(self.clock.elapsed()) {
                warn!(%err, "Round ended abnormally");
            }
        }

        self.drain_events();
        self.metrics.update();
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if let GameEvent::StateChanged(state) = event {
                info!(?state, score = self.metrics.score, "Game state changed");
            }
            self.metrics.on_event(event);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
