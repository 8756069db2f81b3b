//! Application loop driving the cheat sheet

use std::{
    io,
    time::{Duration, Instant},
};

use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::{
    error::TuiResult,
    event::{Event, EventLoop},
    sheet::CheatSheet,
    terminal::{install_panic_hook, TerminalState},
};

pub struct App {
    sheet: CheatSheet,
    tick: Duration,
}

impl App {
    pub fn new(sheet: CheatSheet, tick: Duration) -> Self {
        Self { sheet, tick }
    }

    pub fn sheet(&self) -> &CheatSheet {
        &self.sheet
    }

    /// Take over the terminal and run until the user quits
    pub async fn run(mut self) -> TuiResult<()> {
        install_panic_hook();
        let mut terminal_state = TerminalState::capture(self.sheet.mouse_enabled())?;

        let result = self.run_on_stdout().await;

        terminal_state.restore()?;
        tracing::info!("Cheat sheet closed");
        result
    }

    async fn run_on_stdout(&mut self) -> TuiResult<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        let mut events = EventLoop::new(self.tick);
        let result = self.event_loop(&mut terminal, &mut events).await;
        // no reads may race the shell once raw mode is off
        events.shutdown();
        result
    }

    /// Draw, then redraw whenever an event changes what is on screen
    pub async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut EventLoop,
    ) -> TuiResult<()> {
        self.draw(terminal)?;

        while let Some(event) = events.next().await {
            let redraw = match event {
                Event::Key(key) => self.sheet.handle_key(key),
                Event::Mouse(mouse) => self.sheet.handle_mouse(mouse),
                Event::Resize { width, height } => {
                    tracing::debug!(width, height, "Terminal resized");
                    true
                }
                Event::Tick => self.sheet.tick(Instant::now()),
            };

            if self.sheet.should_quit() {
                break;
            }
            if redraw {
                self.draw(terminal)?;
            }
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> TuiResult<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            self.sheet.render(frame, area);
        })?;
        Ok(())
    }
}
