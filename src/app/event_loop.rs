use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::Buffer;
use crate::lint::Linter;
use crate::sync::SyncController;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, reading the initial
    /// file, or the event loop encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - htmlive requires an interactive terminal")?;
        let size = terminal.size()?;

        let buffer = match &self.file_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let mut buffer = Buffer::from_text(&content);
                buffer.mark_clean();
                buffer
            }
            None => Buffer::empty(),
        };

        let linter = self.lint_enabled.then(Linter::new);
        let sync = SyncController::new(linter, self.debounce_ms);
        let mut model = Model::new(buffer, sync, (size.width, size.height));
        model.file_path.clone_from(&self.file_path);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        // First cycle up front so the preview is never blank at startup.
        model = update(model, Message::UpdateCycle);

        execute!(stdout(), EnableMouseCapture)?;
        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if model.sync.take_update_ready(now_ms) {
                *model = update(std::mem::take(model), Message::UpdateCycle);
                needs_render = true;
            }

            // Poll fast while a cycle is pending so the debounce deadline
            // is honored promptly.
            let poll_ms = if needs_render {
                0
            } else if model.sync.is_update_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                Self::apply_event(&event::read()?, model, &mut needs_render);

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    Self::apply_event(&event::read()?, model, &mut needs_render);
                }

                // Feed the debouncer after the burst, not per keystroke.
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if model.take_buffer_changed() {
                    model.sync.note_buffer_changed(event_ms);
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn apply_event(event: &event::Event, model: &mut Model, needs_render: &mut bool) {
        if let Some(msg) = Self::handle_event(event, model) {
            let side_msg = msg.clone();
            *model = update(std::mem::take(model), msg);
            Self::handle_message_side_effects(model, &side_msg);
            *needs_render = true;
        }
    }
}
