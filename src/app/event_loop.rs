use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, StatusLevel, update};
use crate::document::Document;
use crate::file;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, terminal
    /// initialization fails, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        // Load before entering raw mode: an open failure is fatal and must
        // be reported on a sane terminal.
        let document = match &self.file_path {
            Some(path) => Document::from_lines(
                file::read_lines(path).context("Failed to open file")?,
            ),
            None => Document::new(),
        };

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — vted requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(
            self.file_path.clone(),
            document,
            (size.width, size.height),
        );
        model.readonly = self.readonly;
        if let Some(path) = &model.file_path {
            model.show_status(StatusLevel::Info, format!("Opened {}", path.display()));
        }
        tracing::debug!(
            width = size.width,
            height = size.height,
            lines = model.editor.document().line_count(),
            "session start"
        );

        let result = Self::event_loop(&mut terminal, &mut model);

        ratatui::restore();
        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_status(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if Self::dispatch(&event::read()?, model) {
                    needs_render = true;
                }
                // Coalesce key-repeat bursts into a single render.
                while event::poll(Duration::ZERO)? {
                    if Self::dispatch(&event::read()?, model) {
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Decode one terminal event, run the update, then its side effects.
    /// Returns whether anything was dispatched.
    fn dispatch(event: &event::Event, model: &mut Model) -> bool {
        let Some(msg) = Self::handle_event(event, model) else {
            return false;
        };
        tracing::debug!(?msg, "dispatch");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg);
        true
    }
}
