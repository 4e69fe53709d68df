//! Main event loop and backend event processing

use anyhow::{Result, bail};
use crossterm::{event, event::Event, terminal};
use ratatui::layout::Rect;
use std::time::Duration;

use crate::backend::BackendEvent;
use crate::constants::{POLL_BUSY_MS, POLL_IDLE_MS};
use crate::input::{InputResult, handle_input};

use super::App;
use super::render_thread::{Delivery, FrameQueue, RenderThread};

impl App {
    pub(crate) async fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        if let Ok((width, height)) = terminal::size() {
            self.state.viewport = Rect::new(0, 0, width, height);
        }

        loop {
            // Apply backend completions first (non-blocking)
            if self.process_backend_events() {
                self.dirty = true;
            }

            // Clear expired errors
            if self.state.clear_error_if_expired() {
                self.dirty = true;
            }

            // Keep the spinner moving while a request is in flight
            let loading = self.state.is_loading();
            if loading {
                self.dirty = true;
            }

            if !self.present(render_thread.frames()) {
                bail!("Render thread stopped");
            }

            // Handle input (adaptive timeout: faster while loading)
            // A deferred frame is retried on the fast poll too
            let poll_timeout = if loading || self.dirty {
                POLL_BUSY_MS
            } else {
                POLL_IDLE_MS
            };
            if event::poll(Duration::from_millis(poll_timeout))? {
                let evt = event::read()?;
                // Any input event (including resize) requires re-render
                self.dirty = true;
                if let Event::Resize(width, height) = evt {
                    self.state.viewport = Rect::new(0, 0, width, height);
                }
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => {
                        self.state.acknowledge_error();
                        self.handle_action(action).await;
                    }
                    InputResult::Char(c) => {
                        self.state.acknowledge_error();
                        self.handle_char(c);
                    }
                    InputResult::Backspace => {
                        self.state.acknowledge_error();
                        self.handle_backspace();
                    }
                    InputResult::Continue => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Hand the current state to the render thread if it changed. The dirty
    /// flag stays set until a frame is actually queued. Returns false once the
    /// render thread is gone.
    pub(crate) fn present(&mut self, frames: &FrameQueue) -> bool {
        if !self.dirty {
            return true;
        }
        match frames.offer(&self.state) {
            Delivery::Queued => {
                self.dirty = false;
                true
            }
            Delivery::Busy => {
                tracing::trace!("Render thread busy, frame deferred");
                true
            }
            Delivery::Closed => {
                tracing::error!("Render thread disconnected");
                false
            }
        }
    }

    /// Apply every completion the backend actor has reported so far.
    /// Returns true if any events were processed.
    pub(crate) fn process_backend_events(&mut self) -> bool {
        let mut had_events = false;

        while let Ok(event) = self.backend.event_rx.try_recv() {
            had_events = true;
            match event {
                BackendEvent::EmailsFetched { generation, result } => {
                    self.apply_fetched_emails(generation, result);
                }
                BackendEvent::ChatAnswered { generation, result } => {
                    self.apply_chat_answer(generation, result);
                }
            }
        }

        had_events
    }
}

#[cfg(test)]
mod tests {
    use crate::app::render_thread::detached_queue;
    use crate::app::test_support::app;
    use crate::backend::{BackendEvent, EmailId, EmailSummary};

    #[tokio::test]
    async fn test_frame_stays_pending_while_render_thread_is_busy() {
        let (mut app, backend) = app();
        let (frames, sink) = detached_queue();

        // Previous frame still waiting to be drawn
        assert!(app.present(&frames));
        assert!(!app.dirty);

        // A completion lands and nothing is loading any more
        app.fetch_emails().await;
        let generation = app.requests.list;
        backend
            .event_tx
            .send(BackendEvent::EmailsFetched {
                generation,
                result: Ok(vec![EmailSummary {
                    id: EmailId::from(1),
                    subject: Some("Hello".to_string()),
                    from: None,
                    summary: None,
                }]),
            })
            .await
            .unwrap();
        assert!(app.process_backend_events());
        app.dirty = true;
        assert!(!app.state.is_loading());

        assert!(app.present(&frames));
        assert!(app.dirty, "frame must be offered again");

        assert!(sink.take());
        assert!(app.present(&frames));
        assert!(!app.dirty);
        assert!(sink.take());
    }

    #[test]
    fn test_present_reports_stopped_render_thread() {
        let (mut app, _backend) = app();
        let (frames, sink) = detached_queue();
        drop(sink);

        assert!(!app.present(&frames));
        assert!(app.dirty);
    }
}
