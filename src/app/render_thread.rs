//! Drawing off the event loop.
//!
//! A dedicated thread owns the terminal and draws `AppState` snapshots. The
//! event loop hands frames over through a one-slot queue, so a slow terminal
//! never delays backend completions or key handling.

use std::io;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::state::AppState;

enum Frame {
    Draw(Box<AppState>),
    Stop,
}

/// Whether a snapshot reached the render thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Queued,
    /// The previous frame has not been drawn yet; offer this one again later
    Busy,
    /// The render thread has exited; nothing will be drawn any more
    Closed,
}

/// Sending half of the one-slot frame queue
pub struct FrameQueue {
    tx: SyncSender<Frame>,
}

impl FrameQueue {
    fn new() -> (Self, Receiver<Frame>) {
        let (tx, rx) = mpsc::sync_channel(1);
        (Self { tx }, rx)
    }

    /// Offer a snapshot without blocking
    pub fn offer(&self, state: &AppState) -> Delivery {
        match self.tx.try_send(Frame::Draw(Box::new(state.clone()))) {
            Ok(()) => Delivery::Queued,
            Err(TrySendError::Full(_)) => Delivery::Busy,
            Err(TrySendError::Disconnected(_)) => Delivery::Closed,
        }
    }
}

pub struct RenderThread {
    frames: FrameQueue,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Start the thread. It switches the terminal to raw alternate-screen mode
    /// and restores it when stopped.
    pub fn spawn() -> io::Result<Self> {
        let (frames, rx) = FrameQueue::new();
        let handle = thread::Builder::new()
            .name("render".to_string())
            .spawn(move || draw_frames(rx))?;

        Ok(Self {
            frames,
            handle: Some(handle),
        })
    }

    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

    /// Stop drawing and wait until the terminal is restored
    pub fn shutdown(mut self) {
        self.frames.tx.send(Frame::Stop).ok();
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

fn draw_frames(rx: Receiver<Frame>) {
    let mut terminal = match open_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            tracing::error!("Terminal setup failed: {}", e);
            disable_raw_mode().ok();
            return;
        }
    };

    while let Ok(Frame::Draw(state)) = rx.recv() {
        if let Err(e) = terminal.draw(|f| crate::ui::render(f, &state)) {
            tracing::error!("Render error: {}", e);
        }
    }

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}

fn open_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Receiving end of a frame queue with no thread behind it
#[cfg(test)]
pub(crate) struct FrameSink(Receiver<Frame>);

#[cfg(test)]
impl FrameSink {
    /// Take the waiting frame, as the render thread would; true if there was one
    pub fn take(&self) -> bool {
        self.0.try_recv().is_ok()
    }
}

#[cfg(test)]
pub(crate) fn detached_queue() -> (FrameQueue, FrameSink) {
    let (frames, rx) = FrameQueue::new();
    (frames, FrameSink(rx))
}
