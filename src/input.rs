//! Cancellable line input.
//!
//! Reading a line either yields the line or reports that the user cancelled.
//! Ctrl-C and end of input both count as cancellation, so callers never see
//! a signal or an I/O fault from the terminal.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use thiserror::Error;

/// Outcome of one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted {
    /// A line of input, without its line terminator.
    Line(String),
    /// Interrupt or end of input.
    Cancelled,
}

/// A source of user-typed lines.
pub trait InputSource {
    /// Block until a line arrives or the user cancels.
    fn read_line(&mut self) -> Prompted;
}

/// Errors setting up terminal input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to install interrupt handler: {0}")]
    Handler(#[from] ctrlc::Error),

    #[error("failed to start stdin reader: {0}")]
    Reader(#[from] std::io::Error),
}

enum InputEvent {
    Line(String),
    Closed,
    Interrupted,
}

/// Line input from stdin that can be cancelled with Ctrl-C.
///
/// A background reader forwards stdin lines into a channel and the Ctrl-C
/// handler posts into the same channel, so a pending read returns as soon as
/// either arrives. The handler can only be installed once per process.
pub struct TerminalInput {
    events: Receiver<InputEvent>,
    interrupted: Arc<AtomicBool>,
    cancelled: bool,
}

impl TerminalInput {
    /// Install the interrupt handler and start reading stdin.
    pub fn install() -> Result<Self, InputError> {
        let (tx, rx) = mpsc::channel();
        let interrupted = Arc::new(AtomicBool::new(false));

        let handler_tx = tx.clone();
        let handler_flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
            let _ = handler_tx.send(InputEvent::Interrupted);
        })?;

        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || pump_stdin(tx))?;

        Ok(Self {
            events: rx,
            interrupted,
            cancelled: false,
        })
    }

    /// Flag raised by Ctrl-C, for long-running work to poll.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }
}

fn pump_stdin(tx: Sender<InputEvent>) {
    let stdin = std::io::stdin();
    let mut lock = stdin.lock();
    loop {
        let mut line = String::new();
        let event = match lock.read_line(&mut line) {
            Ok(0) => InputEvent::Closed,
            Ok(_) => InputEvent::Line(trim_newline(line)),
            Err(e) => {
                tracing::debug!(error = %e, "stdin read failed");
                InputEvent::Closed
            }
        };
        let closed = matches!(event, InputEvent::Closed);
        if tx.send(event).is_err() || closed {
            return;
        }
    }
}

fn trim_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

impl InputSource for TerminalInput {
    fn read_line(&mut self) -> Prompted {
        if self.cancelled || self.interrupted.load(Ordering::SeqCst) {
            return Prompted::Cancelled;
        }
        match self.events.recv() {
            Ok(InputEvent::Line(line)) => Prompted::Line(line),
            Ok(InputEvent::Closed) | Ok(InputEvent::Interrupted) | Err(_) => {
                self.cancelled = true;
                Prompted::Cancelled
            }
        }
    }
}

/// Replays a fixed list of lines, then reports cancellation.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> Prompted {
        match self.lines.pop_front() {
            Some(line) => Prompted::Line(line),
            None => Prompted::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_then_cancel() {
        let mut input = ScriptedInput::new(["1", "two"]);
        assert_eq!(input.read_line(), Prompted::Line("1".into()));
        assert_eq!(input.remaining(), 1);
        assert_eq!(input.read_line(), Prompted::Line("two".into()));
        assert_eq!(input.read_line(), Prompted::Cancelled);
        assert_eq!(input.read_line(), Prompted::Cancelled);
    }

    #[test]
    fn test_trim_newline() {
        assert_eq!(trim_newline("abc\n".into()), "abc");
        assert_eq!(trim_newline("abc\r\n".into()), "abc");
        assert_eq!(trim_newline("abc".into()), "abc");
        assert_eq!(trim_newline(" x \n".into()), " x ");
    }
}
