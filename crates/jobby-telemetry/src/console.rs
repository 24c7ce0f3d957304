//! Browser console sink for the fmt layer.
//!
//! Each formatted event is written with the console method matching its
//! level, so warnings and errors keep their severity in the devtools.

use tracing::Level;

#[cfg(target_arch = "wasm32")]
pub(crate) use sink::ConsoleMakeWriter;

/// Console method an event is written with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleLevel {
    /// `console.error`.
    Error,
    /// `console.warn`.
    Warn,
    /// `console.info`.
    Info,
    /// `console.debug`.
    Debug,
}

impl ConsoleLevel {
    /// Console method for events at `level`; trace shares the debug method.
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod sink {
    use std::io::{self, Write};

    use tracing::Metadata;
    use tracing_subscriber::fmt::MakeWriter;

    use super::ConsoleLevel;

    /// Buffers one formatted event and forwards it to the console when dropped.
    pub(crate) struct ConsoleWriter {
        level: ConsoleLevel,
        buffer: Vec<u8>,
    }

    impl Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            if self.buffer.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
            match self.level {
                ConsoleLevel::Error => gloo::console::error!(line),
                ConsoleLevel::Warn => gloo::console::warn!(line),
                ConsoleLevel::Info => gloo::console::info!(line),
                ConsoleLevel::Debug => gloo::console::debug!(line),
            }
        }
    }

    /// Hands the fmt layer a writer bound to the event's level.
    #[derive(Clone, Copy, Debug, Default)]
    pub(crate) struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: ConsoleLevel::Info,
                buffer: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: ConsoleLevel::for_level(*meta.level()),
                buffer: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_and_errors_keep_their_console_method() {
        assert_eq!(ConsoleLevel::for_level(Level::ERROR), ConsoleLevel::Error);
        assert_eq!(ConsoleLevel::for_level(Level::WARN), ConsoleLevel::Warn);
        assert_eq!(ConsoleLevel::for_level(Level::INFO), ConsoleLevel::Info);
        assert_eq!(ConsoleLevel::for_level(Level::DEBUG), ConsoleLevel::Debug);
        assert_eq!(ConsoleLevel::for_level(Level::TRACE), ConsoleLevel::Debug);
    }
}
