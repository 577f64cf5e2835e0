//! Routing `tracing` events to the browser console

use std::io;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

/// Buffers one formatted event and hands it to `console.log` when dropped
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    buffer: Vec<u8>,
}
impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if !line.is_empty() {
            leptos::logging::console_log(line);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;
impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::default()
    }
}

/// Install the browser subscriber. Does nothing if one is already installed.
pub fn init() {
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(MakeConsoleWriter)
        .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG);
    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        leptos::logging::console_warn("tracing was already initialized");
    }
}
