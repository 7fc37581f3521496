//! `tracing` output to the browser console

use std::io;

use tracing::Level;

/// Writer forwarding each formatted event to `console.log`
struct ConsoleWriter;

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        let line = line.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&line.into());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install the global subscriber. Later calls keep the first subscriber.
pub fn init(level: Level) {
    // No timestamps: the wasm target has no system clock
    let _ = tracing_subscriber::fmt()
        .with_writer(|| ConsoleWriter)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init();
}
