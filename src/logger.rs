//! Kernel Console Logger
//!
//! Bridges the `log` facade onto whatever console sink the embedding
//! kernel provides. The sink is a plain function so it can point straight
//! at a UART write routine; a spinlock serializes concurrent log lines the
//! same way the console global itself is guarded.
//!
//! Install once during kernel init:
//!
//! ```ignore
//! margay_syscall::logger::init(uart_write_str);
//! ```

use core::fmt::{self, Write};

use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;

/// Console output hook supplied by the embedding kernel.
pub type Sink = fn(&str);

static SINK: Mutex<Option<Sink>> = Mutex::new(None);

struct KernelLogger;

static LOGGER: KernelLogger = KernelLogger;

impl Log for KernelLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let guard = SINK.lock();
        if let Some(sink) = *guard {
            let mut out = SinkWriter { sink };
            let _ = writeln!(out, "[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

struct SinkWriter {
    sink: Sink,
}

impl fmt::Write for SinkWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        (self.sink)(s);
        Ok(())
    }
}

/// Install the console logger. Call once during kernel initialization,
/// before the first trap can log. A second call just swaps the sink.
pub fn init(sink: Sink) {
    *SINK.lock() = Some(sink);
    // Already-installed is fine; the facade keeps the first registration.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
}

#[cfg(test)]
mod tests {
    use super::*;

    static CAPTURED: Mutex<String> = Mutex::new(String::new());

    fn capture(s: &str) {
        CAPTURED.lock().push_str(s);
    }

    #[test]
    fn formats_level_and_message() {
        init(capture);
        log::warn!("boundary breach at {:#010x}", 0xC000_0000u32);
        let captured = CAPTURED.lock();
        assert!(captured.contains("[WARN] boundary breach at 0xc0000000"));
    }

    #[test]
    fn init_twice_keeps_logging() {
        init(capture);
        init(capture);
        log::info!("still alive");
        assert!(CAPTURED.lock().contains("still alive"));
    }
}
