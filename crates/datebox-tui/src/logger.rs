/// In-memory logger so log output never draws over the terminal UI.
/// Captured lines are shown in the application logs panel.
use datebox_core::get_datebox_setting;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

/// A log entry with timestamp and formatted message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn format(&self) -> String {
        format!(
            "[{}] {:<5} {}: {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Bounded, thread-safe log buffer; the oldest line goes first when full
#[derive(Clone)]
pub struct LogBuffer {
    logs: Arc<RwLock<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            logs: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Buffer sized by `DATEBOX_LOG_BUFFER_LINES`
    pub fn from_env() -> Self {
        Self::new(get_datebox_setting!(DATEBOX_LOG_BUFFER_LINES, usize))
    }

    pub fn add_log(&self, entry: LogEntry) {
        // a poisoned lock only means a writer panicked mid-push; keep logging
        let mut logs = self.logs.write().unwrap_or_else(|e| e.into_inner());
        if logs.len() >= self.capacity {
            logs.pop_front();
        }
        logs.push_back(entry);
    }

    pub fn get_logs(&self) -> Vec<String> {
        self.logs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(LogEntry::format)
            .collect()
    }
}

/// Logger that writes to a [`LogBuffer`]
pub struct BufferedLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl BufferedLogger {
    pub fn new(buffer: LogBuffer, level: LevelFilter) -> Self {
        Self { buffer, level }
    }
}

impl log::Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.add_log(LogEntry {
                timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
                level: record.level(),
                target: record.target().to_string(),
                message: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {}
}

/// Install the buffered logger globally and return the buffer for reading
pub fn init_memory_logger(level: LevelFilter) -> Result<LogBuffer, SetLoggerError> {
    let buffer = LogBuffer::from_env();
    log::set_boxed_logger(Box::new(BufferedLogger::new(buffer.clone(), level)))?;
    log::set_max_level(level);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "12:00:00.000".to_string(),
            level: Level::Info,
            target: "datebox".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_buffer_drops_oldest_when_full() {
        let buffer = LogBuffer::new(2);
        buffer.add_log(entry("one"));
        buffer.add_log(entry("two"));
        buffer.add_log(entry("three"));

        let logs = buffer.get_logs();
        assert_eq!(logs.len(), 2);
        assert!(logs[0].ends_with("two"));
        assert!(logs[1].ends_with("three"));
    }

    #[test]
    fn test_entry_format() {
        assert_eq!(
            entry("hello").format(),
            "[12:00:00.000] INFO  datebox: hello"
        );
    }

    #[test]
    fn test_logger_respects_level() {
        let buffer = LogBuffer::new(10);
        let logger = BufferedLogger::new(buffer.clone(), LevelFilter::Info);

        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("t")
                .args(format_args!("hidden"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("t")
                .args(format_args!("shown"))
                .build(),
        );

        let logs = buffer.get_logs();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("WARN"));
        assert!(logs[0].ends_with("t: shown"));
    }
}
