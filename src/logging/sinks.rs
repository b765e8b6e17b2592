use std::path::Path;

use conlog::{sinks, Sink};
use eyre::Context;

use super::{LogFormatter, LogSink, TARGET};

pub struct FileSink {
    stream: sinks::FileSink,
    formatter: Box<dyn LogFormatter>,
    max_file_size: Option<u64>,
}

impl FileSink {
    pub fn new(
        path: impl AsRef<Path>,
        formatter: Box<dyn LogFormatter>,
        max_file_size: Option<u64>,
    ) -> eyre::Result<Self> {
        let path = path.as_ref();
        let stream = sinks::FileSink::open(path, true)
            .with_context(|| format!("Failed opening or creating log file {}", path.display()))?;

        Ok(Self {
            stream,
            formatter,
            max_file_size,
        })
    }

    fn rotate_if_exceeds_max_file_size(&self) -> eyre::Result<()> {
        let Some(max) = self.max_file_size else {
            return Ok(());
        };

        if self.stream.len()? > max {
            self.stream
                .rotate()
                .with_context(|| format!("Failed rotating {}", self.stream.path().display()))?;
        }
        Ok(())
    }
}

impl LogSink for FileSink {
    fn write_log(&self, record: &log::Record) -> eyre::Result<()> {
        if record.target() != TARGET {
            return Ok(());
        }

        self.rotate_if_exceeds_max_file_size()?;

        let mut line = self.formatter.format(record);
        line.push('\n');
        self.stream.write_str(&line)?;
        self.stream.flush().context("Can't flush file")
    }

    fn flush(&self) -> eyre::Result<()> {
        Ok(self.stream.flush()?)
    }
}

pub struct StderrSink {
    stream: sinks::StderrSink,
    formatter: Box<dyn LogFormatter>,
}

impl StderrSink {
    pub fn new(formatter: Box<dyn LogFormatter>) -> Self {
        Self {
            stream: sinks::StderrSink::new(),
            formatter,
        }
    }
}

impl LogSink for StderrSink {
    fn write_log(&self, record: &log::Record) -> eyre::Result<()> {
        if record.target() != TARGET {
            return Ok(());
        }

        let mut line = self.formatter.format(record);
        line.push('\n');
        Ok(self.stream.write_str(&line)?)
    }

    fn flush(&self) -> eyre::Result<()> {
        Ok(self.stream.flush()?)
    }
}

pub struct NullSink {}

impl NullSink {
    pub fn new() -> Self {
        Self {}
    }
}

impl LogSink for NullSink {
    fn write_log(&self, _record: &log::Record) -> eyre::Result<()> {
        Ok(())
    }

    fn flush(&self) -> eyre::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl LogFormatter for Bare {
        fn format(&self, record: &log::Record) -> String {
            record.args().to_string()
        }
    }

    fn record_line(sink: &FileSink, text: &str) {
        sink.write_log(
            &log::Record::builder()
                .args(format_args!("{}", text))
                .level(log::Level::Info)
                .target(TARGET)
                .build(),
        )
        .unwrap();
    }

    #[test]
    fn rotates_past_max_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conlog.log");
        let sink = FileSink::new(&path, Box::new(Bare), Some(8)).unwrap();

        record_line(&sink, "0123456789");
        record_line(&sink, "after");

        let rotated = dir.path().join("conlog.log.old");
        assert_eq!(std::fs::read_to_string(rotated).unwrap(), "0123456789\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "after\n");
    }

    #[test]
    fn without_max_size_never_rotates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conlog.log");
        let sink = FileSink::new(&path, Box::new(Bare), None).unwrap();

        record_line(&sink, "one");
        record_line(&sink, "two");

        assert!(!dir.path().join("conlog.log.old").exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
