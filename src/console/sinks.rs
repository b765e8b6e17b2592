use std::{
    fs::File,
    io::{IsTerminal, LineWriter, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use super::Sink;
use crate::error::Result;

pub struct StdoutSink {
    handle: std::io::Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            handle: std::io::stdout(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdoutSink {
    fn write_str(&self, text: &str) -> Result<()> {
        let mut writer = self.handle.lock();
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(self.handle.lock().flush()?)
    }

    fn is_terminal(&self) -> bool {
        self.handle.is_terminal()
    }
}

pub struct StderrSink {
    handle: std::io::Stderr,
}

impl StderrSink {
    pub fn new() -> Self {
        Self {
            handle: std::io::stderr(),
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StderrSink {
    fn write_str(&self, text: &str) -> Result<()> {
        let mut writer = self.handle.lock();
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(self.handle.lock().flush()?)
    }

    fn is_terminal(&self) -> bool {
        self.handle.is_terminal()
    }
}

/// File-backed write stream.
pub struct FileSink {
    file: Mutex<LineWriter<File>>,
    file_path: PathBuf,
}

impl FileSink {
    /// Open `path` for writing. The file is created if missing, and either
    /// truncated or appended to.
    pub fn open(path: impl AsRef<Path>, append: bool) -> Result<Self> {
        let path = path.as_ref();
        let mut options = std::fs::OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let file = options.open(path)?;

        Ok(Self {
            file: Mutex::new(LineWriter::new(file)),
            file_path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Current size of the file on disk, after flushing buffered lines.
    pub fn len(&self) -> Result<u64> {
        let mut file = self.file.lock()?;
        file.flush()?;
        Ok(file.get_ref().metadata()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Move the current file to `<path>.old` (or `.old1`, `.old2`, ... when
    /// taken) and continue writing to a fresh file at `path`.
    pub fn rotate(&self) -> Result<PathBuf> {
        let mut file = self.file.lock()?;
        file.flush()?;

        let base = self.file_path.as_os_str().to_string_lossy().to_string();
        let mut new_path = PathBuf::from(format!("{}.old", base));
        let mut counter = 1;
        while new_path.exists() {
            new_path = PathBuf::from(format!("{}.old{}", base, counter));
            counter += 1;
        }

        std::fs::rename(&self.file_path, &new_path)?;
        *file = LineWriter::new(File::create(&self.file_path)?);
        Ok(new_path)
    }
}

/// Open a truncating file write stream at `path`.
pub fn create_write_stream(path: impl AsRef<Path>) -> Result<FileSink> {
    FileSink::open(path, false)
}

impl Sink for FileSink {
    fn write_str(&self, text: &str) -> Result<()> {
        let mut file = self.file.lock()?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(self.file.lock()?.flush()?)
    }
}

/// Shared in-memory buffer. Clones write to the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|buffer| buffer.clone())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }
}

impl Sink for MemorySink {
    fn write_str(&self, text: &str) -> Result<()> {
        self.buffer.lock()?.push_str(text);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Adapts any `Write` implementation.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        Ok(self.writer.into_inner()?)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_str(&self, text: &str) -> Result<()> {
        self.writer.lock()?.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(self.writer.lock()?.flush()?)
    }
}

pub struct NullSink {}

impl NullSink {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for NullSink {
    fn write_str(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let other = sink.clone();
        other.write_str("a\n").unwrap();
        sink.write_str("b\n").unwrap();
        assert_eq!(sink.lines(), vec!["a", "b"]);
        sink.clear();
        assert_eq!(other.contents(), "");
    }

    #[test]
    fn writer_sink_propagates_errors() {
        let sink = WriterSink::new(Broken);
        assert!(sink.write_str("x").is_err());
    }

    #[test]
    fn writer_sink_collects() {
        let sink = WriterSink::new(Vec::<u8>::new());
        sink.write_str("hi").unwrap();
        assert_eq!(sink.into_inner().unwrap(), b"hi");
    }

    #[test]
    fn file_sink_truncates_or_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");

        let sink = create_write_stream(&path).unwrap();
        sink.write_str("first\n").unwrap();
        drop(sink);

        let sink = FileSink::open(&path, true).unwrap();
        sink.write_str("second\n").unwrap();
        drop(sink);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");

        let sink = create_write_stream(&path).unwrap();
        sink.write_str("third\n").unwrap();
        drop(sink);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "third\n");
    }

    #[test]
    fn file_sink_rotates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let sink = create_write_stream(&path).unwrap();
        sink.write_str("old line\n").unwrap();
        let rotated = sink.rotate().unwrap();
        sink.write_str("new line\n").unwrap();
        sink.flush().unwrap();

        assert_eq!(rotated, dir.path().join("app.log.old"));
        assert_eq!(std::fs::read_to_string(&rotated).unwrap(), "old line\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new line\n");

        let again = sink.rotate().unwrap();
        assert_eq!(again, dir.path().join("app.log.old1"));
    }

    #[test]
    fn file_sink_open_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.log");
        assert!(create_write_stream(path).is_err());
    }
}
