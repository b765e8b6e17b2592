use std::path::PathBuf;

use super::{
    sinks::{FileSink, StderrSink, StdoutSink},
    ColorMode, Console, Sink,
};
use crate::error::Result;

type SinkConstructor = Box<dyn FnOnce() -> Result<Box<dyn Sink>>>;

/// Assembles a [`Console`]. Sinks that are not set fall back to the process
/// standard streams. File sinks are opened in [`Builder::build`], so open
/// errors surface there.
pub struct Builder {
    stdout: SinkConstructor,
    stderr: SinkConstructor,
    color_mode: ColorMode,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            stdout: Box::new(|| -> Result<Box<dyn Sink>> { Ok(Box::new(StdoutSink::new())) }),
            stderr: Box::new(|| -> Result<Box<dyn Sink>> { Ok(Box::new(StderrSink::new())) }),
            color_mode: ColorMode::Auto,
        }
    }

    pub fn with_color_mode(self, color_mode: ColorMode) -> Self {
        Self { color_mode, ..self }
    }

    pub fn with_stdout(self, sink: impl Sink + 'static) -> Self {
        Self {
            stdout: Box::new(move || -> Result<Box<dyn Sink>> { Ok(Box::new(sink)) }),
            ..self
        }
    }

    pub fn with_stderr(self, sink: impl Sink + 'static) -> Self {
        Self {
            stderr: Box::new(move || -> Result<Box<dyn Sink>> { Ok(Box::new(sink)) }),
            ..self
        }
    }

    pub fn with_stdout_file(self, path: impl Into<PathBuf>, append: bool) -> Self {
        let path: PathBuf = path.into();
        Self {
            stdout: Box::new(move || -> Result<Box<dyn Sink>> {
                Ok(Box::new(FileSink::open(path, append)?))
            }),
            ..self
        }
    }

    pub fn with_stderr_file(self, path: impl Into<PathBuf>, append: bool) -> Self {
        let path: PathBuf = path.into();
        Self {
            stderr: Box::new(move || -> Result<Box<dyn Sink>> {
                Ok(Box::new(FileSink::open(path, append)?))
            }),
            ..self
        }
    }

    pub fn build(self) -> Result<Console> {
        let stdout = (self.stdout)()?;
        let stderr = (self.stderr)()?;
        Ok(Console::new(stdout, stderr, self.color_mode))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
