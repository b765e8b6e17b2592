use std::path::PathBuf;

use eyre::Context;
use log::{LevelFilter, Log};

use super::{
    formatters::DefaultFormatter,
    sinks::{FileSink, NullSink, StderrSink},
    LogFormatter, LogSink,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub enabled: bool,
    pub datetime_format: String,
    pub use_ansi: bool,
    pub max_file_size: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            enabled: true,
            datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
            use_ansi: true,
            max_file_size: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Logger {
    filter: LevelFilter,
    sink: Box<dyn LogSink>,
    config: Config,
}

impl Logger {
    pub fn new(filter: LevelFilter, sink: Box<dyn LogSink>, config: Config) -> Self {
        Self {
            filter,
            sink,
            config,
        }
    }

    pub fn init(self) -> eyre::Result<()> {
        log::set_max_level(self.filter);
        log::set_boxed_logger(Box::new(self)).context("Failed registering boxed logger")?;

        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.config.enabled && self.filter >= metadata.level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            // Nowhere left to report to but the terminal.
            if let Err(err) = self.sink.write_log(record) {
                eprintln!("conlog: failed writing diagnostic log: {:#}", err);
            }
        }
    }

    fn flush(&self) {
        if let Err(err) = self.sink.flush() {
            eprintln!("conlog: failed flushing diagnostic log: {:#}", err);
        }
    }
}

type SinkConstructor =
    Box<dyn Fn(Box<dyn LogFormatter + 'static>, &Config) -> eyre::Result<Box<dyn LogSink + 'static>>>;

pub struct Builder {
    filter: LevelFilter,
    constructor: SinkConstructor,
    formatter_builder: Box<dyn Fn(Config) -> Box<dyn LogFormatter + 'static>>,
    config: Config,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            filter: LevelFilter::Off,
            constructor: Box::new(|_, _| Ok(Box::new(NullSink::new()))),
            formatter_builder: Box::new(|config| Box::new(DefaultFormatter::new(config))),
            config: Config::new(),
        }
    }

    pub fn with_level(self, filter: LevelFilter) -> Self {
        Self { filter, ..self }
    }

    pub fn with_ansi(mut self, use_ansi: bool) -> Self {
        self.config.use_ansi = use_ansi;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = Some(bytes);
        self
    }

    pub fn with_file_sink(self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        Self {
            constructor: Box::new(move |formatter, config| {
                let sink = FileSink::new(&path, formatter, config.max_file_size)?;
                Ok(Box::new(sink))
            }),
            ..self
        }
    }

    pub fn with_stderr_sink(self) -> Self {
        Self {
            constructor: Box::new(move |formatter, _| {
                let sink = StderrSink::new(formatter);
                Ok(Box::new(sink))
            }),
            ..self
        }
    }

    pub fn build(&self) -> eyre::Result<Logger> {
        let formatter = (self.formatter_builder)(self.config.clone());
        let sink = (self.constructor)(formatter, &self.config)?;
        Ok(Logger::new(self.filter, sink, self.config.clone()))
    }
}
