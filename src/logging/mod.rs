mod formatters;
mod logger;
mod sinks;

pub use logger::Builder;

/// Only records logged against this target reach the diagnostic log.
pub const TARGET: &str = "conlog";

pub trait LogFormatter: Sync + Send {
    fn format(&self, record: &log::Record) -> String;
}

pub trait LogSink: Sync + Send {
    fn write_log(&self, record: &log::Record) -> eyre::Result<()>;
    fn flush(&self) -> eyre::Result<()>;
}
