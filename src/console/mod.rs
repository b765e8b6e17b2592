//! `Console`: formatting plus dispatch to an output and an error sink.

mod builder;
pub mod sinks;

use std::{ffi::OsStr, str::FromStr};

pub use builder::Builder;

use crate::{
    error::{ConsoleError, Result},
    format::format_values_with,
    inspect::{inspect_with, InspectOptions},
    value::Value,
};

use self::sinks::{StderrSink, StdoutSink};

pub trait Sink: Send + Sync {
    fn write_str(&self, text: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;

    /// Whether the sink is attached to a terminal. Only consulted for
    /// `ColorMode::Auto`.
    fn is_terminal(&self) -> bool {
        false
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_str(&self, text: &str) -> Result<()> {
        (**self).write_str(text)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }
}

/// Whether inspected values get ANSI styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Style when the sink is a terminal and the environment allows it.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_terminal && env_allows_color(),
        }
    }
}

impl From<bool> for ColorMode {
    fn from(value: bool) -> Self {
        if value {
            ColorMode::Always
        } else {
            ColorMode::Never
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" | "true" => Ok(ColorMode::Always),
            "never" | "false" => Ok(ColorMode::Never),
            other => Err(ConsoleError::Other(format!("invalid color mode '{}'", other))),
        }
    }
}

fn env_allows_color() -> bool {
    colors_allowed(
        std::env::var_os("NO_COLOR").as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

/// `NO_COLOR` set to anything non-empty, or `TERM=dumb`, turns colors off.
fn colors_allowed(no_color: Option<&OsStr>, term: Option<&str>) -> bool {
    if no_color.is_some_and(|v| !v.is_empty()) {
        return false;
    }
    term != Some("dumb")
}

pub struct Console {
    stdout: Box<dyn Sink>,
    stderr: Box<dyn Sink>,
    color_mode: ColorMode,
}

impl Console {
    pub fn new(stdout: Box<dyn Sink>, stderr: Box<dyn Sink>, color_mode: ColorMode) -> Self {
        Self {
            stdout,
            stderr,
            color_mode,
        }
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn log(&self, args: &[Value]) -> Result<()> {
        Self::write_line(&*self.stdout, self.color_mode, args)
    }

    pub fn info(&self, args: &[Value]) -> Result<()> {
        self.log(args)
    }

    pub fn debug(&self, args: &[Value]) -> Result<()> {
        self.log(args)
    }

    pub fn error(&self, args: &[Value]) -> Result<()> {
        Self::write_line(&*self.stderr, self.color_mode, args)
    }

    pub fn warn(&self, args: &[Value]) -> Result<()> {
        self.error(args)
    }

    /// Write to the error sink when `condition` is falsy. Never fails on
    /// its own; only a sink error is returned.
    pub fn assert(&self, condition: impl Into<Value>, args: &[Value]) -> Result<()> {
        if condition.into().is_truthy() {
            return Ok(());
        }

        const MARKER: &str = "Assertion failed";
        let options = self.options_for(&*self.stderr);
        let line = match args.first() {
            None => format!("{}\n", MARKER),
            Some(Value::String(_)) => {
                format!("{}: {}\n", MARKER, format_values_with(options, args))
            }
            Some(_) => format!("{} {}\n", MARKER, format_values_with(options, args)),
        };

        self.stderr.write_str(&line)
    }

    /// Write the inspected form of a single value to the output sink.
    pub fn dir(&self, value: &Value) -> Result<()> {
        let options = self.options_for(&*self.stdout);
        let mut line = inspect_with(value, options);
        line.push('\n');
        self.stdout.write_str(&line)
    }

    pub fn flush(&self) -> Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }

    fn options_for(&self, sink: &dyn Sink) -> InspectOptions {
        InspectOptions::colored(self.color_mode.resolve(sink.is_terminal()))
    }

    fn write_line(sink: &dyn Sink, color_mode: ColorMode, args: &[Value]) -> Result<()> {
        let options = InspectOptions::colored(color_mode.resolve(sink.is_terminal()));
        let mut line = format_values_with(options, args);
        line.push('\n');
        sink.write_str(&line)
    }
}

impl Default for Console {
    /// The process console: stdout and stderr, automatic colors.
    fn default() -> Self {
        Self::new(
            Box::new(StdoutSink::new()),
            Box::new(StderrSink::new()),
            ColorMode::Auto,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::sinks::MemorySink;
    use super::*;
    use crate::values;

    fn console() -> (Console, MemorySink, MemorySink) {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let console = Console::new(
            Box::new(out.clone()),
            Box::new(err.clone()),
            ColorMode::Never,
        );
        (console, out, err)
    }

    #[test]
    fn log_and_error_pick_their_sink() {
        let (console, out, err) = console();
        console.log(&values!["hello %s!", "world"]).unwrap();
        console.info(&values!["info"]).unwrap();
        console.error(&values!["error logged"]).unwrap();
        console.warn(&values!["careful"]).unwrap();

        assert_eq!(out.contents(), "hello world!\ninfo\n");
        assert_eq!(err.contents(), "error logged\ncareful\n");
    }

    #[test]
    fn assert_writes_only_when_falsy() {
        let (console, out, err) = console();
        console.assert(false, &[]).unwrap();
        console.assert(false, &values!["assert failed"]).unwrap();
        console.assert(true, &values!["not printed"]).unwrap();
        console.assert(0, &values![1, 2]).unwrap();
        console.assert("", &values!["%s!", "empty"]).unwrap();

        assert_eq!(out.contents(), "");
        assert_eq!(
            err.lines(),
            vec![
                "Assertion failed",
                "Assertion failed: assert failed",
                "Assertion failed 1 2",
                "Assertion failed: empty!",
            ]
        );
    }

    #[test]
    fn dir_inspects() {
        let (console, out, _) = console();
        console.dir(&Value::from("x")).unwrap();
        assert_eq!(out.contents(), "'x'\n");
    }

    #[test]
    fn empty_log_writes_newline() {
        let (console, out, _) = console();
        console.log(&[]).unwrap();
        assert_eq!(out.contents(), "\n");
    }

    #[test]
    fn color_mode_parsing() {
        assert_eq!("auto".parse::<ColorMode>().unwrap(), ColorMode::Auto);
        assert_eq!("false".parse::<ColorMode>().unwrap(), ColorMode::Never);
        assert!("sometimes".parse::<ColorMode>().is_err());
        assert!(ColorMode::Always.resolve(false));
        assert!(!ColorMode::Auto.resolve(false));
    }

    /// Accepts every write until `limit` writes have succeeded.
    struct FlakySink {
        inner: MemorySink,
        limit: usize,
        writes: Mutex<usize>,
    }

    impl FlakySink {
        fn new(inner: MemorySink, limit: usize) -> Self {
            Self {
                inner,
                limit,
                writes: Mutex::new(0),
            }
        }
    }

    impl Sink for FlakySink {
        fn write_str(&self, text: &str) -> Result<()> {
            let mut writes = self.writes.lock()?;
            if *writes >= self.limit {
                return Err(std::io::Error::other("sink closed").into());
            }
            *writes += 1;
            self.inner.write_str(text)
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn lines_are_written_whole() {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let console = Console::new(
            Box::new(FlakySink::new(out.clone(), 1)),
            Box::new(FlakySink::new(err.clone(), 1)),
            ColorMode::Never,
        );

        console.assert(false, &values!["x"]).unwrap();
        console.dir(&Value::from(1)).unwrap();
        assert!(console.assert(false, &values!["y"]).is_err());
        assert!(console.dir(&Value::from(2)).is_err());

        assert_eq!(err.contents(), "Assertion failed: x\n");
        assert_eq!(out.contents(), "1\n");
    }

    struct TerminalSink(MemorySink);

    impl Sink for TerminalSink {
        fn write_str(&self, text: &str) -> Result<()> {
            self.0.write_str(text)
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn is_terminal(&self) -> bool {
            true
        }
    }

    #[test]
    fn auto_colors_respect_environment() {
        assert!(colors_allowed(None, None));
        assert!(colors_allowed(None, Some("xterm-256color")));
        assert!(colors_allowed(Some(OsStr::new("")), Some("xterm")));
        assert!(!colors_allowed(Some(OsStr::new("1")), Some("xterm")));
        assert!(!colors_allowed(None, Some("dumb")));
    }

    #[test]
    fn auto_colors_on_terminal_sink() {
        let out = MemorySink::new();
        let console = Console::new(
            Box::new(TerminalSink(out.clone())),
            Box::new(MemorySink::new()),
            ColorMode::Auto,
        );
        console.log(&values![42]).unwrap();

        let colored = out.contents().contains("\x1b[");
        assert_eq!(colored, env_allows_color());
        assert!(ColorMode::Auto.resolve(true) == env_allows_color());
    }
}
