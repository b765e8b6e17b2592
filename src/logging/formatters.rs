use core::fmt;

use super::{logger::Config, LogFormatter};

const RESET: &str = "\x1b[0m";

pub struct DefaultFormatter {
    config: Config,
}

impl DefaultFormatter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.config.use_ansi {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn timestamp(&self) -> String {
        let time = chrono::Local::now().format(&self.config.datetime_format);
        self.paint("\x1b[0;90m", &format!("[{}]", time))
    }

    fn format_level(&self, level: log::Level) -> String {
        let (label, color) = match level {
            log::Level::Error => ("ERR", "\x1b[0;31m"),
            log::Level::Warn => ("WRN", "\x1b[0;33m"),
            log::Level::Info => ("INF", "\x1b[0;32m"),
            log::Level::Debug => ("DEB", "\x1b[0;34m"),
            log::Level::Trace => ("TRC", "\x1b[0;37m"),
        };
        self.paint(color, label)
    }

    fn format_msg(&self, args: &fmt::Arguments<'_>) -> String {
        self.paint("\x1b[0;1m", &args.to_string())
    }
}

impl LogFormatter for DefaultFormatter {
    fn format(&self, record: &log::Record) -> String {
        format!(
            "{} {}: {}",
            self.timestamp(),
            self.format_level(record.level()),
            self.format_msg(record.args()),
        )
    }
}
