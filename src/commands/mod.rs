use std::{fmt::Display, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use conlog::{Builder as ConsoleBuilder, ColorMode, Console, Value};
use eyre::Context;
use log::LevelFilter;

use crate::{
    config::{ConfigManager, LocalConfigManager},
    logging,
};

mod assert;
mod env;
mod format;
mod print;
mod require;

#[derive(Subcommand, Debug)]
pub enum ConlogCmd {
    /// Format the values and write them to the output sink.
    Log(print::Cmd),

    /// Same as `log`.
    Info(print::Cmd),

    /// Same as `log`.
    Debug(print::Cmd),

    /// Format the values and write them to the error sink.
    Error(print::Cmd),

    /// Same as `error`.
    Warn(print::Cmd),

    /// Write the inspected form of a value to the output sink.
    Dir(print::DirCmd),

    Assert(assert::Cmd),

    Format(format::Cmd),

    Require(require::Cmd),

    Env(env::Cmd),
}

impl Display for ConlogCmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConlogCmd::Log(_) => write!(f, "log"),
            ConlogCmd::Info(_) => write!(f, "info"),
            ConlogCmd::Debug(_) => write!(f, "debug"),
            ConlogCmd::Error(_) => write!(f, "error"),
            ConlogCmd::Warn(_) => write!(f, "warn"),
            ConlogCmd::Dir(_) => write!(f, "dir"),
            ConlogCmd::Assert(_) => write!(f, "assert"),
            ConlogCmd::Format(_) => write!(f, "format"),
            ConlogCmd::Require(cmd) => write!(f, "require {}", cmd.id),
            ConlogCmd::Env(_) => write!(f, "env"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => ColorMode::Auto,
            ColorChoice::Always => ColorMode::Always,
            ColorChoice::Never => ColorMode::Never,
        }
    }
}

#[derive(Parser)]
#[command(version, long_version = "")]
#[command(about = "Console logging with printf-style formatting and pluggable sinks.", long_about = None, disable_help_subcommand = true)]
pub struct Conlog {
    #[arg(
        global = true,
        long,
        value_name = "PATH",
        help = "Write console output to this file instead of stdout.",
        display_order = 0
    )]
    pub stdout: Option<PathBuf>,

    #[arg(
        global = true,
        long,
        value_name = "PATH",
        help = "Write console errors to this file instead of stderr.",
        display_order = 0
    )]
    pub stderr: Option<PathBuf>,

    #[arg(
        global = true,
        long,
        help = "Append to --stdout/--stderr files instead of truncating them.",
        display_order = 1
    )]
    pub append: bool,

    #[arg(
        global = true,
        long,
        value_enum,
        default_value_t = ColorChoice::Auto,
        help = "Style inspected values with ANSI colors.",
        display_order = 1
    )]
    pub color: ColorChoice,

    #[arg(
        global = true,
        long,
        help = "Treat every argument as a string instead of parsing numbers, null, JSON, ...",
        display_order = 2
    )]
    pub raw: bool,

    #[arg(
        global = true,
        long,
        help = "Write diagnostic messages to stderr instead of the log file.",
        display_order = 998
    )]
    pub log_to_stderr: bool,

    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        global = true,
        help = "Write verbose diagnostic messages for debugging.",
        display_order = 999
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: ConlogCmd,
}

impl Conlog {
    fn log_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            5 => LevelFilter::Trace,
            6_u8..=u8::MAX => LevelFilter::max(),
        }
    }

    fn setup_logging(&self, config: &LocalConfigManager) -> eyre::Result<()> {
        let filter = self.log_filter();
        let mut builder = logging::Builder::new().with_level(filter);

        if filter == LevelFilter::Off {
            return builder.build()?.init();
        }

        if self.log_to_stderr {
            builder = builder.with_stderr_sink();
        } else {
            let log_path = config
                .get_log_path()
                .context("Failed constructing file sink log path")?;

            if let Some(parent) = std::path::Path::new(&log_path).parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed creating {}", parent.display()))?;
            }

            builder = builder
                .with_ansi(false)
                .with_max_file_size(config.max_log_size())
                .with_file_sink(&log_path);
        }

        builder.build()?.init()
    }

    fn build_console(&self) -> eyre::Result<Console> {
        let mut builder = ConsoleBuilder::new().with_color_mode(self.color.into());

        if let Some(path) = &self.stdout {
            builder = builder.with_stdout_file(path, self.append);
        }

        if let Some(path) = &self.stderr {
            builder = builder.with_stderr_file(path, self.append);
        }

        builder.build().context("Failed opening console sinks")
    }

    pub fn run(self) -> eyre::Result<()> {
        let config = LocalConfigManager::new();
        self.setup_logging(&config)?;

        log::info!(target: "conlog", "conlog starting up");
        log::info!(target: "conlog", "running command {}", &self.cmd);
        log::trace!(target: "conlog", "log level: {}", self.log_filter());

        let result = self.invoke_sub_command(&config);

        if let Err(msg) = &result {
            log::error!(target: "conlog", "failed running command {}, error={} cause={}", &self.cmd, msg, msg.root_cause());
            log::error!(target: "conlog", "{:?}", msg);
        }

        log::logger().flush();
        result
    }

    fn invoke_sub_command<T>(&self, config: &T) -> eyre::Result<()>
    where
        T: ConfigManager,
    {
        let console = self.build_console()?;
        log::debug!(target: "conlog", "console color mode: {:?}", console.color_mode());

        let result = match &self.cmd {
            ConlogCmd::Log(cmd) => cmd.run(&console, print::Method::Log, self.raw),
            ConlogCmd::Info(cmd) => cmd.run(&console, print::Method::Info, self.raw),
            ConlogCmd::Debug(cmd) => cmd.run(&console, print::Method::Debug, self.raw),
            ConlogCmd::Error(cmd) => cmd.run(&console, print::Method::Error, self.raw),
            ConlogCmd::Warn(cmd) => cmd.run(&console, print::Method::Warn, self.raw),
            ConlogCmd::Dir(cmd) => cmd.run(&console, self.raw),
            ConlogCmd::Assert(cmd) => cmd.run(&console, self.raw),
            ConlogCmd::Format(cmd) => cmd.run(self.raw),
            ConlogCmd::Require(cmd) => cmd.run(&console),
            ConlogCmd::Env(cmd) => cmd.run(config, &console),
        };

        console.flush().context("Failed flushing console sinks")?;
        result
    }
}

/// Turn command line arguments into console values.
pub(crate) fn parse_values(args: &[String], raw: bool) -> Vec<Value> {
    args.iter()
        .map(|arg| {
            if raw {
                Value::from(arg)
            } else {
                Value::parse_arg(arg)
            }
        })
        .collect()
}
