mod commands;
mod config;
mod logging;

use crate::commands::Conlog;
use clap::Parser;
use std::{io::IsTerminal, process::ExitCode};
use yansi::Paint;

fn main() -> ExitCode {
    let conlog = Conlog::parse();

    match conlog.run() {
        Err(err) => {
            let root = err.root_cause();
            let message = format!("Error: {}\n\nCaused by:\n  {}", err, root);

            if std::io::stderr().is_terminal() {
                eprintln!("{}", message.red());
            } else {
                eprintln!("{}", message);
            }
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::from(0),
    }
}
