use clap::Args;
use conlog::format_values;

use super::parse_values;

/// Print the formatted string without going through the console sinks.
#[derive(Args, Debug)]
pub struct Cmd {
    #[arg(value_name = "VALUES", allow_negative_numbers = true)]
    pub values: Vec<String>,
}

impl Cmd {
    pub fn run(&self, raw: bool) -> eyre::Result<()> {
        let formatted = format_values(&parse_values(&self.values, raw));
        println!("{}", formatted);
        Ok(())
    }
}
