use clap::Args;
use conlog::{Console, Value};
use eyre::Context;

use super::parse_values;

/// Write "Assertion failed" to the error sink when CONDITION is falsy.
#[derive(Args, Debug)]
pub struct Cmd {
    #[arg(
        allow_negative_numbers = true,
        help = "Parsed as a value: false, 0, \"\", null, undefined and NaN are falsy."
    )]
    pub condition: String,

    #[arg(value_name = "VALUES", allow_negative_numbers = true)]
    pub values: Vec<String>,
}

impl Cmd {
    pub fn run(&self, console: &Console, raw: bool) -> eyre::Result<()> {
        let condition = Value::parse_arg(&self.condition);
        log::debug!(target: "conlog", "assert condition {:?} truthy={}", condition, condition.is_truthy());

        console
            .assert(condition, &parse_values(&self.values, raw))
            .context("Failed writing assertion")
    }
}
