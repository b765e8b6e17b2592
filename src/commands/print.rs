use clap::Args;
use conlog::{Console, Value};
use eyre::Context;

use super::parse_values;

#[derive(Debug, Clone, Copy)]
pub enum Method {
    Log,
    Info,
    Debug,
    Error,
    Warn,
}

#[derive(Args, Debug)]
pub struct Cmd {
    #[arg(
        value_name = "VALUES",
        allow_negative_numbers = true,
        help = "A printf-style template followed by its arguments, or plain values."
    )]
    pub values: Vec<String>,
}

impl Cmd {
    pub fn run(&self, console: &Console, method: Method, raw: bool) -> eyre::Result<()> {
        let values = parse_values(&self.values, raw);
        let result = match method {
            Method::Log => console.log(&values),
            Method::Info => console.info(&values),
            Method::Debug => console.debug(&values),
            Method::Error => console.error(&values),
            Method::Warn => console.warn(&values),
        };
        result.with_context(|| format!("Failed writing {:?} line", method))
    }
}

#[derive(Args, Debug)]
pub struct DirCmd {
    #[arg(allow_negative_numbers = true)]
    pub value: String,
}

impl DirCmd {
    pub fn run(&self, console: &Console, raw: bool) -> eyre::Result<()> {
        let value = if raw {
            Value::from(&self.value)
        } else {
            Value::parse_arg(&self.value)
        };
        console.dir(&value).context("Failed writing inspected value")
    }
}
