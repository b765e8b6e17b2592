use clap::Args;
use conlog::{
    module::builtins::{SquareClass, SQUARE_ID},
    values, Console, Export, Registry,
};
use eyre::Context;

/// Load a builtin module and report what its export slot holds.
#[derive(Args, Debug)]
pub struct Cmd {
    pub id: String,

    #[arg(long, default_value_t = 1.0, help = "Width of the Square built from the `square` module.")]
    pub width: f64,
}

impl Cmd {
    pub fn run(&self, console: &Console) -> eyre::Result<()> {
        let mut registry = Registry::with_builtins();
        log::debug!(target: "conlog", "defined modules: {:?}", registry.defined_ids());

        let export = registry
            .require(&self.id)
            .with_context(|| format!("Failed requiring '{}'", self.id))?;

        if self.id == SQUARE_ID {
            let class = export.expect_value::<SquareClass>(SQUARE_ID)?;
            let square = class.construct(self.width);
            console.log(&values!["new Square(%d).area() = %d", square.width, square.area()])?;
            return Ok(());
        }

        let id = self.id.as_str();
        match &export {
            Export::Namespace(ns) => {
                console.log(&values!["%s exports { %s }", id, ns.keys().join(", ")])?
            }
            Export::Value(_) => console.log(&values!["%s exports a value", id])?,
        }
        Ok(())
    }
}
