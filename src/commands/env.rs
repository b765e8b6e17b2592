use clap::{Args, CommandFactory};
use conlog::{values, Console};

use crate::{
    commands::Conlog,
    config::{data_dir, ConfigManager},
};

/// Show version, data and log locations.
#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cmd {}

impl Cmd {
    pub fn run(&self, config: &impl ConfigManager, console: &Console) -> eyre::Result<()> {
        let version = Conlog::command()
            .get_version()
            .unwrap_or("")
            .to_string();
        let data = data_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        let logs = config.get_log_path().unwrap_or_default();

        console.log(&values!["Version:        %s", version])?;
        console.log(&values!["Data Dir:       %s", data])?;
        console.log(&values!["Logs:           %s", logs])?;
        console.log(&values!["Max Log Size:   %d bytes", config.max_log_size()])?;
        console.log(&values!["Color Mode:     %s", format!("{:?}", console.color_mode())])?;
        Ok(())
    }
}
