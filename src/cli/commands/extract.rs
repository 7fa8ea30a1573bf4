use std::path::PathBuf;

use anyhow::Result;

use super::super::{args::ExtractCommand, exit_status::ExitStatus, report};
use crate::{
    config::{CONFIG_FILE_NAME, ConfigLoadResult, load_config},
    core,
};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));

    let ConfigLoadResult {
        mut config,
        from_file,
        root_dir,
    } = load_config(&root)?;

    // In verbose mode, inform user if using default config
    if args.verbose && !from_file {
        eprintln!(
            "Note: No {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }

    args.apply_to(&mut config);
    let options = config.resolve(&root_dir)?;

    let result = core::extract(&options, args.verbose)?;
    report::print(&result, args.verbose);

    Ok(ExitStatus::Success)
}
