//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract translation keys from source files into asset files
//! - `init`: Initialize a `.speakrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Project root directory; the config file is searched from here upwards
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Supported language (overrides config file). Repeat for several:
    /// --lang en-US --lang it-IT
    #[arg(long = "lang", value_name = "TAG")]
    pub langs: Vec<String>,

    /// Assets directory, relative to the base path (overrides config file)
    #[arg(long)]
    pub assets_path: Option<String>,

    /// Name of the base asset file (overrides config file)
    #[arg(long)]
    pub filename: Option<String>,

    /// Asset format (overrides config file)
    #[arg(long)]
    pub format: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExtractArgs {
    /// Apply CLI overrides (CLI > config file > defaults).
    pub fn apply_to(&self, config: &mut Config) {
        if !self.langs.is_empty() {
            config.supported_langs = self.langs.clone();
        }
        if let Some(ref assets_path) = self.assets_path {
            config.assets_path = assets_path.clone();
        }
        if let Some(ref filename) = self.filename {
            config.filename = filename.clone();
        }
        if let Some(ref format) = self.format {
            config.format = format.clone();
        }
    }
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys from source files into asset files
    Extract(ExtractCommand),
    /// Initialize a new .speakrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_extract_args() {
        let args = Arguments::parse_from([
            "speak-extract",
            "extract",
            "--lang",
            "en-US",
            "--lang",
            "it-IT",
            "--assets-path",
            "public/i18n",
            "-v",
        ]);
        let Some(Command::Extract(cmd)) = args.command else {
            panic!("expected extract command");
        };
        assert_eq!(cmd.args.langs, vec!["en-US", "it-IT"]);
        assert_eq!(cmd.args.assets_path.as_deref(), Some("public/i18n"));
        assert!(cmd.args.verbose);
        assert!(cmd.args.root.is_none());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let args = ExtractArgs {
            root: None,
            langs: vec!["fr".to_string()],
            assets_path: None,
            filename: Some("common".to_string()),
            format: None,
            verbose: false,
        };
        let mut config = Config {
            supported_langs: vec!["en".to_string()],
            assets_path: "locales".to_string(),
            ..Default::default()
        };

        args.apply_to(&mut config);

        assert_eq!(config.supported_langs, vec!["fr"]);
        assert_eq!(config.assets_path, "locales");
        assert_eq!(config.filename, "common");
        assert_eq!(config.format, "json");
    }

    #[test]
    fn verify_cli() {
        Arguments::command().debug_assert();
    }
}
