//! Command-line arguments for the replay driver

use clap::Parser;
use std::path::PathBuf;

/// Replay focus and cursor events against a live highlight controller
#[derive(Parser, Debug)]
#[command(
    name = "live-highlight",
    version,
    about = "Replay editor events and print live highlight commands"
)]
pub struct CliArgs {
    /// Event script (YAML or JSON)
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Start with highlighting disabled, overriding the script and config
    #[arg(long)]
    pub no_highlight: bool,

    /// Also write debug logs to the config directory
    #[arg(long)]
    pub log: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_only() {
        let args = CliArgs::try_parse_from(["live-highlight", "events.yaml"]).unwrap();
        assert_eq!(args.script, PathBuf::from("events.yaml"));
        assert!(!args.no_highlight);
        assert!(!args.log);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from(["live-highlight", "--no-highlight", "--log", "e.json"])
            .unwrap();
        assert!(args.no_highlight);
        assert!(args.log);
    }

    #[test]
    fn test_script_is_required() {
        assert!(CliArgs::try_parse_from(["live-highlight"]).is_err());
    }
}
