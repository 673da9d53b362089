use crate::pointer::Modality;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// linkdeck - a terminal bookmark launcher
#[derive(Parser)]
#[command(name = "linkdeck")]
#[command(about = "A terminal bookmark launcher with drag-to-reorder lists")]
#[command(version)]
pub struct Cli {
    /// Path to the bookmark store (defaults to the platform data directory)
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive dashboard
    Run {
        /// Pointer input class to listen for (fine = mouse, coarse = touch)
        #[arg(long, default_value_t = Modality::Fine)]
        input: Modality,
    },
    /// Validate a bookmark store file
    Validate {
        /// Path to the store file to validate
        store: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to the dashboard)
        let result = Cli::try_parse_from(["linkdeck"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        assert!(cli.command.is_none());
        assert!(cli.store.is_none());
    }

    #[test]
    fn test_cli_run_with_input_modality() {
        let result = Cli::try_parse_from(["linkdeck", "run", "--input", "coarse"]);
        assert!(result.is_ok());
        match result.unwrap().command {
            Some(Commands::Run { input }) => assert_eq!(input, Modality::Coarse),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_run_defaults_to_fine_pointer() {
        let cli = Cli::try_parse_from(["linkdeck", "run"]).unwrap();
        match cli.command {
            Some(Commands::Run { input }) => assert_eq!(input, Modality::Fine),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_modality() {
        let result = Cli::try_parse_from(["linkdeck", "run", "--input", "stylus"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_validate_command() {
        let result = Cli::try_parse_from(["linkdeck", "validate", "/tmp/bookmarks.json"]);
        assert!(result.is_ok());
        match result.unwrap().command {
            Some(Commands::Validate { store }) => {
                assert_eq!(store.to_str().unwrap(), "/tmp/bookmarks.json");
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_global_store_flag() {
        let cli = Cli::try_parse_from(["linkdeck", "--store", "marks.json", "run"]).unwrap();
        assert_eq!(cli.store.unwrap().to_str().unwrap(), "marks.json");
    }
}
