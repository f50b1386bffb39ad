use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Design My PC - build a PC from a curated catalog
#[derive(Parser)]
#[command(name = "designmypc")]
#[command(about = "Design a gaming PC or workstation from a curated parts catalog")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive wizard
    Wizard {
        /// Directory to save pc_build.json into (overrides config)
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Recommend a build from a use-case and budget
    Recommend {
        /// Use-case: gaming or workstation
        #[arg(short, long)]
        use_case: String,
        /// Budget in US dollars
        #[arg(short, long, allow_negative_numbers = true)]
        budget: f64,
        /// Preference tag, may be repeated (e.g. --pref Quiet --pref RGB)
        #[arg(short, long = "pref")]
        preferences: Vec<String>,
        /// Write the build to a JSON file
        #[arg(short, long)]
        export: Option<PathBuf>,
        /// Print the build as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Describe your needs in words and let the classifier pick a build
    Classify {
        /// Free-text requirements, e.g. "quiet machine for 4k video editing"
        text: String,
        /// Write the build to a JSON file
        #[arg(short, long)]
        export: Option<PathBuf>,
        /// Print the build as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Also ask the assistant to review the build
        #[arg(long)]
        advise: bool,
    },
    /// List catalog bundles
    Catalog {
        /// Only show one use-case
        #[arg(short, long)]
        use_case: Option<String>,
    },
    /// Validate a saved build file
    Validate {
        /// Path to the build JSON file
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_wizard() {
        let cli = Cli::try_parse_from(["designmypc"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_recommend_args() {
        let cli = Cli::try_parse_from([
            "designmypc", "recommend", "--use-case", "gaming", "--budget", "1500", "--pref", "Quiet",
            "--pref", "RGB",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Recommend {
                use_case,
                budget,
                preferences,
                json,
                ..
            }) => {
                assert_eq!(use_case, "gaming");
                assert_eq!(budget, 1500.0);
                assert_eq!(preferences, vec!["Quiet", "RGB"]);
                assert!(!json);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_negative_budget_reaches_validation() {
        let cli = Cli::try_parse_from([
            "designmypc", "recommend", "-u", "gaming", "-b", "-5",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Recommend { budget, .. }) if budget == -5.0));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["designmypc", "catalog", "--config", "cfg.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
    }
}
