use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_POLICY_NAME: &str = "Acceptable Use Policy";
pub const DEFAULT_POLICY_OUT_DIR: &str = "outputs/policy";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const SAMPLE_POLICY: &str = "Employees must not share credentials; report suspected phishing within 24h; MFA required for remote access.";

#[derive(Parser, Debug)]
#[command(name = "hera", version, about = "HERA insider-risk demo toolkit")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug)"
    )]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract structured policy rules from free text with the local model
    Extract(ExtractArgs),
    /// Write the synthetic insider-risk datasets as CSV
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[arg(long, conflicts_with = "file", help = "Policy text (defaults to a built-in sample)")]
    pub text: Option<String>,
    #[arg(long, help = "Read the policy text from a file")]
    pub file: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_POLICY_NAME, help = "Policy display name, also the fallback title")]
    pub name: String,
    #[arg(long, help = "JSON Schema for the policy rules (defaults to the built-in schema)")]
    pub schema: Option<PathBuf>,
    #[arg(long, help = "Prompt template containing <<<POLICY>>>")]
    pub prompt: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_POLICY_OUT_DIR)]
    pub out_dir: PathBuf,
    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_OLLAMA_HOST)]
    pub host: String,
    #[arg(long, env = "OLLAMA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long, default_value_t = 100)]
    pub users: usize,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    #[arg(long, default_value_t = 90, help = "Spread events across the last N days")]
    pub days: u32,
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub out_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults_match_the_demo_dataset() {
        let cli = Cli::parse_from(["hera", "generate"]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.users, 100);
                assert_eq!(args.seed, 42);
                assert_eq!(args.days, 90);
                assert_eq!(args.out_dir.to_str(), Some("data"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn text_and_file_are_mutually_exclusive() {
        let res = Cli::try_parse_from(["hera", "extract", "--text", "x", "--file", "p.txt"]);
        assert!(res.is_err());
    }
}
