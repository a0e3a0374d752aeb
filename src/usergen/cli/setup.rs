use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// "1.0.0" for releases, "1.0.0@abc1234" for builds off an untagged commit.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "usergen", bin_name = "usergen", version = get_version())]
#[command(about = "Generate or purge mock user accounts on a staging site", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json
    #[arg(short, long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Mock data location (http(s) URL, file:// URL or path)
    #[arg(long, global = true, value_name = "LOCATION")]
    pub source: Option<String>,

    /// Use a local file store in DIR instead of the configured store
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate users from the mock data
    #[command(after_help = "EXAMPLES:\n    usergen generate 10")]
    Generate {
        /// Number of users to generate
        #[arg(allow_hyphen_values = true)]
        count: String,
    },

    /// Delete all users except administrators
    #[command(after_help = "EXAMPLES:\n    usergen purge")]
    Purge {
        /// Answer yes to the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
