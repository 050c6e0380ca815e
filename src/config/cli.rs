use clap::Parser;

/// Local dry-run of the fetch pipeline: raw responses and normalized
/// records are written under `--output-path` instead of S3/DynamoDB, and
/// the report mail goes to the log.
#[derive(Debug, Clone, Parser)]
#[command(name = "catch-stats")]
#[command(about = "Fetch and normalize fishing-catch statistics")]
pub struct CliConfig {
    #[arg(long)]
    pub appsync_url: String,

    /// AppSync API key; read from the APPSYNC_API_KEY environment variable
    /// when omitted.
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "honmoku")]
    pub facility: String,

    /// Single target date (YYYY-MM-DD). Defaults to yesterday in JST.
    #[arg(long)]
    pub date: Option<String>,

    /// Start of an inclusive date range; requires --to.
    #[arg(long)]
    pub from: Option<String>,

    /// End of an inclusive date range; requires --from.
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Also fetch the morning field-condition post.
    #[arg(long)]
    pub fetch_field_condition: bool,

    /// Also fetch the intraday fishing-report posts.
    #[arg(long)]
    pub fetch_fishing_report: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
