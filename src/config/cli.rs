use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ito-dealer")]
#[command(about = "Deals Ito number cards and a round theme to the players")]
pub struct CliConfig {
    #[arg(long, default_value = "ito.toml")]
    pub config: String,

    #[arg(long, help = "Print announcements and DMs to stdout instead of sending them")]
    pub dry_run: bool,

    #[arg(long, help = "Print the round report as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
