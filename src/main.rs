use anyhow::Context;
use clap::Parser;
use ito_dealer::core::{DeliveryChannel, GroupAnnouncer};
use ito_dealer::utils::{logger, validation::Validate};
use ito_dealer::{
    CliConfig, ConsoleChannel, DiscordRest, Result, RoundDispatcher, RoundReport, ThemeCatalog,
    TomlConfig,
};
use std::sync::Arc;

async fn deal<D, A>(
    config: &TomlConfig,
    catalog: Arc<ThemeCatalog>,
    delivery: Arc<D>,
    announcer: Arc<A>,
) -> Result<RoundReport>
where
    D: DeliveryChannel + 'static,
    A: GroupAnnouncer,
{
    let dispatcher = RoundDispatcher::new(catalog, delivery, announcer)
        .with_messages(config.messages.clone())
        .with_card_max(config.card_max());

    dispatcher.start_round(&config.roster).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting ito-dealer");
    tracing::debug!("CLI config: {:?}", cli);

    let config = TomlConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let catalog = Arc::new(
        config
            .load_theme_catalog()
            .context("failed to load theme catalog")?,
    );

    let result = if cli.dry_run {
        tracing::info!("🔍 Dry run: messages go to stdout");
        let console = Arc::new(ConsoleChannel);
        deal(&config, catalog, Arc::clone(&console), console).await
    } else {
        let discord = Arc::new(DiscordRest::from_config(&config)?);
        deal(&config, catalog, Arc::clone(&discord), discord).await
    };

    match result {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("✅ {}", report.summary());
                if let Some(failures) =
                    report.failure_announcement(&config.messages.delivery_failures_header)
                {
                    println!("❌ {}", failures);
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Round failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
