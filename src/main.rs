use clap::Parser;
use madrassa::commands::{self, Command};
use madrassa::notify::Notice;
use madrassa::startup;
use madrassa::utils::i18n;
use std::process::ExitCode;
use tracing::info;

/// Command-line client for the madrassa administration API
#[derive(Debug, Parser)]
#[command(name = "madrassa", version, about)]
struct Args {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Locale for messages (nl or en); MADRASSA_LOCALE by default
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> miette::Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    startup::init_logging()?;

    info!("Starting madrassa");

    // Load configuration
    let config = startup::load_config().await?;

    // Set locale from the command line or config
    {
        let config_read = config.read().await;
        let locale = args.locale.as_deref().unwrap_or(&config_read.locale);
        info!("Setting locale to {}", i18n::set_locale(locale));
    }

    let ctx = startup::build_context(config).await?.with_json(args.json);

    match commands::run(&ctx, args.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            // Raw detail is logged by the notice, the user sees the fixed message
            let notice = Notice::from_error(&e);
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&notice).unwrap_or_default());
            } else {
                eprintln!("{}", notice);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
