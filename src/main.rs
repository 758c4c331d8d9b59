use anyhow::Context;
use housing_browser::app::App;
use housing_browser::commands::{self, Command, Invocation, USAGE};
use housing_browser::config::Config;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = Invocation::parse(&args).context("Invalid arguments (see --help)")?;
    debug!(?invocation, "parsed command line");

    if invocation.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    info!("🏠 Housing Browser");
    let app = App::from_config(&config).await?;

    let output = commands::run(&app, &invocation).await?;
    println!("{}", output);

    Ok(())
}
