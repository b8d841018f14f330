use clap::Parser;
use tracing_subscriber::EnvFilter;

use boothverse::cli::utils::output_error;
use boothverse::cli::{Cli, OutputFormat};
use boothverse::error::BoothError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = boothverse::cli::run(cli, boothverse::config::config()).await {
        let code = e.downcast_ref::<BoothError>().map(BoothError::error_code);
        match (output_format, std::env::var("CLI_VERBOSE").as_deref()) {
            (OutputFormat::Text, Ok("true")) | (OutputFormat::Text, Ok("1")) => eprintln!("Error: {e:?}"),
            _ => output_error(&output_format, &e.to_string(), code)?,
        }
        std::process::exit(1);
    }

    Ok(())
}
