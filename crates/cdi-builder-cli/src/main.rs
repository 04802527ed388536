use crate::commands::{Cli, Commands};
use crate::image::{build_image, print_layout, scramble_binary};
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

mod commands;
mod image;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Build(cmd) => build_image(pb.clone(), cmd).await?,
        Commands::Layout(cmd) => print_layout(cmd).await?,
        Commands::Scramble(cmd) => scramble_binary(cmd).await?,
    }

    Ok(())
}
