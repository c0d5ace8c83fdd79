#![deny(clippy::all)]
#![deny(rust_2018_idioms)]

use std::path::Path;

use clap::{crate_version, Arg, Command};
use slog::{info, Logger};

use eplay_reports::{Application, Config};
use primitives::util::logging::new_logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Command::new("eplay-reports")
        .version(crate_version!())
        .about("Relays the eplay24 partner stats as campaign reports")
        .arg(
            Arg::new("envFile")
                .long("env-file")
                .short('e')
                .help("the .env file to load the configuration from, defaults to `.env` if present")
                .takes_value(true),
        )
        .get_matches();

    let logger = new_logger("eplay-reports");

    load_env_file(cli.value_of("envFile").map(Path::new), &logger)?;

    let config = Config::from_env()?;
    let socket_addr = config.socket_addr();
    info!(&logger, "Loaded configuration"; "config" => ?config);

    let app = Application::new(config, logger)?;

    app.run(socket_addr).await;

    Ok(())
}

/// An explicitly passed file has to exist,
/// the default `.env` is only loaded if there is one.
fn load_env_file(env_file: Option<&Path>, logger: &Logger) -> Result<(), dotenv::Error> {
    match env_file {
        Some(path) => {
            dotenv::from_path(path)?;
            info!(logger, "Loaded environment file: {}", path.display());
        }
        None => match dotenv::dotenv() {
            Ok(path) => info!(logger, "Loaded environment file: {}", path.display()),
            Err(err) if err.not_found() => {
                info!(logger, "No .env file found, using the process environment")
            }
            Err(err) => return Err(err),
        },
    }

    Ok(())
}
