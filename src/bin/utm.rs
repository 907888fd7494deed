use clap::Parser;
use tracing_subscriber::EnvFilter;
use utm_builder::cli::{utils::output_error, Cli, OutputFormat};
use utm_builder::config::config;
use utm_builder::error::AppError;

fn main() {
    // Load .env if present so UTM_* settings apply without exporting them
    let _ = dotenvy::dotenv();

    let app = config();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app.logging.default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Starting utm in {:?} mode", app.environment);

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = utm_builder::cli::run(cli) {
        let code = match e.downcast_ref::<AppError>() {
            Some(app_error) => {
                let _ = output_error(&output_format, app_error);
                app_error.exit_code()
            }
            None => {
                match std::env::var("CLI_VERBOSE").as_deref() {
                    Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
                    _ if utm_builder::is_development!() => eprintln!("Error: {e:?}"),
                    _ => eprintln!("Error: {e}"),
                }
                1
            }
        };
        std::process::exit(code);
    }
}
