use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use mazegen::{Config, codec, render};

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for the preview.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let Some(config_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: mazegen <config-file>");
        return ExitCode::FAILURE;
    };

    match run(&config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR]: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &Path) -> Result<(), mazegen::Error> {
    let config = Config::from_file(config_path)?;
    let generated = mazegen::generate(&config.request)?;

    if let Some(output) = &config.output_file {
        codec::write_file(&generated, output)?;
        tracing::info!(path = %output.display(), "wrote encoded maze");
    }
    if config.preview {
        print!("{}", render::render(&generated, true));
        println!(
            "seed: {}  route: {} steps",
            generated.seed(),
            generated.path().len()
        );
    }
    Ok(())
}
