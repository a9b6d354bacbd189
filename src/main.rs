use anyhow::Context;
use clap::Parser;
use probekit::cli::Cli;
use probekit::{init_logging, process_stream, Config};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    let pipeline = config.build_pipeline();

    if cli.describe {
        for (name, help, enabled) in pipeline.list_processors() {
            let status = if enabled { "enabled" } else { "disabled" };
            println!("{} ({})\n    {}", name, status, help);
        }
        return Ok(());
    }

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let stats = process_stream(&pipeline, reader, writer)?;
    tracing::info!(
        "probekit {} (built {}): {} lines in, {} commands out",
        probekit::VERSION,
        probekit::BUILD_DATE,
        stats.lines_read,
        stats.commands_written
    );

    Ok(())
}
