mod cli;

use anyhow::Context as _;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::CliArgs;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = CliArgs::parse().into_site_options();
    let report = museumkit_catalog::generate_site(&options).with_context(|| {
        format!(
            "catalogue generation from {} failed",
            options.path_file_in.display()
        )
    })?;

    if report.error_count() > 0 {
        warn!(
            errors = report.error_count(),
            "Some rows or cells could not be used; see the warnings above"
        );
    }
    println!("{report}");
    Ok(())
}
