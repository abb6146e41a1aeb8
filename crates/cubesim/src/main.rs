//! Command-line front end for cubesim.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    color_eyre::install()?;
    env_logger::builder().init();

    cli::exec(args)
}
