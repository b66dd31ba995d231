use std::env;

use anyhow::Context;
use log::LevelFilter;
use structopt::StructOpt;

use esp32fan::{Assembler, Esptool, Layout};

mod cli;

fn main() -> Result<(), anyhow::Error> {
    // Create a logger with a timestamp that logs everything at Info level or above, unless
    // RUST_LOG says otherwise
    let mut logger = pretty_env_logger::formatted_timed_builder();
    logger.filter_level(LevelFilter::Info);

    if let Ok(filters) = env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }

    logger.init();

    // Parse the command-line arguments
    let opts = cli::Opts::from_args();

    let build_dir = env::current_dir()
        .with_context(|| "Could not determine the current directory")?
        .join(&opts.build_dir);
    let assembler = Assembler::new(Layout::new(build_dir), Esptool::new(&opts.python));

    let image = assembler.assemble().with_context(|| {
        format!(
            "Failed to merge the firmware in {}",
            assembler.layout().build_dir().display()
        )
    })?;

    println!("Merged image written to {}", image.display());

    Ok(())
}
