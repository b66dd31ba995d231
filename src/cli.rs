use std::path::PathBuf;

use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(about = "Merges the esp32Fan build output into a single firmware image")]
pub struct Opts {
    /// The build output directory, relative to the current directory
    #[structopt(
        env = "BUILD_DIR",
        short = "C",
        long = "build-dir",
        default_value = "build",
        parse(from_os_str)
    )]
    pub build_dir: PathBuf,

    /// The Python interpreter used to run esptool
    #[structopt(env = "PYTHON", long = "python", default_value = "python3")]
    pub python: String,
}
