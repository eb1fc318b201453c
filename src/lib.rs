use std::path::PathBuf;

use threadpool::ThreadPool;

pub use cli::CLIParser;
pub use converter::HueRemapper;
pub use error::Error;

pub mod background;
mod cli;
pub mod color;
mod converter;
mod error;
mod logger;
pub mod remap;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    conversion_mode: ConversionMode,
    number_of_threads: usize,
}

pub enum ConversionMode {
    SingleFile {
        input_file: PathBuf,
        output_file: PathBuf,
    },
    Directory {
        directory: PathBuf,
    },
}

pub fn convert_png(arguments: &Arguments) -> Result<()> {
    let threadpool = ThreadPool::new(arguments.number_of_threads.max(1));
    let remapper = HueRemapper::new(&threadpool);
    match &arguments.conversion_mode {
        ConversionMode::SingleFile {
            input_file,
            output_file,
        } => remapper.convert(input_file, output_file),
        ConversionMode::Directory { directory } => remapper.convert_directory(directory),
    }
}
