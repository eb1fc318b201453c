use crate::{Arguments, ConversionMode};
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_batch_argument(command);
        Self::register_threads_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_batch_argument(command: Command) -> Command {
        command.arg(Self::create_batch_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to the image file to convert")
            .value_parser(value_parser!(PathBuf))
            .required_unless_present("batch")
            .conflicts_with("batch")
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Output path, defaults to overwriting the input file")
            .value_parser(value_parser!(PathBuf))
            .required(false)
            .conflicts_with("batch")
    }

    fn create_batch_argument() -> Arg {
        arg!(batch: --batch [DIRECTORY] "Convert every .png file in DIRECTORY in place")
            .value_parser(value_parser!(PathBuf))
            .num_args(0..=1)
            .default_missing_value(".")
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            conversion_mode: Self::extract_conversion_mode(matches),
            number_of_threads: Self::extract_threads_argument(matches),
        }
    }

    fn extract_conversion_mode(matches: &ArgMatches) -> ConversionMode {
        if let Some(directory) = matches.get_one::<PathBuf>("batch") {
            return ConversionMode::Directory {
                directory: directory.clone(),
            };
        }
        let input_file = Self::extract_input_file_argument(matches);
        let output_file = matches
            .get_one::<PathBuf>("output_file")
            .cloned()
            .unwrap_or_else(|| input_file.clone());
        ConversionMode::SingleFile {
            input_file,
            output_file,
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
