use std::env::args_os;
use std::path::PathBuf;
use std::process;

use blueshift::background::{strip_backgrounds, CommandBackgroundRemover};
use clap::{crate_authors, crate_version, value_parser, Arg, Command};

fn main() {
    let command = Command::new("strip-background")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Strips image backgrounds with an external pretrained model, keeping a .bak backup per file")
        .arg(
            Arg::new("images")
                .help("Paths of the image files to process in place")
                .value_parser(value_parser!(PathBuf))
                .num_args(1..)
                .required(true),
        );
    let matches = command
        .try_get_matches_from(args_os())
        .unwrap_or_else(|e| e.exit());
    let image_paths: Vec<PathBuf> = matches
        .get_many::<PathBuf>("images")
        .expect("Required argument images not provided")
        .cloned()
        .collect();

    let remover = match CommandBackgroundRemover::locate() {
        Ok(remover) => remover,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    };
    strip_backgrounds(&remover, &image_paths);
}
