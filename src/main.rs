use std::env::args_os;

use blueshift::{convert_png, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match convert_png(&arguments) {
        Ok(_) => println!("Conversion successful"),
        Err(e) => {
            eprintln!("Conversion failed because of: {}", e);
            std::process::exit(1);
        }
    }
}
