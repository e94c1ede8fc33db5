use std::env::args_os;
use std::process::ExitCode;

use bmp_channel_splitter::{split_bitmap_file, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match split_bitmap_file(&arguments) {
        Ok(written) => {
            for path in written {
                println!("{} created", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Splitting failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
