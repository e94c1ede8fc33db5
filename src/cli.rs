use crate::image::transformer::ColorTransform;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
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
        let command = Self::register_output_directory_argument(command);
        let command = Self::register_transform_argument(command);
        let command = Self::register_threads_argument(command);
        Self::register_describe_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn register_transform_argument(command: Command) -> Command {
        command.arg(Self::create_transform_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_describe_argument(command: Command) -> Command {
        command.arg(Self::create_describe_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to BMP input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_directory_argument() -> Arg {
        Arg::new("output_directory")
            .help("Directory receiving the transformed BMP files, created if missing")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_transform_argument() -> Arg {
        arg!(-t --transform <TRANSFORM> "Color transform to apply, may be repeated")
            .action(ArgAction::Append)
            .value_parser(value_parser!(ColorTransform))
            .default_values(["red", "green", "blue", "gray"])
    }

    fn create_threads_argument() -> Arg {
        arg!(-j --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_describe_argument() -> Arg {
        arg!(-d --describe "Log the file header, DIB header and palette").action(ArgAction::SetTrue)
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
            transforms: Self::extract_transform_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            describe: Self::extract_describe_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_directory")
            .expect("Required argument output_directory not provided")
            .clone()
    }

    fn extract_transform_argument(matches: &ArgMatches) -> Vec<ColorTransform> {
        let mut transforms: Vec<ColorTransform> = Vec::new();
        for transform in matches
            .get_many::<ColorTransform>("transform")
            .expect("Transforms must be provided, but were unset.")
        {
            if !transforms.contains(transform) {
                transforms.push(*transform);
            }
        }
        transforms
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_describe_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("describe")
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
