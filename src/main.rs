use clap::{Arg, ArgAction, Command};
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let matches = Command::new("tally")
        .version(env!("CARGO_PKG_VERSION"))
        .about("An interpreter for a small language of numbers, booleans and variables")
        .arg(
            Arg::new("file")
                .help("The program file to run")
                .value_name("FILE")
                .index(1)
                .conflicts_with("eval"),
        )
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .help("Evaluate a program given on the command line")
                .value_name("PROGRAM"),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(program) = matches.get_one::<String>("eval") {
        if tally::run(program, None).is_err() {
            process::exit(1);
        }
    } else if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(file_path);
    } else {
        // -i and the no-argument case both land here.
        tally::start_repl();
    }
}

fn run_file(path: &str) {
    let path = Path::new(path);

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            process::exit(1);
        }
    };

    let filename = path.display().to_string();
    if tally::run(&source, Some(&filename)).is_err() {
        process::exit(1);
    }
}
