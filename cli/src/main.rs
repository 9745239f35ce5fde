use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::Parser;
use todo_cli::args::Cli;
use todo_cli::prompt::LinePrompter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    todo_cli::init_tracing(cli.verbose);

    let mut prompter = LinePrompter::new(BufReader::new(io::stdin()), io::stderr());
    match todo_cli::run(&cli, &mut io::stdout().lock(), &mut prompter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
