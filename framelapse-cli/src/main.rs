// framelapse-cli/src/main.rs
//
// Entry point for the `framelapse` binary: parses arguments, sets up logging,
// dispatches the command and maps failures to exit status 1.

use clap::Parser;
use console::style;
use framelapse_cli::error::describe_error;
use framelapse_cli::logging::init_logging;
use framelapse_cli::prompt::wait_for_key;
use framelapse_cli::{Cli, Commands, run_profiles_command, run_timelapse_command};

use std::io;
use std::process;

fn main() {
    let cli = Cli::parse();

    match init_logging(&cli.global) {
        Ok(Some(path)) => eprintln!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("{} {}", style("Warning:").yellow().bold(), e),
    }

    let command = cli.selected_command();
    // Only attended timelapse runs pause before exiting.
    let pause = matches!(command, Commands::Timelapse(_))
        && !cli.global.no_pause
        && !cli.global.json
        && console::user_attended();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt_out = io::stderr();

    let result = match command {
        Commands::Timelapse(args) => {
            run_timelapse_command(&cli.global, &args, &mut input, &mut prompt_out).map(|_| ())
        }
        Commands::Profiles => run_profiles_command(&cli.global, &mut io::stdout()),
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{} {}", style("Error:").red().bold(), describe_error(&e));
            1
        }
    };

    if pause {
        eprintln!();
        if let Err(e) = wait_for_key(&mut input, &mut prompt_out) {
            log::debug!("Pause prompt failed: {}", e);
        }
    }

    process::exit(exit_code);
}
