use bikeshare_explorer::BikeshareError;
use bikeshare_explorer::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // `end` at a prompt is a normal way out
            if error
                .downcast_ref::<BikeshareError>()
                .is_some_and(BikeshareError::is_interrupted)
            {
                println!("\nGoodbye!");
                process::exit(0);
            }

            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
