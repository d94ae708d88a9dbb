use std::process::exit;

use log::error;

mod cmd_args;
mod commands;

fn main() {
    let options = cmd_args::create_cmd_args().get_matches();

    cmd_args::setup_logger(&options);

    match commands::run(&options) {
        Ok(output) => println!("Wrote {}", output.display()),
        Err(e) => {
            error!("Could not complete command, reason: {}", e);
            exit(1);
        }
    }
}
