use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, Level};

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .help("Output path (optional)")
        .value_parser(value_parser!(std::path::PathBuf))
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("pixel-code")
        .about("Convert small images to pixel-code JSON and back")
        .subcommand_required(true)
        .subcommand(Command::new("encode")
            .about("Convert an image into pixel-code JSON")
            .arg(Arg::new("image")
                .help("Input image (PNG/JPEG/GIF/BMP)")
                .value_parser(value_parser!(std::path::PathBuf))
                .required(true))
            .arg(Arg::new("size")
                .short('s')
                .long("size")
                .help("Target width and height")
                .value_parser(value_parser!(usize))
                .default_value("32"))
            .arg(Arg::new("recommend")
                .long("recommend")
                .action(ArgAction::SetTrue)
                .conflicts_with("size")
                .help("Pick the size from the image dimensions"))
            .arg(Arg::new("no-resize")
                .long("no-resize")
                .action(ArgAction::SetTrue)
                .help("Do not resize the input image; require the exact size"))
            .arg(output_arg()))
        .subcommand(Command::new("decode")
            .about("Recreate an image from pixel-code JSON")
            .arg(Arg::new("json")
                .help("Pixel-code JSON document")
                .value_parser(value_parser!(std::path::PathBuf))
                .required(true))
            .arg(Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Fail on the first bad code instead of skipping it"))
            .arg(output_arg()))
        .subcommand(Command::new("extract")
            .about("Write a flat list of codes and their parsed fields")
            .arg(Arg::new("json")
                .help("Pixel-code JSON document")
                .value_parser(value_parser!(std::path::PathBuf))
                .required(true))
            .arg(output_arg()))
        .subcommand(Command::new("keys")
            .about("Write one key per row plus REVEAL_ALL")
            .arg(Arg::new("json")
                .help("Pixel-code JSON document")
                .value_parser(value_parser!(std::path::PathBuf))
                .required(true))
            .arg(output_arg()))
        .arg(Arg::new("debug")
            .long("debug")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display progress information"))
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let flag = |name: &str| options.get_flag(name);

    let log_level = if flag("debug") {
        Level::Debug
    } else if flag("trace") {
        Level::Trace
    } else if flag("info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {e}");
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
