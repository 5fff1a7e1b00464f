use clap::Parser;

mod commands;
mod output;
mod tty;

use commands::update;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Update version strings across a source tree.
///
/// All .py, .pyx and .c files under the code directory, .py files under the
/// tests directory, the docs conf.py and .pyx/.h include files are updated.
#[derive(Parser)]
#[command(name = "verstamp")]
#[command(version = VERSION)]
#[command(disable_version_flag = true)]
#[command(about = "Update version strings across a source tree")]
struct Cli {
    #[command(flatten)]
    update: update::UpdateArgs,

    /// Print verstamp's own version
    #[arg(short = 'V', long = "tool-version", action = clap::ArgAction::Version)]
    tool_version: Option<bool>,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (json_result, exit_code) = output::map_cmd_result_to_json(update::run(cli.update));
    output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
