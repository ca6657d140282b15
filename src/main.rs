use std::process::ExitCode;

fn main() -> ExitCode {
    seemouse_lib::run()
}
