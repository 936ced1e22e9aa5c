use boomipulse::context::Environment;
use boomipulse::signals;
use boomipulse::status::ExitStatus;

/// Entry point - installs the Ctrl+C handler and calls core::run()
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    signals::install_handler();

    let args: Vec<String> = std::env::args().collect();
    let env = Environment::init();

    let status = boomipulse::core::run(args, env);

    if signals::was_interrupted() {
        return ExitStatus::Interrupted;
    }

    status
}
