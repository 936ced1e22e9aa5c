use clap::Parser;
use tracing::{debug, warn};

use crate::cli::Args;
use crate::client::HttpSender;
use crate::config::Config;
use crate::context::Environment;
use crate::credentials::CredentialChain;
use crate::errors::BoomipulseError;
use crate::logging;
use crate::output::{Palette, TerminalConsole};
use crate::session::Session;
use crate::status::ExitStatus;

/// Main entry point for the CLI.
///
/// Parses arguments, layers them over the config file, and runs the
/// interactive session until the user stops or a cycle fails.
pub fn run(args: Vec<String>, mut env: Environment) -> ExitStatus {
    if let Some(name) = args.first() {
        if let Some(basename) = std::path::Path::new(name).file_stem() {
            env.program_name = basename.to_string_lossy().to_string();
        }
    }

    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    logging::init(parsed.debug, parsed.verbose, parsed.log_format.unwrap_or_default());
    let traceback = parsed.traceback || parsed.debug;

    if parsed.no_color {
        env = env.without_colors();
    }
    let palette = Palette::new(env.colors);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config");
            eprintln!("{}", palette.warning(&format!("Warning: Failed to load config: {}", e)));
            Config::default()
        }
    }
    .merge_args(&parsed);
    debug!(?config, "Effective configuration");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    match runtime.block_on(program(parsed, config, env)) {
        Ok(status) => status,
        Err(e) => handle_error(e, traceback, &palette),
    }
}

/// Build the sender, credential chain and console, then drive the session
pub async fn program(
    args: Args,
    config: Config,
    env: Environment,
) -> Result<ExitStatus, BoomipulseError> {
    let sender = HttpSender::new(config.endpoint()?, config.timeout)?;
    debug!(url = %sender.url(), "Listener endpoint");

    let credentials = CredentialChain::new(
        args.user.clone(),
        args.password.clone(),
        config.env_file.clone(),
        env.stdin_isatty,
    );
    let console = TerminalConsole::new(&env)
        .with_clear_screen(!args.no_clear)
        .with_verbose(args.verbose);

    let mut session = Session::new(sender, credentials, console)
        .with_retry_policy(config.retry_policy())
        .with_ticker_config(config.ticker_config());

    session.run().await?;
    Ok(ExitStatus::Success)
}

fn handle_error(error: BoomipulseError, traceback: bool, palette: &Palette) -> ExitStatus {
    if traceback {
        eprintln!("{}", palette.error(&format!("Error: {:?}", error)));
    } else {
        eprintln!("{}", palette.error(&format!("Error: {}", error)));
    }

    ExitStatus::from_error(&error)
}
