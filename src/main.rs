mod cli;
mod interactive;
mod logging;
mod prompt;
mod reporter;

use clap::{CommandFactory, Parser};
use cli::{ArrangeArgs, Cli, Commands, GenerateArgs, RootArgs, StreamArgs};
use colored::*;
use dotenv::dotenv;
use loopcast::launch::{self, TerminalLauncher};
use loopcast::{
    platform, AppConfig, GenerateOptions, LaunchOptions, LoopCount, Session, StatusReporter,
};
use reporter::ConsoleReporter;
use std::process;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let guard = logging::init_logger();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            drop(guard);
            process::exit(1);
        }
    };

    let args = Cli::parse();
    let reporter = ConsoleReporter::new();

    let result = match args.command {
        Some(Commands::Scan(args)) => run_scan(&args, &reporter),
        Some(Commands::Generate(args)) => run_generate(&config, &args, &reporter),
        Some(Commands::Run(args)) => run_scripts(&config, &args, &reporter),
        Some(Commands::Stream(args)) => run_stream(&config, &args, &reporter),
        Some(Commands::Arrange(args)) => run_arrange(&config, &args, &reporter),
        Some(Commands::Interactive) => {
            interactive::run(&config, &reporter)?;
            Ok(())
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:#?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        reporter.fail(&err.to_string());
        // Flush the log file before exiting.
        drop(guard);
        process::exit(if err.is_precondition() { 2 } else { 1 });
    }

    Ok(())
}

fn generate_options(config: &AppConfig, args: &GenerateArgs) -> GenerateOptions {
    GenerateOptions::from_config(config)
        .with_prefix(args.prefix.as_deref())
        .with_loop_count(LoopCount::from(args.loops))
}

fn open_session(root: &RootArgs, reporter: &ConsoleReporter) -> loopcast::Result<Session> {
    let mut session = Session::new();
    session.open(&root.root, reporter)?;
    Ok(session)
}

fn run_scan(args: &RootArgs, reporter: &ConsoleReporter) -> loopcast::Result<()> {
    let session = open_session(args, reporter)?;
    info!(
        "{} extension(s): {}",
        format!("{}", session.catalog().extensions().count()).cyan(),
        session
            .catalog()
            .extensions()
            .map(|ext| if ext.is_empty() { "(none)" } else { ext })
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

fn run_generate(
    config: &AppConfig,
    args: &GenerateArgs,
    reporter: &ConsoleReporter,
) -> loopcast::Result<()> {
    let mut session = open_session(&args.root, reporter)?;
    let report = session.generate(&generate_options(config, args), reporter)?;
    info!(
        "{} written, {} unmatched, {} failed",
        format!("{}", report.written.len()).green(),
        format!("{}", report.unmatched.len()).yellow(),
        format!("{}", report.failures.len()).red(),
    );
    Ok(())
}

fn launch_session(
    config: &AppConfig,
    session: &Session,
    reporter: &ConsoleReporter,
) -> loopcast::Result<()> {
    let launcher = TerminalLauncher::from_config(config);
    let windows = platform::window_manager();
    let report = session.run(
        &config.script_bucket(),
        &launcher,
        windows.as_ref(),
        &LaunchOptions::from_config(config),
        reporter,
    )?;
    info!(
        "{} launched, {} arranged",
        format!("{}", report.launched.len()).green(),
        format!("{}", report.arranged).green(),
    );
    Ok(())
}

fn run_scripts(config: &AppConfig, args: &RootArgs, reporter: &ConsoleReporter) -> loopcast::Result<()> {
    let session = open_session(args, reporter)?;
    launch_session(config, &session, reporter)
}

/// Runs what is on disk; with nothing there, offers to generate first.
fn run_stream(config: &AppConfig, args: &StreamArgs, reporter: &ConsoleReporter) -> loopcast::Result<()> {
    let mut session = open_session(&args.generate.root, reporter)?;

    if session.catalog().bucket_len(&config.script_bucket()) == 0 {
        let confirmed = args.yes || prompt::confirm_generate()?;
        if !confirmed {
            reporter.log("Operation cancelled.");
            return Ok(());
        }

        let report = session.generate(&generate_options(config, &args.generate), reporter)?;
        if !report.is_success() {
            return Ok(());
        }
    }

    launch_session(config, &session, reporter)
}

fn run_arrange(config: &AppConfig, args: &ArrangeArgs, reporter: &ConsoleReporter) -> loopcast::Result<()> {
    let windows = platform::window_manager();
    let report = launch::arrange(
        args.count,
        windows.as_ref(),
        &LaunchOptions::from_config(config),
        reporter,
    );
    if !report.arrange_failures.is_empty() {
        reporter.notify(
            loopcast::Notice::Error,
            "Error",
            &format!("{} window(s) could not be arranged.", report.arrange_failures.len()),
        );
    }
    Ok(())
}
