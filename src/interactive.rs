use crate::reporter::ConsoleReporter;
use loopcast::launch::TerminalLauncher;
use loopcast::{platform, AppConfig, GenerateOptions, LaunchOptions, LoopCount, Session, StatusReporter};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands:
  root <path>        select a folder and scan it
  prefix [name]      set the script name prefix (blank for the default)
  loops [n]          set the loop count (blank for unlimited)
  generate           write the stream scripts
  run                open the scripts in terminals and tile them
  reset              clear the folder, settings and session
  status             show the current settings
  help               show this help
  quit               leave";

struct Form {
    prefix: Option<String>,
    loop_count: LoopCount,
}

impl Form {
    fn new() -> Self {
        Form {
            prefix: None,
            loop_count: LoopCount::Infinite,
        }
    }
}

/// Line-based stand-in for the Generate / Run / Reset form.
pub fn run(config: &AppConfig, reporter: &ConsoleReporter) -> io::Result<()> {
    let mut session = Session::new();
    let mut form = Form::new();
    let launcher = TerminalLauncher::from_config(config);
    let windows = platform::window_manager();
    let launch_options = LaunchOptions::from_config(config);

    println!("{}", HELP);

    let stdin = io::stdin();
    loop {
        print!("loopcast> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "" => continue,
            "root" => {
                if let Err(err) = session.open(arg, reporter) {
                    reporter.fail(&err.to_string());
                }
            }
            "prefix" => {
                form.prefix = Some(arg.to_string()).filter(|p| !p.is_empty());
                reporter.log(&format!(
                    "Prefix: {}",
                    form.prefix.as_deref().unwrap_or(&config.default_prefix)
                ));
            }
            "loops" => {
                if arg.is_empty() {
                    form.loop_count = LoopCount::Infinite;
                } else {
                    match arg.parse::<u32>() {
                        Ok(n) => form.loop_count = LoopCount::Times(n),
                        Err(_) => {
                            reporter.fail(&format!("Loop count must be a whole number, got '{}'.", arg));
                            continue;
                        }
                    }
                }
                reporter.log(&format!("Loop: {}", form.loop_count));
            }
            "generate" => {
                let options = GenerateOptions::from_config(config)
                    .with_prefix(form.prefix.as_deref())
                    .with_loop_count(form.loop_count);
                if let Err(err) = session.generate(&options, reporter) {
                    reporter.fail(&err.to_string());
                }
            }
            "run" => {
                if let Err(err) = session.run(
                    &config.script_bucket(),
                    &launcher,
                    windows.as_ref(),
                    &launch_options,
                    reporter,
                ) {
                    reporter.fail(&err.to_string());
                }
            }
            "reset" => {
                form = Form::new();
                session.reset(reporter);
            }
            "status" => {
                let root = session
                    .root()
                    .map(|r| r.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string());
                println!("Location: {}", root);
                println!(
                    "Rename:   {}",
                    form.prefix.as_deref().unwrap_or(&config.default_prefix)
                );
                println!("Loop:     {}", form.loop_count);
                println!("Files:    {}", session.catalog().len());
                println!("Scripts:  {}", session.generated().len());
            }
            "help" | "?" => println!("{}", HELP),
            "quit" | "exit" | "q" => break,
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    Ok(())
}
