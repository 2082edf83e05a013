use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use spaced::domain::Timestamp;
use spaced::persistence::{config_file, list_users, load_config, save_config, user_file, Config};
use spaced::prompt::{render_agenda, run_session, select_user, Prompter};
use spaced::session::Session;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spaced")]
#[command(about = "A plain-text spaced-repetition review tracker", long_about = None)]
struct Cli {
    /// Directory holding the <user>.srs files. Overrides the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// User to load instead of asking
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the config file pointing at the --data-dir directory
    Init,
    /// List users with a task file
    Users,
    /// Print due and upcoming tasks without prompting
    Status,
    /// Add a task without prompting
    Add {
        #[arg(short, long)]
        subject: String,
        #[arg(short, long)]
        name: String,
    },
}

fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn now() -> Timestamp {
    Local::now().fixed_offset()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Init) => {
            let path = cli
                .data_dir
                .as_ref()
                .context("init needs a directory: spaced init --data-dir <path>")?;
            let config_path = config_file()?;
            save_config(&config_path, &Config::new(path.clone()))?;
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            println!("Wrote {}", config_path.display());
            println!("Task files will be stored in {}", path.display());
            Ok(())
        }
        Some(Commands::Users) => {
            let config = require_config(&cli)?;
            for user in list_users(&config.data_dir)? {
                println!("{}", user);
            }
            Ok(())
        }
        Some(Commands::Status) => {
            let config = require_config(&cli)?;
            let session = open_session(&cli, &config)?;
            let stdout = io::stdout();
            let mut prompter = Prompter::new(io::stdin().lock(), stdout.lock(), false);
            render_agenda(&mut prompter, &session.user, &session.agenda(now()))
        }
        Some(Commands::Add { subject, name }) => {
            let config = require_config(&cli)?;
            let mut session = open_session(&cli, &config)?;
            let id = session.add(subject, name, now())?;
            session.save(now())?;
            if let Some(task) = session.tasks.get(id) {
                println!("added: {}", task.description());
            }
            Ok(())
        }
        None => run_interactive(&cli),
    }
}

fn run_interactive(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let clear = stdout.is_terminal();
    let mut prompter = Prompter::new(io::stdin().lock(), stdout.lock(), clear);

    let config = match resolve_config(cli)? {
        Some(config) => config,
        None => {
            prompter.say("config file does not exist")?;
            let Some(answer) = prompter.ask("enter path to data folder: ")? else {
                return Ok(());
            };
            let config = Config::new(PathBuf::from(answer));
            save_config(config_file()?, &config)?;
            config
        }
    };
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create directory: {}", config.data_dir.display()))?;

    let user = match &cli.user {
        Some(user) => user.clone(),
        None => match select_user(&mut prompter, &config.data_dir)? {
            Some(user) => user,
            None => return Ok(()),
        },
    };

    let path = user_file(&config.data_dir, &user);
    let mut session = Session::open(&user, &path, config.ladder()?, config.upcoming_window()?)?;
    info!("Starting session for {} ({} tasks)", user, session.tasks.len());

    run_session(&mut prompter, &mut session, now)?;
    let mut output = prompter.into_output();
    writeln!(output)?;
    Ok(())
}

/// Config file merged with command-line overrides, `None` if nothing is configured
fn resolve_config(cli: &Cli) -> Result<Option<Config>> {
    let mut config = load_config(config_file()?)?;
    if let Some(dir) = &cli.data_dir {
        config = Some(match config {
            Some(mut config) => {
                config.data_dir = dir.clone();
                config
            }
            None => Config::new(dir.clone()),
        });
    }
    Ok(config)
}

fn require_config(cli: &Cli) -> Result<Config> {
    resolve_config(cli)?
        .context("No data directory configured. Run 'spaced init --data-dir <path>' or pass --data-dir")
}

/// Open the user named on the command line, or the only user there is
fn open_session(cli: &Cli, config: &Config) -> Result<Session> {
    let user = match &cli.user {
        Some(user) => user.clone(),
        None => {
            let users = list_users(&config.data_dir)?;
            match users.as_slice() {
                [only] => only.clone(),
                [] => anyhow::bail!("No user files found in {}", config.data_dir.display()),
                _ => anyhow::bail!("Several users found, pick one with --user: {}", users.join(", ")),
            }
        }
    };

    let path = user_file(&config.data_dir, &user);
    Session::open(&user, &path, config.ladder()?, config.upcoming_window()?)
}
