use clap::Parser;
use pipedit::application::{EditFileService, EditFormat, ShowFileService, WriteFileService};
use pipedit::cli::{format_config, format_edit_outcome, Cli, Commands};
use pipedit::domain::{CommandMode, StoreConfig};
use pipedit::error::PipeditError;
use pipedit::infrastructure::{CommandFileStore, Config, TerminalPrompt};
use std::io::{self, Read, Write};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Environment first, then the config file, then flags; the first to set a direction keeps it
fn build_store_config(cli: &Cli, config: &Config) -> StoreConfig {
    let mode: CommandMode = cli.mode.or(config.mode).unwrap_or_default();

    let store_config = StoreConfig::from_env().with_mode(mode);
    config.apply_commands(&store_config);
    if let Some(cmd) = &cli.reader_cmd {
        store_config.set_read_command(cmd);
    }
    if let Some(cmd) = &cli.writer_cmd {
        store_config.set_write_command(cmd);
    }
    store_config
}

fn run(cli: Cli) -> Result<(), PipeditError> {
    let config = Config::discover(cli.config.as_deref())?;
    let store = CommandFileStore::new(build_store_config(&cli, &config));

    match cli.command {
        Commands::Edit { path, json, create } => {
            let (format, suffix) = if json {
                (EditFormat::Json, ".json")
            } else {
                (EditFormat::Text, ".txt")
            };
            let editor = config.editor().with_suffix(suffix);
            let service = EditFileService::new(store, editor);

            let mut prompt = TerminalPrompt::stdio();
            let outcome = service.execute(&path, format, create, &mut prompt)?;
            eprintln!("{}", format_edit_outcome(outcome, &path));
            Ok(())
        }
        Commands::Cat { path } => {
            let content = ShowFileService::new(store).execute(&path)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        Commands::Write { path } => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            WriteFileService::new(store).execute(&path, &content)?;
            Ok(())
        }
        Commands::Config => {
            let editor = config.editor();
            print!("{}", format_config(store.config(), editor.command()));
            Ok(())
        }
    }
}
