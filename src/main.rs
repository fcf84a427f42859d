use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use mp3snip::app::run_trim_command;
use mp3snip::cli::{Cli, Commands, ConfigAction};
use mp3snip::config::{Config, config_path};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            let config = load_config(cli.config.as_deref())?;
            run_trim_command(&cli, &config)?;
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "mp3snip",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config), which must exist
/// 2. Default config path (~/.config/mp3snip/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = match (custom_path, config_path(None)) {
        (Some(path), _) => {
            Config::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        (None, Some(path)) => Config::load_or_default(&path)?,
        (None, None) => Config::default(),
    };

    Ok(config.with_env_overrides()?)
}

fn handle_config_command(
    action: &ConfigAction,
    custom_path: Option<&std::path::Path>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(custom_path)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => match config_path(custom_path) {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("No configuration directory on this platform"),
        },
    }
    Ok(())
}
