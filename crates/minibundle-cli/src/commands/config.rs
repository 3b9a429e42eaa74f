//! `minibundle config`: show the settings after file and env layering.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let text = match cmd {
        ConfigCommands::Get { key } => lookup(&config, &key)?,
        ConfigCommands::List => toml::to_string_pretty(&config)
            .map(|s| s.trim_end().to_owned())
            .map_err(|e| CliError::ConfigError {
                message: format!("cannot render settings as TOML: {e}"),
                source: Some(Box::new(e)),
            })?,
        ConfigCommands::Path => AppConfig::config_path().display().to_string(),
    };
    output.print(&text)?;
    Ok(())
}

fn lookup(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!(
            "Unknown config key '{key}' (known: {})",
            AppConfig::KEYS.join(", ")
        ),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_default_program() {
        assert_eq!(lookup(&AppConfig::default(), "minifier.program").unwrap(), "uglifyjs");
    }

    #[test]
    fn lookup_of_unknown_key_lists_known_ones() {
        let Err(CliError::ConfigError { message, .. }) = lookup(&AppConfig::default(), "nope")
        else {
            panic!("expected a config error");
        };
        assert!(message.contains("output.format"));
    }
}
