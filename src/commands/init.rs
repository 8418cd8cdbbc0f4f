use std::io::{self, Write};

use serde::Serialize;

use crate::config::Config;
use crate::error::{Result, StaleError};
use crate::types::Repository;

#[derive(Serialize, Default)]
struct InitConfig {
    token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold_days: Option<u32>,
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn parse_threshold(input: &str) -> Result<u32> {
    let days = input
        .parse::<u32>()
        .map_err(|_| StaleError::InvalidThresholdInput(input.to_string()))?;
    if days == 0 {
        return Err(StaleError::InvalidThreshold(days));
    }
    Ok(days)
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("stale-prs Configuration");
    println!("=======================\n");

    let token = prompt(
        "Enter a GitHub token with read access (create one at https://github.com/settings/tokens): ",
    )?;
    if token.is_empty() {
        return Err(StaleError::MissingToken);
    }

    let mut config = InitConfig {
        token,
        ..InitConfig::default()
    };

    let repository = prompt("Enter default repository as owner/name [optional]: ")?;
    if !repository.is_empty() {
        let repository: Repository = repository.parse()?;
        config.owner = Some(repository.owner);
        config.repo = Some(repository.name);
    }

    let threshold = prompt("Days before a pull request is stale [7]: ")?;
    if !threshold.is_empty() {
        config.threshold_days = Some(parse_threshold(&threshold)?);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StaleError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let contents = toml::to_string(&config).map_err(StaleError::ConfigSerialize)?;

    std::fs::write(&config_path, contents).map_err(|e| StaleError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now run 'stale-prs stale'!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_round_trips_through_loader() {
        let written = toml::to_string(&InitConfig {
            token: "ghp_abc".to_string(),
            owner: Some("mantidproject".to_string()),
            repo: Some("mantid".to_string()),
            threshold_days: Some(10),
        })
        .unwrap();

        let config: Config = toml::from_str(&written).unwrap();
        assert_eq!(config.token.as_deref(), Some("ghp_abc"));
        assert_eq!(
            config.resolve_repository(None).unwrap(),
            Repository::new("mantidproject", "mantid")
        );
        assert_eq!(config.threshold_days, Some(10));
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("14").unwrap(), 14);
        assert!(matches!(
            parse_threshold("0"),
            Err(StaleError::InvalidThreshold(0))
        ));

        let err = parse_threshold("abc").unwrap_err();
        assert!(matches!(err, StaleError::InvalidThresholdInput(ref raw) if raw == "abc"));
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_init_config_omits_unset_fields() {
        let written = toml::to_string(&InitConfig {
            token: "ghp_abc".to_string(),
            ..InitConfig::default()
        })
        .unwrap();
        assert_eq!(written.trim(), "token = \"ghp_abc\"");
    }
}
