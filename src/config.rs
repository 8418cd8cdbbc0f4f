use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::detector::DetectOptions;
use crate::error::{Result, StaleError};
use crate::types::Repository;

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub token: Option<String>,
    /// File whose first line holds the token.
    pub token_file: Option<PathBuf>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    /// GraphQL endpoint, for GitHub Enterprise installs.
    pub endpoint: Option<String>,
    pub threshold_days: Option<u32>,
    pub page_size: Option<u32>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| StaleError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents, config_path)
    }

    fn parse(contents: &str, path: PathBuf) -> Result<Self> {
        toml::from_str(contents).map_err(|e| StaleError::ConfigParse { path, source: e })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "stale-prs")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(StaleError::NoConfigDir)
    }

    /// Get token with env var taking precedence over config file
    pub fn token(&self) -> Result<String> {
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                return Ok(token.trim().to_string());
            }
        }

        self.configured_token()
    }

    fn configured_token(&self) -> Result<String> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }

        match &self.token_file {
            Some(path) => read_token_file(path),
            None => Err(StaleError::MissingToken),
        }
    }

    /// Get repository, preferring explicit argument over config
    pub fn resolve_repository(&self, explicit: Option<&str>) -> Result<Repository> {
        if let Some(repo) = explicit {
            return repo.parse();
        }

        match (&self.owner, &self.repo) {
            (Some(owner), Some(name)) => Ok(Repository::new(owner.as_str(), name.as_str())),
            _ => Err(StaleError::MissingRepository),
        }
    }

    /// Merge explicit flags over config values over defaults
    pub fn resolve_options(&self, threshold: Option<u32>, page_size: Option<u32>) -> DetectOptions {
        let defaults = DetectOptions::default();
        DetectOptions {
            threshold_days: threshold
                .or(self.threshold_days)
                .unwrap_or(defaults.threshold_days),
            page_size: page_size.or(self.page_size).unwrap_or(defaults.page_size),
        }
    }
}

fn read_token_file(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path).map_err(|e| StaleError::TokenFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    contents
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .ok_or(StaleError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Config {
        Config::parse(contents, PathBuf::from("config.toml")).unwrap()
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
token = "ghp_abc"
owner = "mantidproject"
repo = "mantid"
threshold_days = 14
page_size = 50
"#,
        );
        assert_eq!(config.configured_token().unwrap(), "ghp_abc");
        assert_eq!(
            config.resolve_repository(None).unwrap(),
            Repository::new("mantidproject", "mantid")
        );
        assert_eq!(
            config.resolve_options(None, None),
            DetectOptions {
                threshold_days: 14,
                page_size: 50
            }
        );
    }

    #[test]
    fn test_parse_error_names_path() {
        let err = Config::parse("threshold_days = \"soon\"", PathBuf::from("x.toml")).unwrap_err();
        assert!(matches!(err, StaleError::ConfigParse { ref path, .. } if path == Path::new("x.toml")));
    }

    #[test]
    fn test_explicit_arguments_win() {
        let config = parse("owner = \"a\"\nrepo = \"b\"\nthreshold_days = 14\n");
        assert_eq!(
            config.resolve_repository(Some("c/d")).unwrap(),
            Repository::new("c", "d")
        );
        assert_eq!(config.resolve_options(Some(3), Some(10)).threshold_days, 3);
        assert_eq!(config.resolve_options(Some(3), Some(10)).page_size, 10);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.resolve_options(None, None), DetectOptions::default());
        assert!(matches!(
            config.resolve_repository(None),
            Err(StaleError::MissingRepository)
        ));
        assert!(matches!(
            config.configured_token(),
            Err(StaleError::MissingToken)
        ));
    }

    #[test]
    fn test_token_file_first_line() {
        let path = std::env::temp_dir().join(format!("stale-prs-token-{}", std::process::id()));
        std::fs::write(&path, "ghp_fromfile\nignored\n").unwrap();

        let config = Config {
            token_file: Some(path.clone()),
            ..Config::default()
        };
        let token = config.configured_token();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(token.unwrap(), "ghp_fromfile");
    }

    #[test]
    fn test_token_file_missing() {
        let config = Config {
            token_file: Some(PathBuf::from("/nonexistent/stale-prs/token")),
            ..Config::default()
        };
        assert!(matches!(
            config.configured_token(),
            Err(StaleError::TokenFileRead { .. })
        ));
    }
}
