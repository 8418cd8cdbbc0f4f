use std::fmt;
use std::str::FromStr;

use crate::error::StaleError;

/// Owner/name pair identifying the repository to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repository {
    type Err = StaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(StaleError::InvalidRepository(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_name() {
        let repo: Repository = "mantidproject/mantid".parse().unwrap();
        assert_eq!(repo.owner, "mantidproject");
        assert_eq!(repo.name, "mantid");
        assert_eq!(repo.to_string(), "mantidproject/mantid");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("mantid".parse::<Repository>().is_err());
        assert!("/mantid".parse::<Repository>().is_err());
        assert!("mantidproject/".parse::<Repository>().is_err());
        assert!("a/b/c".parse::<Repository>().is_err());
    }
}
