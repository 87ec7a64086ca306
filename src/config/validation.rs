//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use glob::Pattern;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bot.prefix must not be empty")]
    EmptyPrefix,
    #[error("bot.nickname must not be empty")]
    EmptyNickname,
    #[error("bot.nickname must not contain spaces, got '{0}'")]
    InvalidNickname(String),
    #[error("bot.channel_prefixes must not be empty")]
    EmptyChannelPrefixes,
    #[error("permissions.masks has an invalid pattern '{0}'")]
    InvalidMask(String),
    #[error("permissions.opers has an invalid pattern '{0}'")]
    InvalidOperPattern(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.bot.prefix.is_empty() {
        errors.push(ValidationError::EmptyPrefix);
    }

    if let Some(ref nick) = config.bot.nickname {
        if nick.is_empty() {
            errors.push(ValidationError::EmptyNickname);
        } else if nick.contains(' ') {
            errors.push(ValidationError::InvalidNickname(nick.clone()));
        }
    }

    if config.bot.channel_prefixes.is_empty() {
        errors.push(ValidationError::EmptyChannelPrefixes);
    }

    if let Some(ref perms) = config.permissions {
        for mask in perms.masks.keys() {
            if Pattern::new(mask).is_err() {
                errors.push(ValidationError::InvalidMask(mask.clone()));
            }
        }
        for oper in perms.opers.keys() {
            if Pattern::new(oper).is_err() {
                errors.push(ValidationError::InvalidOperPattern(oper.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config_passes() {
        let config: Config = toml::from_str(
            r#"
[bot]
prefix = "~"
nickname = "bot"

[permissions.masks]
"*!*@*.example.com" = ["voice"]
"#,
        )
        .unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let config: Config = toml::from_str(
            r#"
[bot]
prefix = ""
nickname = "the bot"
channel_prefixes = ""

[permissions.masks]
"[broken" = ["x"]

[permissions.opers]
"[also" = ["y"]
"#,
        )
        .unwrap();
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::EmptyPrefix)));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidNickname(_))));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::EmptyChannelPrefixes)));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidMask(_))));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidOperPattern(_))));
    }

    #[test]
    fn test_empty_nickname_fails() {
        let config: Config = toml::from_str("[bot]\nprefix = \"~\"\nnickname = \"\"\n").unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(matches!(errors.as_slice(), [ValidationError::EmptyNickname]));
    }
}
