//! crates/logging/src/config.rs
//! Logger configuration: threshold, flags and color preference.

use crate::color::{ColorChoice, ParseColorChoiceError};
use crate::flags::LogFlags;
use crate::level::{Level, ParseLevelError};

/// Environment variable holding a configuration directive.
pub const LEVEL_ENV: &str = "LOG_LEVEL";
/// Environment variable holding a [`ColorChoice`].
pub const COLOR_ENV: &str = "LOG_COLOR";

/// Errors raised while parsing a configuration directive.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The directive contained no tokens.
    #[error("empty logging directive")]
    Empty,
    /// A `+`/`-` prefixed token did not name a flag.
    #[error("unknown logging flag `{0}` (expected repeat or level)")]
    UnknownFlag(String),
    /// A token was neither a flag nor a level.
    #[error(transparent)]
    Level(#[from] ParseLevelError),
    /// A `color=` token or the color variable held an unknown value.
    #[error(transparent)]
    Color(#[from] ParseColorChoiceError),
}

/// Threshold, flags and color preference of a logger.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Messages less severe than this are dropped.
    pub level: Level,
    /// Dispatcher switches.
    pub flags: LogFlags,
    /// Color override.
    pub color: ColorChoice,
}

impl LogConfig {
    /// Reads [`LEVEL_ENV`] and [`COLOR_ENV`] from the process environment.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| {
            std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Like [`LogConfig::from_env`] with an explicit variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but cannot be parsed.
    pub fn from_lookup<E>(lookup: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(directive) = lookup(LEVEL_ENV) {
            config.apply_directive(&directive)?;
        }
        if let Some(color) = lookup(COLOR_ENV) {
            config.color = color.parse()?;
        }
        Ok(config)
    }

    /// Applies a comma separated list of tokens, e.g. `"+repeat,-level,debug"`.
    ///
    /// ```
    /// use logging::{ColorChoice, Level, LogConfig, LogFlags};
    ///
    /// let mut config = LogConfig::default();
    /// config.apply_directive("repeat, level, verbose, color=never").unwrap();
    /// assert_eq!(config.level, Level::VERBOSE);
    /// assert_eq!(config.flags, LogFlags::SKIP_REPEATED | LogFlags::PRINT_LEVEL);
    /// assert_eq!(config.color, ColorChoice::Never);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the first token error, or [`ConfigError::Empty`] for a blank
    /// directive. Tokens before the failing one stay applied.
    pub fn apply_directive(&mut self, directive: &str) -> Result<(), ConfigError> {
        let mut applied = false;
        for token in directive.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            self.apply_flag_token(token)?;
            applied = true;
        }
        if applied {
            Ok(())
        } else {
            Err(ConfigError::Empty)
        }
    }

    /// Applies one token.
    ///
    /// - `repeat` / `+repeat` / `-repeat` toggle [`LogFlags::SKIP_REPEATED`];
    /// - `level` / `+level` / `-level` toggle [`LogFlags::PRINT_LEVEL`];
    /// - `color=<choice>` sets the color override;
    /// - anything else is parsed as a [`Level`] name or number.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown flags, levels or color choices.
    pub fn apply_flag_token(&mut self, token: &str) -> Result<(), ConfigError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::Empty);
        }
        if let Some(choice) = token.strip_prefix("color=") {
            self.color = choice.parse()?;
            return Ok(());
        }

        let (enable, name) = match token.as_bytes()[0] {
            b'+' => (Some(true), &token[1..]),
            b'-' => (Some(false), &token[1..]),
            _ => (None, token),
        };
        let flag = match name {
            "repeat" => Some(LogFlags::SKIP_REPEATED),
            "level" => Some(LogFlags::PRINT_LEVEL),
            _ => None,
        };

        match (flag, enable) {
            (Some(flag), enable) => {
                self.flags.set(flag, enable.unwrap_or(true));
                Ok(())
            }
            (None, Some(true)) => Err(ConfigError::UnknownFlag(name.to_owned())),
            // `-8` is a level, `-bogus` is reported as one.
            (None, _) => {
                self.level = token.parse()?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(config.flags.is_empty());
        assert_eq!(config.color, ColorChoice::Auto);
    }

    #[test]
    fn test_apply_flag_token() {
        let mut config = LogConfig::default();

        config.apply_flag_token("repeat").unwrap();
        assert!(config.flags.contains(LogFlags::SKIP_REPEATED));

        config.apply_flag_token("+level").unwrap();
        assert!(config.flags.contains(LogFlags::PRINT_LEVEL));

        config.apply_flag_token("-repeat").unwrap();
        assert_eq!(config.flags, LogFlags::PRINT_LEVEL);

        config.apply_flag_token("debug").unwrap();
        assert_eq!(config.level, Level::DEBUG);

        config.apply_flag_token("-8").unwrap();
        assert_eq!(config.level, Level::QUIET);

        config.apply_flag_token("color=always256").unwrap();
        assert_eq!(config.color, ColorChoice::Always256);
    }

    #[test]
    fn test_apply_flag_token_errors() {
        let mut config = LogConfig::default();
        assert_eq!(
            config.apply_flag_token("+bogus"),
            Err(ConfigError::UnknownFlag("bogus".to_owned()))
        );
        assert!(matches!(
            config.apply_flag_token("loud"),
            Err(ConfigError::Level(_))
        ));
        assert!(matches!(
            config.apply_flag_token("color=sometimes"),
            Err(ConfigError::Color(_))
        ));
        assert_eq!(config.apply_flag_token("  "), Err(ConfigError::Empty));
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_apply_directive() {
        let mut config = LogConfig::default();
        config.apply_directive("warning, repeat ,level").unwrap();
        assert_eq!(config.level, Level::WARNING);
        assert_eq!(
            config.flags,
            LogFlags::SKIP_REPEATED | LogFlags::PRINT_LEVEL
        );
        assert_eq!(config.apply_directive(" , "), Err(ConfigError::Empty));
    }

    #[test]
    fn test_directive_stops_at_first_error() {
        let mut config = LogConfig::default();
        assert!(config.apply_directive("repeat,nope,level").is_err());
        assert_eq!(config.flags, LogFlags::SKIP_REPEATED);
    }

    #[test]
    fn test_from_lookup() {
        let config =
            LogConfig::from_lookup(lookup(&[("LOG_LEVEL", "trace,level"), ("LOG_COLOR", "never")]))
                .unwrap();
        assert_eq!(config.level, Level::TRACE);
        assert_eq!(config.flags, LogFlags::PRINT_LEVEL);
        assert_eq!(config.color, ColorChoice::Never);

        assert_eq!(LogConfig::from_lookup(lookup(&[])), Ok(LogConfig::default()));
        assert!(LogConfig::from_lookup(lookup(&[("LOG_LEVEL", "shout")])).is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::UnknownFlag("x".to_owned()).to_string(),
            "unknown logging flag `x` (expected repeat or level)"
        );
        assert_eq!(ConfigError::Empty.to_string(), "empty logging directive");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let config = LogConfig {
            level: Level::DEBUG,
            flags: LogFlags::SKIP_REPEATED,
            color: ColorChoice::Always,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"level":48,"flags":1,"color":"always"}"#);
        let parsed: LogConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let partial: LogConfig = serde_json::from_str(r#"{"level":24}"#).unwrap();
        assert_eq!(partial.level, Level::WARNING);
        assert_eq!(partial.color, ColorChoice::Auto);
    }
}
