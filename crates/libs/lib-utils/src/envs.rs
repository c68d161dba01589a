//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, falling back to `default` when unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable, falling back to `default` when unset.
///
/// A variable that is set but unparsable is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match env::var(name) {
        Ok(val) => val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name)),
        Err(_) => Ok(default),
    }
}

/// Read a `1`/`true`/`yes` style flag.
pub fn get_env_bool(name: &'static str, default: bool) -> Result<bool, Error> {
    match env::var(name) {
        Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(Error::WrongFormat(name)),
        },
        Err(_) => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set in environment"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name; the process environment is shared.

    #[test]
    fn test_get_env_parse_or_default_when_unset() {
        let value: u64 = get_env_parse_or("LIB_UTILS_TEST_UNSET_U64", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_get_env_parse_or_rejects_garbage() {
        env::set_var("LIB_UTILS_TEST_GARBAGE_U64", "seven");
        let result: Result<u64, Error> = get_env_parse_or("LIB_UTILS_TEST_GARBAGE_U64", 7);
        assert!(matches!(result, Err(Error::WrongFormat("LIB_UTILS_TEST_GARBAGE_U64"))));
    }

    #[test]
    fn test_get_env_bool_variants() {
        env::set_var("LIB_UTILS_TEST_BOOL_ON", "Yes");
        env::set_var("LIB_UTILS_TEST_BOOL_OFF", "0");
        env::set_var("LIB_UTILS_TEST_BOOL_BAD", "maybe");

        assert!(get_env_bool("LIB_UTILS_TEST_BOOL_ON", false).unwrap());
        assert!(!get_env_bool("LIB_UTILS_TEST_BOOL_OFF", true).unwrap());
        assert!(get_env_bool("LIB_UTILS_TEST_BOOL_BAD", true).is_err());
        assert!(get_env_bool("LIB_UTILS_TEST_BOOL_UNSET", true).unwrap());
    }

    #[test]
    fn test_missing_env_message() {
        let err = get_env("LIB_UTILS_TEST_DEFINITELY_MISSING").unwrap_err();
        assert_eq!(err.to_string(), "LIB_UTILS_TEST_DEFINITELY_MISSING must be set in environment");
    }
}
