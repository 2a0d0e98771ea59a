use crate::config::model::{Config, ConfigError};
use crate::dashboard::controller::DEFAULT_STARTUP_DESCRIPTION;
use crate::dashboard::profile::Profile;
use std::env;
use std::str::FromStr;

const DEFAULT_API_URL: &str = "http://localhost:5000";

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|name| env::var(name).ok())
}

pub fn load_config_from(var: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let api_url = var("EVENTMAP_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let profile = load_profile_config(&var, "EVENTMAP_PROFILE", Profile::StartupEvent)?;
    let max_retries = load_u32_config(&var, "EVENTMAP_MAX_RETRIES", 0)?;
    let startup_description = var("EVENTMAP_STARTUP_DESCRIPTION")
        .filter(|description| !description.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STARTUP_DESCRIPTION.to_string());

    Ok(Config {
        api_url,
        profile,
        max_retries,
        startup_description,
    })
}

fn load_profile_config(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: Profile,
) -> Result<Profile, ConfigError> {
    match var(name) {
        None => Ok(default),
        Some(value) => Profile::from_str(value.trim()).map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            expected: "one of 'startup_event', 'date_range' or 'single_date'",
            value,
        }),
    }
}

fn load_u32_config(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
) -> Result<u32, ConfigError> {
    match var(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            expected: "a non-negative integer number",
            value,
        }),
    }
}
