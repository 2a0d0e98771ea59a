use crate::dashboard::profile::Profile;

#[derive(Debug)]
pub struct Config {
    pub api_url: String,
    pub profile: Profile,
    pub max_retries: u32,
    pub startup_description: String,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config '{name}'. Expected {expected}, got '{value}'")]
    InvalidValue {
        name: String,
        expected: &'static str,
        value: String,
    },
}
