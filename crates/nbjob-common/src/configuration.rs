use config::ConfigError;
use serde::de::DeserializeOwned;
use std::env;
use std::path::PathBuf;

/// Load layered settings: `base.yaml`, then `{environment}.yaml`, then
/// `APP_*` environment variables with `__` separators
/// (e.g. `APP_DATABRICKS__HOST` sets `databricks.host`).
///
/// Both files are optional so the CLI can run from any directory with
/// nothing but environment variables. The directory defaults to
/// `./configuration` and can be moved with `CONFIG_PATH`.
pub fn get_configuration<T: DeserializeOwned + std::fmt::Display>() -> Result<T, ConfigError> {
    let configuration_directory = env::var("CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            env::current_dir()
                .expect("Failed to determine the current directory")
                .join("configuration")
        });

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");

    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(
            config::File::from(configuration_directory.join("base.yaml")).required(false),
        )
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<T>()
}

pub enum Environment {
    Local,
    Production,
    CI,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
            Environment::CI => "ci",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    /// Case insensitive, only "local", "ci" and "production" are accepted.
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            "ci" => Ok(Self::CI),
            other => Err(format!(
                "{} is not a supported environment. Use either `local`, `ci` or `production`.",
                other
            )),
        }
    }
}
