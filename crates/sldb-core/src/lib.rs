mod app_config;
mod config;
pub mod hours;
pub mod location;
pub mod query;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use hours::{parse_weekly_hours, HoursKind, HoursParseError, WeeklyHours};
pub use location::{normalize, LocationRecord, LocationRow};
pub use query::{CityName, Page, ParamError, StateCode, PAGE_SIZE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
