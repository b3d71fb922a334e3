pub mod app_config;
pub mod config;
pub mod court;
pub mod dataset;
pub mod error;
pub mod query;
pub mod ranking;
pub mod render;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use court::{CourtCategory, Court, Sport, SportSet};
pub use dataset::{load_courts, load_courts_from_reader, summarize, DatasetSummary};
pub use error::{ConfigError, DatasetError, QueryError};
pub use query::{CourtFilter, NearestQuery, Origin, SportFilter};
pub use ranking::{rank_and_group, LocationGroup, RankedCourt};
pub use render::{render_groups, CourtEntry, LocationResult};
