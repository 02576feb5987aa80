use sea_orm::DeriveActiveEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Lifecycle state of a job at a service provider.
///
/// A job's state is a point-in-time label, independent of its scheduled
/// start and end dates; a job can still be `Created` even though its date
/// window lies in the past.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "job_state")]
#[strum(serialize_all = "snake_case")]
pub enum JobState {
    /// Registered but not yet started.
    #[sea_orm(string_value = "created")]
    Created,
    /// Currently being worked on.
    #[sea_orm(string_value = "active")]
    Active,
    /// Finished; `completion_time` holds the measured duration.
    #[sea_orm(string_value = "completed")]
    Completed,
}
