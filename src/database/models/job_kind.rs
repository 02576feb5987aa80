use sea_orm::DeriveActiveEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Kind of work a job represents; completion times are reported per kind.
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "job_kind")]
#[strum(serialize_all = "snake_case")]
pub enum JobKind {
    #[sea_orm(string_value = "regular")]
    Regular,
    #[sea_orm(string_value = "wafer_run")]
    WaferRun,
}
