use sea_orm::DeriveActiveEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Role a platform account plays in the provider/customer relationship.
///
/// Every account is exactly one of the two; the role decides which side of
/// the order relationship the account can appear on.
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    /// Manages customers and places orders on their behalf.
    #[sea_orm(string_value = "account_manager")]
    AccountManager,
    /// Orders jobs from service providers.
    #[sea_orm(string_value = "customer")]
    Customer,
}
