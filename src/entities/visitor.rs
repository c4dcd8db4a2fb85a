use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Visit counter for one client address on one page.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visitor")]
pub struct Model {
    /// `"{ip}#{page_id}"`
    #[sea_orm(primary_key, auto_increment = false)]
    pub visitor_key: String,
    pub ip: String,
    pub page_id: String,
    pub visits: i64,
    pub source: String,
    pub confidence: i32,
    pub environment: String,
    /// JSON array of the other addresses seen on the last visit.
    #[sea_orm(column_type = "Text")]
    pub alternative_ips: String,
    pub first_seen_at: DateTimeWithTimeZone,
    pub last_seen_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
