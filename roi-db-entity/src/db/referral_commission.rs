use sea_orm::entity::prelude::*;
use sea_orm::prelude::Decimal;

pub const SOURCE_ROI_PROFIT_SHARE: &str = "roi_profit_share";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "referral_commission", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub commission_id: String,
    /// Upline user receiving the commission.
    pub user_id: String,
    pub from_user_id: String,
    pub from_user_name: String,
    pub staking_id: String,
    pub commission_type: String,
    pub level_depth: i16,
    pub percentage: Decimal,
    pub amount: Decimal,
    pub source_type: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
