use sea_orm::entity::prelude::*;
use sea_orm::prelude::Decimal;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "investment_package", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub level: i32,
    pub name: String,
    pub is_active: bool,
    /// Comma separated referral depths this package pays, e.g. "1,2,3".
    pub levels_enabled: String,
    pub profit_share_level_1: Decimal,
    pub profit_share_level_2: Decimal,
    pub profit_share_level_3: Decimal,
    pub profit_share_level_4: Decimal,
    pub profit_share_level_5: Decimal,
    pub profit_share_level_6: Decimal,
    pub commission_level_1: Decimal,
    pub commission_level_2: Decimal,
    pub commission_level_3: Decimal,
    pub commission_level_4: Decimal,
    pub commission_level_5: Decimal,
    pub commission_level_6: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn enabled_depths(&self) -> Vec<u32> {
        self.levels_enabled
            .split(',')
            .filter_map(|d| d.trim().parse::<u32>().ok())
            .collect()
    }

    /// Percentage paid at a referral depth. Packages migrated from the old
    /// schema only carry `commission_level_<n>`, so a zero primary value
    /// falls back to the legacy column.
    pub fn profit_share_percentage(&self, depth: u32) -> Decimal {
        let (primary, legacy) = match depth {
            1 => (self.profit_share_level_1, self.commission_level_1),
            2 => (self.profit_share_level_2, self.commission_level_2),
            3 => (self.profit_share_level_3, self.commission_level_3),
            4 => (self.profit_share_level_4, self.commission_level_4),
            5 => (self.profit_share_level_5, self.commission_level_5),
            6 => (self.profit_share_level_6, self.commission_level_6),
            _ => return Decimal::ZERO,
        };
        if primary.is_zero() {
            legacy
        } else {
            primary
        }
    }
}
