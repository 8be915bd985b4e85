use super::aggregate::LoyaltyTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Справочник допустимых значений для генерации датасета.
///
/// Загружается из секции `[catalog]` конфигурации и не меняется после загрузки.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetCatalog {
    /// Префикс названия магазина, к которому добавляется город
    pub store_prefix: String,
    pub cities: Vec<String>,
    pub nationalities: Vec<String>,
    pub age_groups: Vec<String>,
    pub genders: Vec<String>,
    pub income_brackets: Vec<String>,
    pub product_categories: Vec<String>,
    /// Уровни для участников программы лояльности (без "None")
    pub loyalty_tiers: Vec<LoyaltyTier>,
    /// Месячный рекламный бюджет по категории товара
    pub ad_budgets: BTreeMap<String, u32>,
}

impl DatasetCatalog {
    pub fn ad_budget_for(&self, category: &str) -> Option<u32> {
        self.ad_budgets.get(category).copied()
    }

    pub fn store_location(&self, city: &str) -> String {
        format!("{} {}", self.store_prefix, city)
    }
}
