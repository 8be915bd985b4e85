use crate::domain::a030_retail_transaction::LoyaltyTier;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Фильтр панели продаж.
///
/// Все условия объединяются через AND. Пустой список означает "все значения".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesFilter {
    /// Начало периода включительно
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Конец периода включительно
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub store_locations: Vec<String>,
    #[serde(default)]
    pub product_categories: Vec<String>,
    #[serde(default)]
    pub loyalty_tiers: Vec<LoyaltyTier>,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(default)]
    pub age_groups: Vec<String>,
    #[serde(default)]
    pub nationalities: Vec<String>,
    #[serde(default)]
    pub loyalty_member: Option<bool>,
}

/// Ключевые показатели по отфильтрованной выборке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesKpis {
    /// Сумма Final_Amount (AED)
    pub total_revenue: f64,
    pub transaction_count: usize,
    /// Средний чек, None если выборка пуста
    pub avg_transaction: Option<f64>,
    /// Доля транзакций участников программы лояльности, %
    pub loyalty_member_percent: f64,
    pub total_discount: f64,
    /// Сумма Monthly_Ad_Budget по строкам выборки
    pub total_ad_budget: f64,
    pub unique_customers: usize,
}

/// Сумма по одному значению группировки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub value: f64,
}

/// Сумма по паре значений (например, возрастная группа + пол)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesTotal {
    pub key: String,
    pub series: String,
    pub value: f64,
}

/// Количество строк по значению группировки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Выручка категории против её рекламного бюджета
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdBudgetVsSales {
    pub product_category: String,
    pub revenue: f64,
    pub ad_budget: u32,
}

/// Точка дневного тренда
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Доступные значения фильтров (значения по умолчанию для мультиселектов)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub date_range: Option<DateRange>,
    pub cities: Vec<String>,
    pub store_locations: Vec<String>,
    pub product_categories: Vec<String>,
    pub loyalty_tiers: Vec<LoyaltyTier>,
    pub genders: Vec<String>,
    pub age_groups: Vec<String>,
    pub nationalities: Vec<String>,
}

/// Ответ панели продаж: показатели и ряды для графиков
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesDashboardResponse {
    pub filter: SalesFilter,
    pub kpis: SalesKpis,
    pub date_range: Option<DateRange>,
    /// По возрастанию выручки
    pub sales_by_category: Vec<GroupTotal>,
    pub sales_by_city: Vec<GroupTotal>,
    pub sales_by_age_gender: Vec<SeriesTotal>,
    /// Только участники программы
    pub sales_by_loyalty_tier: Vec<GroupTotal>,
    pub ad_budget_vs_sales: Vec<AdBudgetVsSales>,
    /// По убыванию количества, не более 8 строк
    pub nationality_counts: Vec<GroupCount>,
    pub sales_by_income: Vec<GroupTotal>,
    /// По возрастанию даты
    pub daily_trend: Vec<DailyTotal>,
}
