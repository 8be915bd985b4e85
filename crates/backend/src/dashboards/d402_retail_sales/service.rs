use contracts::dashboards::d402_retail_sales::{
    AdBudgetVsSales, DailyTotal, DateRange, FilterOptions, GroupCount, GroupTotal,
    SalesDashboardResponse, SalesFilter, SalesKpis, SeriesTotal,
};
use contracts::domain::a030_retail_transaction::{LoyaltyTier, RetailTransaction};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::shared::format::round2;

const TOP_NATIONALITIES: usize = 8;

/// Empty list means "no restriction".
fn allowed<T: PartialEq>(options: &[T], value: &T) -> bool {
    options.is_empty() || options.contains(value)
}

/// Does the record satisfy every condition of the filter
pub fn matches_filter(record: &RetailTransaction, filter: &SalesFilter) -> bool {
    if let Some(from) = filter.date_from {
        if record.transaction_date < from {
            return false;
        }
    }
    if let Some(to) = filter.date_to {
        if record.transaction_date > to {
            return false;
        }
    }
    if let Some(member) = filter.loyalty_member {
        if record.is_loyalty_member != member {
            return false;
        }
    }

    allowed(&filter.cities, &record.city)
        && allowed(&filter.store_locations, &record.store_location)
        && allowed(&filter.product_categories, &record.product_category)
        && allowed(&filter.loyalty_tiers, &record.loyalty_tier)
        && allowed(&filter.genders, &record.gender)
        && allowed(&filter.age_groups, &record.age_group)
        && allowed(&filter.nationalities, &record.nationality)
}

pub fn apply_filter<'a>(
    records: &'a [RetailTransaction],
    filter: &SalesFilter,
) -> Vec<&'a RetailTransaction> {
    records.iter().filter(|r| matches_filter(r, filter)).collect()
}

pub fn compute_kpis(rows: &[&RetailTransaction]) -> SalesKpis {
    let transaction_count = rows.len();
    let total_revenue: f64 = rows.iter().map(|r| r.final_amount).sum();
    let total_discount: f64 = rows.iter().map(|r| r.discount).sum();
    let total_ad_budget: f64 = rows.iter().map(|r| f64::from(r.monthly_ad_budget)).sum();
    let members = rows.iter().filter(|r| r.is_loyalty_member).count();
    let unique_customers = rows
        .iter()
        .map(|r| r.customer_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let (avg_transaction, loyalty_member_percent) = if transaction_count == 0 {
        (None, 0.0)
    } else {
        let n = transaction_count as f64;
        (Some(round2(total_revenue / n)), members as f64 / n * 100.0)
    };

    SalesKpis {
        total_revenue: round2(total_revenue),
        transaction_count,
        avg_transaction,
        loyalty_member_percent,
        total_discount: round2(total_discount),
        total_ad_budget,
        unique_customers,
    }
}

/// Sum of Final_Amount by key, ordered by key
fn revenue_by<F>(rows: &[&RetailTransaction], key: F) -> Vec<GroupTotal>
where
    F: Fn(&RetailTransaction) -> String,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        *totals.entry(key(row)).or_insert(0.0) += row.final_amount;
    }
    totals
        .into_iter()
        .map(|(key, value)| GroupTotal {
            key,
            value: round2(value),
        })
        .collect()
}

/// Category revenue, smallest first (horizontal bar chart order)
pub fn sales_by_category(rows: &[&RetailTransaction]) -> Vec<GroupTotal> {
    let mut totals = revenue_by(rows, |r| r.product_category.clone());
    totals.sort_by(|a, b| a.value.total_cmp(&b.value).then_with(|| a.key.cmp(&b.key)));
    totals
}

pub fn sales_by_city(rows: &[&RetailTransaction]) -> Vec<GroupTotal> {
    revenue_by(rows, |r| r.city.clone())
}

pub fn sales_by_income(rows: &[&RetailTransaction]) -> Vec<GroupTotal> {
    revenue_by(rows, |r| r.income_bracket.clone())
}

/// Member revenue by tier; non-members are left out
pub fn sales_by_loyalty_tier(rows: &[&RetailTransaction]) -> Vec<GroupTotal> {
    let mut totals: BTreeMap<LoyaltyTier, f64> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.loyalty_tier.is_member_tier()) {
        *totals.entry(row.loyalty_tier).or_insert(0.0) += row.final_amount;
    }
    totals
        .into_iter()
        .map(|(tier, value)| GroupTotal {
            key: tier.to_string(),
            value: round2(value),
        })
        .collect()
}

pub fn sales_by_age_gender(rows: &[&RetailTransaction]) -> Vec<SeriesTotal> {
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();
    for row in rows {
        *totals
            .entry((row.age_group.clone(), row.gender.clone()))
            .or_insert(0.0) += row.final_amount;
    }
    totals
        .into_iter()
        .map(|((key, series), value)| SeriesTotal {
            key,
            series,
            value: round2(value),
        })
        .collect()
}

/// Revenue per category next to the category's monthly ad budget
pub fn ad_budget_vs_sales(rows: &[&RetailTransaction]) -> Vec<AdBudgetVsSales> {
    let mut totals: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
    for row in rows {
        let entry = totals
            .entry(row.product_category.as_str())
            .or_insert((0.0, row.monthly_ad_budget));
        entry.0 += row.final_amount;
    }
    totals
        .into_iter()
        .map(|(category, (revenue, ad_budget))| AdBudgetVsSales {
            product_category: category.to_string(),
            revenue: round2(revenue),
            ad_budget,
        })
        .collect()
}

/// Row counts per nationality, most frequent first, top 8
pub fn nationality_counts(rows: &[&RetailTransaction]) -> Vec<GroupCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.nationality.as_str()).or_insert(0) += 1;
    }
    let mut result: Vec<GroupCount> = counts
        .into_iter()
        .map(|(key, count)| GroupCount {
            key: key.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    result.truncate(TOP_NATIONALITIES);
    result
}

pub fn daily_trend(rows: &[&RetailTransaction]) -> Vec<DailyTotal> {
    let mut totals = BTreeMap::new();
    for row in rows {
        *totals.entry(row.transaction_date).or_insert(0.0) += row.final_amount;
    }
    totals
        .into_iter()
        .map(|(date, value)| DailyTotal {
            date,
            value: round2(value),
        })
        .collect()
}

pub fn date_range(rows: &[&RetailTransaction]) -> Option<DateRange> {
    let date_from = rows.iter().map(|r| r.transaction_date).min()?;
    let date_to = rows.iter().map(|r| r.transaction_date).max()?;
    Some(DateRange { date_from, date_to })
}

/// Distinct values of every filterable column, sorted
pub fn filter_options(records: &[RetailTransaction]) -> FilterOptions {
    fn distinct<F>(records: &[RetailTransaction], f: F) -> Vec<String>
    where
        F: Fn(&RetailTransaction) -> &str,
    {
        records
            .iter()
            .map(|r| f(r))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    let all: Vec<&RetailTransaction> = records.iter().collect();
    FilterOptions {
        date_range: date_range(&all),
        cities: distinct(records, |r| r.city.as_str()),
        store_locations: distinct(records, |r| r.store_location.as_str()),
        product_categories: distinct(records, |r| r.product_category.as_str()),
        loyalty_tiers: records
            .iter()
            .map(|r| r.loyalty_tier)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        genders: distinct(records, |r| r.gender.as_str()),
        age_groups: distinct(records, |r| r.age_group.as_str()),
        nationalities: distinct(records, |r| r.nationality.as_str()),
    }
}

/// Filter the table and compute every dashboard indicator and chart series
pub fn build_dashboard(records: &[RetailTransaction], filter: &SalesFilter) -> SalesDashboardResponse {
    let rows = apply_filter(records, filter);
    tracing::info!(
        "Dashboard filter kept {} of {} transactions",
        rows.len(),
        records.len()
    );

    SalesDashboardResponse {
        filter: filter.clone(),
        kpis: compute_kpis(&rows),
        date_range: date_range(&rows),
        sales_by_category: sales_by_category(&rows),
        sales_by_city: sales_by_city(&rows),
        sales_by_age_gender: sales_by_age_gender(&rows),
        sales_by_loyalty_tier: sales_by_loyalty_tier(&rows),
        ad_budget_vs_sales: ad_budget_vs_sales(&rows),
        nationality_counts: nationality_counts(&rows),
        sales_by_income: sales_by_income(&rows),
        daily_trend: daily_trend(&rows),
    }
}
