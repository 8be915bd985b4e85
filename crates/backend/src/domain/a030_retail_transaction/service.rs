use contracts::domain::a030_retail_transaction::{DatasetCatalog, LoyaltyTier, RetailTransaction};
use std::collections::HashSet;

use crate::shared::error::DatasetError;
use crate::shared::format::round2;

/// Check the catalog once before any record is generated.
///
/// Every domain must be non-empty and free of duplicates, the tier list may only
/// hold member tiers, and every product category needs an ad budget.
pub fn validate_catalog(catalog: &DatasetCatalog) -> Result<(), DatasetError> {
    if catalog.store_prefix.trim().is_empty() {
        return Err(DatasetError::InvalidStorePrefix);
    }

    let domains: [(&'static str, &[String]); 6] = [
        ("cities", &catalog.cities),
        ("nationalities", &catalog.nationalities),
        ("age_groups", &catalog.age_groups),
        ("genders", &catalog.genders),
        ("income_brackets", &catalog.income_brackets),
        ("product_categories", &catalog.product_categories),
    ];
    for (name, values) in domains {
        check_domain(name, values)?;
    }

    if catalog.loyalty_tiers.is_empty() {
        return Err(DatasetError::EmptyDomain("loyalty_tiers"));
    }
    let mut seen_tiers = HashSet::new();
    for tier in &catalog.loyalty_tiers {
        if !tier.is_member_tier() {
            return Err(DatasetError::InvalidLoyaltyTiers(tier.to_string()));
        }
        if !seen_tiers.insert(*tier) {
            return Err(DatasetError::DuplicateDomainValue {
                domain: "loyalty_tiers",
                value: tier.to_string(),
            });
        }
    }

    for category in &catalog.product_categories {
        if catalog.ad_budget_for(category).is_none() {
            return Err(DatasetError::MissingAdBudget(category.clone()));
        }
    }

    Ok(())
}

fn check_domain(name: &'static str, values: &[String]) -> Result<(), DatasetError> {
    if values.is_empty() {
        return Err(DatasetError::EmptyDomain(name));
    }
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(DatasetError::DuplicateDomainValue {
                domain: name,
                value: value.clone(),
            });
        }
    }
    Ok(())
}

/// Describe every derived-field inconsistency of a record; empty when the record is sound.
pub fn record_violations(record: &RetailTransaction) -> Vec<String> {
    let mut problems = Vec::new();

    let expected_total = round2(f64::from(record.quantity) * record.unit_price);
    if record.total_amount != expected_total {
        problems.push(format!(
            "total_amount {:.2} != quantity * unit_price {:.2}",
            record.total_amount, expected_total
        ));
    }

    let expected_final = round2(record.total_amount - record.discount);
    if record.final_amount != expected_final {
        problems.push(format!(
            "final_amount {:.2} != total_amount - discount {:.2}",
            record.final_amount, expected_final
        ));
    }
    if record.final_amount < 0.0 {
        problems.push(format!("final_amount {:.2} is negative", record.final_amount));
    }

    if record.is_loyalty_member {
        if record.loyalty_tier == LoyaltyTier::NotEnrolled {
            problems.push("loyalty member without a tier".to_string());
        }
    } else {
        if record.loyalty_tier != LoyaltyTier::NotEnrolled {
            problems.push(format!("non-member has tier {}", record.loyalty_tier));
        }
        if record.loyalty_points_earned != 0 || record.loyalty_points_redeemed != 0 {
            problems.push("non-member has loyalty points".to_string());
        }
    }

    problems
}
