//! Synthetic retail transaction generator.
//!
//! Records are sampled one by one from an injected random source. The draw
//! order is fixed, so the same seed and reference time always yield the same
//! table.

use chrono::{Duration, NaiveDateTime};
use contracts::domain::a030_retail_transaction::{DatasetCatalog, LoyaltyTier, RetailTransaction};
use rand::seq::SliceRandom;
use rand::Rng;

use super::service::validate_catalog;
use crate::shared::error::DatasetError;
use crate::shared::format::round2;

/// Size of the simulated customer pool (CUST0001..CUST0050).
pub const CUSTOMER_POOL: u32 = 50;
/// Trailing window for transaction dates, in days.
pub const MAX_DAYS_AGO: i64 = 180;
pub const MAX_QUANTITY: u32 = 10;
pub const MIN_UNIT_PRICE: f64 = 10.0;
pub const MAX_UNIT_PRICE: f64 = 500.0;
/// Upper bound (exclusive) of the discount fraction.
pub const MAX_DISCOUNT_RATE: f64 = 0.3;
pub const POINTS_PER_AED: f64 = 0.1;
/// A member redeems points when the redeem draw exceeds this value.
pub const REDEEM_THRESHOLD: f64 = 0.7;
pub const MAX_REDEEMED_POINTS: u32 = 100;

/// Transaction generator bound to a validated catalog and a random source.
pub struct RecordGenerator<'a, R: Rng> {
    catalog: &'a DatasetCatalog,
    rng: R,
    now: NaiveDateTime,
    next_sequence: usize,
}

impl<'a, R: Rng> RecordGenerator<'a, R> {
    /// Validates the catalog up front; a broken catalog never produces records.
    pub fn new(catalog: &'a DatasetCatalog, rng: R, now: NaiveDateTime) -> Result<Self, DatasetError> {
        validate_catalog(catalog)?;
        Ok(Self {
            catalog,
            rng,
            now,
            next_sequence: 1,
        })
    }

    /// Generate exactly `count` records. Zero or negative counts are rejected.
    pub fn generate(&mut self, count: i64) -> Result<Vec<RetailTransaction>, DatasetError> {
        if count <= 0 {
            return Err(DatasetError::InvalidRecordCount(count));
        }
        let count = usize::try_from(count).map_err(|_| DatasetError::InvalidRecordCount(count))?;

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.next_record()?);
        }
        Ok(records)
    }

    fn next_record(&mut self) -> Result<RetailTransaction, DatasetError> {
        let catalog = self.catalog;

        let transaction_id = RetailTransaction::transaction_code(self.next_sequence);
        self.next_sequence += 1;

        let customer_id = RetailTransaction::customer_code(self.rng.gen_range(1..=CUSTOMER_POOL));
        let days_ago = self.rng.gen_range(0..=MAX_DAYS_AGO);
        let transaction_date = (self.now - Duration::days(days_ago)).date();

        let city = pick(&mut self.rng, &catalog.cities, "cities")?.clone();
        let nationality = pick(&mut self.rng, &catalog.nationalities, "nationalities")?.clone();
        let age_group = pick(&mut self.rng, &catalog.age_groups, "age_groups")?.clone();
        let gender = pick(&mut self.rng, &catalog.genders, "genders")?.clone();
        let income_bracket = pick(&mut self.rng, &catalog.income_brackets, "income_brackets")?.clone();
        let product_category =
            pick(&mut self.rng, &catalog.product_categories, "product_categories")?.clone();

        let quantity = self.rng.gen_range(1..=MAX_QUANTITY);
        let unit_price = round2(self.rng.gen_range(MIN_UNIT_PRICE..=MAX_UNIT_PRICE));
        let total_amount = round2(f64::from(quantity) * unit_price);
        let discount = round2(self.rng.gen_range(0.0..MAX_DISCOUNT_RATE) * total_amount);
        let final_amount = round2(total_amount - discount);

        let is_loyalty_member: bool = self.rng.gen();
        let loyalty_tier = if is_loyalty_member {
            *pick(&mut self.rng, &catalog.loyalty_tiers, "loyalty_tiers")?
        } else {
            LoyaltyTier::NotEnrolled
        };
        let loyalty_points_earned = if is_loyalty_member {
            (final_amount * POINTS_PER_AED).floor() as u32
        } else {
            0
        };
        // Redeemed points do not depend on the points earned.
        let loyalty_points_redeemed =
            if is_loyalty_member && self.rng.gen::<f64>() > REDEEM_THRESHOLD {
                self.rng.gen_range(0..=MAX_REDEEMED_POINTS)
            } else {
                0
            };

        let monthly_ad_budget = catalog
            .ad_budget_for(&product_category)
            .ok_or_else(|| DatasetError::MissingAdBudget(product_category.clone()))?;
        let store_location = catalog.store_location(&city);

        Ok(RetailTransaction {
            transaction_id,
            customer_id,
            transaction_date,
            store_location,
            city,
            nationality,
            age_group,
            gender,
            income_bracket,
            product_category,
            quantity,
            unit_price,
            total_amount,
            discount,
            final_amount,
            is_loyalty_member,
            loyalty_tier,
            loyalty_points_earned,
            loyalty_points_redeemed,
            monthly_ad_budget,
        })
    }
}

fn pick<'v, T, R: Rng>(rng: &mut R, values: &'v [T], domain: &'static str) -> Result<&'v T, DatasetError> {
    values.choose(rng).ok_or(DatasetError::EmptyDomain(domain))
}

/// One-shot helper: validate, seed a generator and build the full table.
pub fn generate_dataset<R: Rng>(
    catalog: &DatasetCatalog,
    rng: R,
    now: NaiveDateTime,
    count: i64,
) -> Result<Vec<RetailTransaction>, DatasetError> {
    RecordGenerator::new(catalog, rng, now)?.generate(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a030_retail_transaction::service::record_violations;
    use crate::shared::config::default_config;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> DatasetCatalog {
        default_config().unwrap().catalog
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 30)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn generate(count: i64, seed: u64) -> Vec<RetailTransaction> {
        generate_dataset(&catalog(), StdRng::seed_from_u64(seed), now(), count).unwrap()
    }

    #[test]
    fn test_generates_exact_count() {
        assert_eq!(generate(100, 42).len(), 100);
        assert_eq!(generate(7, 1).len(), 7);
    }

    #[test]
    fn test_single_record_boundary() {
        let records = generate(1, 42);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transaction_id, "TXN00001");
        assert!(record_violations(&records[0]).is_empty());
    }

    #[test]
    fn test_zero_and_negative_counts_rejected() {
        let catalog = catalog();
        for count in [0, -5] {
            let result = generate_dataset(&catalog, StdRng::seed_from_u64(42), now(), count);
            assert_eq!(result, Err(DatasetError::InvalidRecordCount(count)));
        }
    }

    #[test]
    fn test_broken_catalog_rejected_before_generation() {
        let mut catalog = catalog();
        catalog.ad_budgets.remove("Electronics");
        let result = RecordGenerator::new(&catalog, StdRng::seed_from_u64(42), now());
        assert!(matches!(result, Err(DatasetError::MissingAdBudget(ref c)) if c == "Electronics"));
    }

    #[test]
    fn test_amount_arithmetic() {
        for r in generate(500, 3) {
            assert_eq!(r.total_amount, round2(f64::from(r.quantity) * r.unit_price));
            assert_eq!(r.final_amount, round2(r.total_amount - r.discount));
            assert!(r.final_amount >= 0.0);
            assert!(r.discount >= 0.0 && r.discount <= round2(r.total_amount * MAX_DISCOUNT_RATE));
            assert!((1..=MAX_QUANTITY).contains(&r.quantity));
            assert!(r.unit_price >= MIN_UNIT_PRICE && r.unit_price <= MAX_UNIT_PRICE);
            assert_eq!(r.unit_price, round2(r.unit_price));
        }
    }

    #[test]
    fn test_loyalty_consistency() {
        let records = generate(500, 11);
        assert!(records.iter().any(|r| r.is_loyalty_member));
        assert!(records.iter().any(|r| !r.is_loyalty_member));

        for r in &records {
            if r.is_loyalty_member {
                assert!(LoyaltyTier::MEMBER_TIERS.contains(&r.loyalty_tier));
                assert_eq!(
                    r.loyalty_points_earned,
                    (r.final_amount * POINTS_PER_AED).floor() as u32
                );
                assert!(r.loyalty_points_redeemed <= MAX_REDEEMED_POINTS);
            } else {
                assert_eq!(r.loyalty_tier, LoyaltyTier::NotEnrolled);
                assert_eq!(r.loyalty_points_earned, 0);
                assert_eq!(r.loyalty_points_redeemed, 0);
            }
        }
    }

    #[test]
    fn test_members_cover_every_tier_and_both_redeem_outcomes() {
        let members: Vec<RetailTransaction> = generate(500, 11)
            .into_iter()
            .filter(|r| r.is_loyalty_member)
            .collect();

        for tier in LoyaltyTier::MEMBER_TIERS {
            assert!(
                members.iter().any(|r| r.loyalty_tier == tier),
                "no member drew {}",
                tier
            );
        }
        assert!(members.iter().any(|r| r.loyalty_points_redeemed > 0));
        assert!(members.iter().any(|r| r.loyalty_points_redeemed == 0));

        // ~30% of members redeem (draw above 0.7)
        let redeeming = members.iter().filter(|r| r.loyalty_points_redeemed > 0).count();
        let share = redeeming as f64 / members.len() as f64;
        assert!(share > 0.15 && share < 0.45, "redeem share {}", share);
    }

    #[test]
    fn test_transaction_ids_strictly_increasing() {
        let records = generate(100, 42);
        let ids: Vec<&str> = records.iter().map(|r| r.transaction_id.as_str()).collect();
        assert_eq!(ids[0], "TXN00001");
        assert_eq!(ids[99], "TXN00100");
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_customer_ids_from_pool() {
        for r in generate(300, 5) {
            let n: u32 = r.customer_id.trim_start_matches("CUST").parse().unwrap();
            assert_eq!(r.customer_id.len(), 8);
            assert!((1..=CUSTOMER_POOL).contains(&n));
        }
    }

    #[test]
    fn test_dates_within_trailing_window() {
        let today = now().date();
        for r in generate(300, 8) {
            assert!(r.transaction_date <= today);
            assert!(r.transaction_date >= today - Duration::days(MAX_DAYS_AGO));
        }
    }

    #[test]
    fn test_ad_budget_and_store_follow_catalog() {
        let catalog = catalog();
        for r in generate(300, 9) {
            assert_eq!(Some(r.monthly_ad_budget), catalog.ad_budget_for(&r.product_category));
            assert_eq!(r.store_location, format!("Lulu {}", r.city));
            if r.product_category == "Electronics" {
                assert_eq!(r.monthly_ad_budget, 80000);
            }
            if r.product_category == "Books & Stationery" {
                assert_eq!(r.monthly_ad_budget, 25000);
            }
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        assert_eq!(generate(100, 42), generate(100, 42));
        assert_ne!(generate(100, 42), generate(100, 43));
    }

    #[test]
    fn test_generator_continues_sequence() {
        let catalog = catalog();
        let mut generator = RecordGenerator::new(&catalog, StdRng::seed_from_u64(1), now()).unwrap();
        let first = generator.generate(2).unwrap();
        let second = generator.generate(1).unwrap();
        assert_eq!(first[1].transaction_id, "TXN00002");
        assert_eq!(second[0].transaction_id, "TXN00003");
    }
}
