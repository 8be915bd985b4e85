use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Заголовки CSV в фиксированном порядке колонок
pub const COLUMNS: [&str; 20] = [
    "Transaction_ID",
    "Customer_ID",
    "Transaction_Date",
    "Store_Location",
    "City",
    "Nationality",
    "Age_Group",
    "Gender",
    "Income_Bracket",
    "Product_Category",
    "Quantity",
    "Unit_Price",
    "Total_Amount",
    "Discount",
    "Final_Amount",
    "Is_Loyalty_Member",
    "Loyalty_Tier",
    "Loyalty_Points_Earned",
    "Loyalty_Points_Redeemed",
    "Monthly_Ad_Budget",
];

/// Уровень программы лояльности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    /// Покупатель не участвует в программе (в CSV пишется как "None")
    #[serde(rename = "None")]
    NotEnrolled,
}

impl LoyaltyTier {
    /// Уровни, доступные участникам программы
    pub const MEMBER_TIERS: [LoyaltyTier; 4] = [
        LoyaltyTier::Bronze,
        LoyaltyTier::Silver,
        LoyaltyTier::Gold,
        LoyaltyTier::Platinum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "Bronze",
            LoyaltyTier::Silver => "Silver",
            LoyaltyTier::Gold => "Gold",
            LoyaltyTier::Platinum => "Platinum",
            LoyaltyTier::NotEnrolled => "None",
        }
    }

    pub fn is_member_tier(&self) -> bool {
        !matches!(self, LoyaltyTier::NotEnrolled)
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoyaltyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Bronze" => Ok(LoyaltyTier::Bronze),
            "Silver" => Ok(LoyaltyTier::Silver),
            "Gold" => Ok(LoyaltyTier::Gold),
            "Platinum" => Ok(LoyaltyTier::Platinum),
            "None" => Ok(LoyaltyTier::NotEnrolled),
            other => Err(format!("Unknown loyalty tier: {}", other)),
        }
    }
}

/// Синтетическая розничная транзакция (одна строка датасета)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailTransaction {
    /// TXN00001, TXN00002, ...
    #[serde(rename = "Transaction_ID")]
    pub transaction_id: String,

    /// CUST0001..CUST0050
    #[serde(rename = "Customer_ID")]
    pub customer_id: String,

    /// Дата транзакции (YYYY-MM-DD)
    #[serde(rename = "Transaction_Date", with = "serde_date")]
    pub transaction_date: chrono::NaiveDate,

    /// "Lulu " + город
    #[serde(rename = "Store_Location")]
    pub store_location: String,

    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "Nationality")]
    pub nationality: String,

    #[serde(rename = "Age_Group")]
    pub age_group: String,

    #[serde(rename = "Gender")]
    pub gender: String,

    #[serde(rename = "Income_Bracket")]
    pub income_bracket: String,

    #[serde(rename = "Product_Category")]
    pub product_category: String,

    #[serde(rename = "Quantity")]
    pub quantity: u32,

    /// Цена за единицу (AED)
    #[serde(rename = "Unit_Price", with = "serde_money")]
    pub unit_price: f64,

    /// quantity * unit_price
    #[serde(rename = "Total_Amount", with = "serde_money")]
    pub total_amount: f64,

    #[serde(rename = "Discount", with = "serde_money")]
    pub discount: f64,

    /// total_amount - discount
    #[serde(rename = "Final_Amount", with = "serde_money")]
    pub final_amount: f64,

    #[serde(rename = "Is_Loyalty_Member")]
    pub is_loyalty_member: bool,

    #[serde(rename = "Loyalty_Tier")]
    pub loyalty_tier: LoyaltyTier,

    #[serde(rename = "Loyalty_Points_Earned")]
    pub loyalty_points_earned: u32,

    #[serde(rename = "Loyalty_Points_Redeemed")]
    pub loyalty_points_redeemed: u32,

    /// Месячный рекламный бюджет категории (AED)
    #[serde(rename = "Monthly_Ad_Budget")]
    pub monthly_ad_budget: u32,
}

impl RetailTransaction {
    /// Код транзакции по 1-based порядковому номеру
    pub fn transaction_code(sequence: usize) -> String {
        format!("TXN{:05}", sequence)
    }

    /// Код покупателя по номеру из пула
    pub fn customer_code(number: u32) -> String {
        format!("CUST{:04}", number)
    }
}

mod serde_date {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.format(FORMAT).to_string();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Денежные суммы всегда пишутся с двумя знаками после запятой
mod serde_money {
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.trim().parse::<f64>().map_err(serde::de::Error::custom)
    }
}
