//! Sub-type extension records for crowdfunding and seckill products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::ProductType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdfundingStatus {
    Funding,
    Success,
    Fail,
}

/// Funding progress of a crowdfunding product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrowdfundingInfo {
    pub target_amount: Decimal,
    pub total_amount: Decimal,
    pub user_count: u32,
    pub end_at: DateTime<Utc>,
    pub status: CrowdfundingStatus,
}

impl CrowdfundingInfo {
    /// Funded percentage, two decimal places. Zero when there is no target.
    pub fn percent(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return Decimal::ZERO;
        }
        (self.total_amount / self.target_amount * Decimal::ONE_HUNDRED).round_dp(2)
    }

    pub fn is_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_at
    }
}

/// Sale window of a seckill (flash-sale) product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeckillInfo {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl SeckillInfo {
    pub fn is_before_start(&self, now: DateTime<Utc>) -> bool {
        now < self.start_at
    }

    pub fn is_after_end(&self, now: DateTime<Utc>) -> bool {
        now > self.end_at
    }
}

/// Extension record; exactly one kind, matching the owning product's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProductExtension {
    Crowdfunding(CrowdfundingInfo),
    Seckill(SeckillInfo),
}

impl ProductExtension {
    pub fn product_type(&self) -> ProductType {
        match self {
            ProductExtension::Crowdfunding(_) => ProductType::Crowdfunding,
            ProductExtension::Seckill(_) => ProductType::Seckill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn funding(total: i64, target: i64) -> CrowdfundingInfo {
        CrowdfundingInfo {
            target_amount: Decimal::new(target, 0),
            total_amount: Decimal::new(total, 0),
            user_count: 3,
            end_at: at(12),
            status: CrowdfundingStatus::Funding,
        }
    }

    #[test]
    fn percent_is_rounded_to_two_places() {
        assert_eq!(funding(1, 3).percent(), Decimal::new(3333, 2));
        assert_eq!(funding(150, 100).percent(), Decimal::new(150, 0));
    }

    #[test]
    fn percent_is_zero_without_target() {
        assert_eq!(funding(10, 0).percent(), Decimal::ZERO);
    }

    #[test]
    fn crowdfunding_ends_at_end_time() {
        let info = funding(1, 1);
        assert!(!info.is_ended(at(11)));
        assert!(info.is_ended(at(12)));
    }

    #[test]
    fn seckill_window_bounds() {
        let info = SeckillInfo {
            start_at: at(10),
            end_at: at(11),
        };
        assert!(info.is_before_start(at(9)));
        assert!(!info.is_before_start(at(10)));
        assert!(!info.is_after_end(at(11)));
        assert!(info.is_after_end(at(11) + Duration::seconds(1)));
    }

    #[test]
    fn extension_reports_matching_product_type() {
        let ext = ProductExtension::Seckill(SeckillInfo {
            start_at: at(1),
            end_at: at(2),
        });
        assert_eq!(ext.product_type(), ProductType::Seckill);
        assert_eq!(
            ProductExtension::Crowdfunding(funding(0, 1)).product_type(),
            ProductType::Crowdfunding
        );
    }
}
