//! # Catalog Calculation Engine
//!
//! 材料需求、BOM 成本與採購建議計算引擎

pub mod catalog;
pub mod costing;
pub mod purchasing;
pub mod requirement;
pub mod validation;

// Re-export 主要類型
pub use catalog::{CatalogCalculator, CatalogEntry, CatalogListing, ProductCostReport};
pub use costing::{calculate_catalog_price, CostCalculator, ResolvedBom};
pub use purchasing::PurchaseAdvisor;
pub use requirement::RequirementCalculator;
pub use validation::RequirementValidator;

use serde::Serialize;

/// 計算警告（寬鬆模式下被跳過的資料）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalcWarning {
    /// 相關產品ID
    pub product_id: i64,
    /// 相關材料ID（若為行層級）
    pub material_id: Option<i64>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl CalcWarning {
    pub fn new(
        product_id: i64,
        material_id: Option<i64>,
        message: String,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            product_id,
            material_id,
            message,
            severity,
        }
    }

    /// BOM 行被跳過
    pub fn skipped_line(product_id: i64, material_id: i64, message: String) -> Self {
        Self::new(product_id, Some(material_id), message, WarningSeverity::Warning)
    }

    /// 整個產品被跳過
    pub fn skipped_product(product_id: i64, message: String) -> Self {
        Self::new(product_id, None, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
