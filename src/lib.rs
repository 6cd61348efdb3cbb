//! # Catalog
//!
//! 製造目錄的材料需求與 BOM 成本引擎
//!
//! - [`catalog_core`]: 資料模型、錯誤類型、配置與外部協作者介面
//! - [`catalog_calc`]: 驗證、需求計算、成本定價、採購建議與目錄計算器

pub use catalog_calc;
pub use catalog_core;

pub use catalog_calc::{
    calculate_catalog_price, CalcWarning, CatalogCalculator, CatalogListing, CostCalculator,
    ProductCostReport, PurchaseAdvisor, RequirementCalculator, RequirementValidator,
};
pub use catalog_core::{CatalogError, EngineConfig, Result};
