//! 庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, Result};

/// 材料庫存水位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// 材料ID
    pub material_id: i64,

    /// 現有庫存
    pub current_stock: Decimal,

    /// 最低庫存
    pub min_stock: Decimal,

    /// 包裝規格（採購倍數）
    pub package_size: Decimal,
}

impl StockLevel {
    /// 創建新的庫存記錄，預設最低庫存 0、包裝規格 1
    pub fn new(material_id: i64, current_stock: Decimal) -> Self {
        Self {
            material_id,
            current_stock,
            min_stock: Decimal::ZERO,
            package_size: Decimal::ONE,
        }
    }

    /// 建構器模式：設置最低庫存
    pub fn with_min_stock(mut self, min_stock: Decimal) -> Self {
        self.min_stock = min_stock;
        self
    }

    /// 建構器模式：設置包裝規格
    pub fn with_package_size(mut self, package_size: Decimal) -> Self {
        self.package_size = package_size;
        self
    }

    /// 檢查現有庫存與最低庫存不為負
    pub fn check(&self) -> Result<()> {
        if self.current_stock < Decimal::ZERO {
            return Err(CatalogError::invalid(
                "current_stock",
                format!(
                    "材料 {} 的現有庫存不可為負，實際為 {}",
                    self.material_id, self.current_stock
                ),
            ));
        }
        if self.min_stock < Decimal::ZERO {
            return Err(CatalogError::invalid(
                "min_stock",
                format!(
                    "材料 {} 的最低庫存不可為負，實際為 {}",
                    self.material_id, self.min_stock
                ),
            ));
        }
        Ok(())
    }

    /// 庫存是否已達（或低於）最低庫存
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }

    /// 滿足需求還缺多少（不小於 0）
    pub fn shortfall(&self, required: Decimal) -> Decimal {
        if required > self.current_stock {
            required - self.current_stock
        } else {
            Decimal::ZERO
        }
    }
}

/// 低庫存採購建議
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockRecommendation {
    pub material_id: i64,
    /// 目標產量所需數量
    pub required_quantity: Decimal,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    /// 需要補足的數量
    pub need_to_purchase: Decimal,
    /// 建議採購量（包裝倍數）
    pub recommended_purchase: Decimal,
    pub is_low_stock: bool,
}
