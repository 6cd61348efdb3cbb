//! 物料清單（BOM）與成本結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, Result};

/// BOM 行：單位產品所需的一種材料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillOfMaterialsLine {
    /// 材料ID
    pub material_id: i64,

    /// 單位用量（必須大於 0）
    pub quantity_per_unit: Decimal,

    /// 材料單位成本（不可為負）
    pub cost_per_unit: Decimal,
}

impl BillOfMaterialsLine {
    /// 創建新的 BOM 行，並檢查用量與成本
    pub fn new(material_id: i64, quantity_per_unit: Decimal, cost_per_unit: Decimal) -> Result<Self> {
        let line = Self {
            material_id,
            quantity_per_unit,
            cost_per_unit,
        };
        line.check()?;
        Ok(line)
    }

    /// 檢查用量為正、成本非負
    ///
    /// 反序列化得到的 BOM 行不會經過 [`BillOfMaterialsLine::new`]，計算前需再檢查一次。
    pub fn check(&self) -> Result<()> {
        if self.quantity_per_unit <= Decimal::ZERO {
            return Err(CatalogError::invalid(
                "quantity_per_unit",
                format!(
                    "材料 {} 的單位用量必須大於 0，實際為 {}",
                    self.material_id, self.quantity_per_unit
                ),
            ));
        }
        if self.cost_per_unit < Decimal::ZERO {
            return Err(CatalogError::invalid(
                "cost_per_unit",
                format!(
                    "材料 {} 的單位成本不可為負，實際為 {}",
                    self.material_id, self.cost_per_unit
                ),
            ));
        }
        Ok(())
    }
}

/// 成本明細行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine {
    pub material_id: i64,
    /// 批量所需材料數量
    pub quantity_needed: Decimal,
    /// 材料單位成本
    pub unit_cost: Decimal,
    /// 小計
    pub line_total: Decimal,
}

/// 產品成本計算結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCostResult {
    /// 批量總成本
    pub total_cost: Decimal,
    /// 單位成本
    pub cost_per_unit: Decimal,
    /// 成本明細
    pub lines: Vec<CostLine>,
}
