//! 材料需求模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 材料需求計算輸入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequirementInput {
    /// 生產數量
    pub product_quantity: i64,

    /// 產品參數 1（例如長度）
    pub param1: Decimal,

    /// 產品參數 2（例如寬度）
    pub param2: Decimal,

    /// 材料現有庫存
    pub material_in_stock: Decimal,
}

impl MaterialRequirementInput {
    pub fn new(product_quantity: i64, param1: Decimal, param2: Decimal) -> Self {
        Self {
            product_quantity,
            param1,
            param2,
            material_in_stock: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置現有庫存
    pub fn with_stock(mut self, material_in_stock: Decimal) -> Self {
        self.material_in_stock = material_in_stock;
        self
    }
}

/// 材料需求請求（含外部解析用的類型識別碼）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRequest {
    pub product_type_id: i64,
    pub material_type_id: i64,
    #[serde(flatten)]
    pub input: MaterialRequirementInput,
}

impl RequirementRequest {
    pub fn new(product_type_id: i64, material_type_id: i64, input: MaterialRequirementInput) -> Self {
        Self {
            product_type_id,
            material_type_id,
            input,
        }
    }
}

/// 材料需求計算結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequirementResult {
    /// 需採購的整數單位數
    pub required_purchase_quantity: u64,

    /// 單位產品用量（param1 × param2 × 係數）
    pub material_per_unit: Decimal,

    /// 總用量（不含損耗）
    pub total_material_needed: Decimal,

    /// 含損耗總用量
    pub material_with_waste: Decimal,

    /// 扣除庫存後的缺口（不小於 0）
    pub material_to_purchase: Decimal,

    /// 庫存是否足夠
    pub is_stock_sufficient: bool,
}
