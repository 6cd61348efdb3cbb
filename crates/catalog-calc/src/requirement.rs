//! 材料需求計算

use catalog_core::quantity::{ceil_to_count, checked_multiply};
use catalog_core::{
    EngineConfig, MaterialRequirementInput, MaterialRequirementResult, MaterialWasteRate,
    ProductTypeCoefficient, Result,
};
use rust_decimal::Decimal;

use crate::validation::RequirementValidator;

/// 材料需求計算器
pub struct RequirementCalculator;

impl RequirementCalculator {
    /// 計算生產批量需要採購多少整數單位的材料
    ///
    /// 1. 單位用量 = param1 × param2 × 類型係數
    /// 2. 總用量 = 單位用量 × 生產數量
    /// 3. 含損耗 = 總用量 × (1 + 損耗率 / 100)
    /// 4. 缺口 = 含損耗 − 庫存
    /// 5. 缺口在容差內視為庫存足夠，採購量為 0；否則向上取整
    pub fn calculate(
        input: &MaterialRequirementInput,
        coefficient: ProductTypeCoefficient,
        waste_rate: MaterialWasteRate,
        config: &EngineConfig,
    ) -> Result<MaterialRequirementResult> {
        config.validate()?;
        RequirementValidator::validate_input(input, config)?;

        let material_per_unit = checked_multiply(
            checked_multiply(input.param1, input.param2, "material_per_unit")?,
            coefficient.value(),
            "material_per_unit",
        )?;
        let total_material_needed = checked_multiply(
            material_per_unit,
            Decimal::from(input.product_quantity),
            "total_material_needed",
        )?;
        let material_with_waste = checked_multiply(
            total_material_needed,
            waste_rate.multiplier(),
            "material_with_waste",
        )?;

        let shortage = material_with_waste - input.material_in_stock;
        let is_stock_sufficient = shortage <= config.unit_tolerance;
        let required_purchase_quantity = if is_stock_sufficient {
            0
        } else {
            ceil_to_count(shortage, config.unit_tolerance)?
        };

        tracing::debug!(
            "材料需求: 單位用量 {}, 總用量 {}, 含損耗 {}, 庫存 {}, 採購 {}",
            material_per_unit,
            total_material_needed,
            material_with_waste,
            input.material_in_stock,
            required_purchase_quantity
        );

        Ok(MaterialRequirementResult {
            required_purchase_quantity,
            material_per_unit,
            total_material_needed,
            material_with_waste,
            material_to_purchase: shortage.max(Decimal::ZERO),
            is_stock_sufficient,
        })
    }
}
