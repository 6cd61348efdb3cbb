//! 輸入驗證
//!
//! 每個欄位獨立檢查，所有錯誤一次回傳，讓介面可以同時顯示。

use catalog_core::{
    EngineConfig, MaterialRequirementInput, RequirementRequest, Result, ValidationErrors,
};
use rust_decimal::Decimal;

/// 材料需求輸入驗證器
pub struct RequirementValidator;

impl RequirementValidator {
    /// 驗證計算輸入
    pub fn validate_input(input: &MaterialRequirementInput, config: &EngineConfig) -> Result<()> {
        Self::collect_input(input, config).into_result()
    }

    /// 驗證完整請求（含類型識別碼）
    pub fn validate_request(request: &RequirementRequest, config: &EngineConfig) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if request.product_type_id <= 0 {
            errors.add(
                "product_type_id",
                format!("產品類型ID必須為正數，實際為 {}", request.product_type_id),
            );
        }
        if request.material_type_id <= 0 {
            errors.add(
                "material_type_id",
                format!("材料類型ID必須為正數，實際為 {}", request.material_type_id),
            );
        }
        errors.extend(Self::collect_input(&request.input, config));
        errors.into_result()
    }

    fn collect_input(input: &MaterialRequirementInput, config: &EngineConfig) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if input.product_quantity <= 0 {
            errors.add(
                "product_quantity",
                format!("生產數量必須大於 0，實際為 {}", input.product_quantity),
            );
        }
        Self::check_dimension(&mut errors, "param1", input.param1, config);
        Self::check_dimension(&mut errors, "param2", input.param2, config);
        if input.material_in_stock < Decimal::ZERO {
            errors.add(
                "material_in_stock",
                format!("庫存不可為負，實際為 {}", input.material_in_stock),
            );
        }

        errors
    }

    fn check_dimension(
        errors: &mut ValidationErrors,
        field: &'static str,
        value: Decimal,
        config: &EngineConfig,
    ) {
        if value < Decimal::ZERO {
            errors.add(field, format!("參數不可為負，實際為 {}", value));
        } else if value.is_zero() && !config.allow_zero_dimensions {
            errors.add(field, "參數必須大於 0");
        }
    }
}
