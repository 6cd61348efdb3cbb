//! 低庫存與採購建議

use std::collections::HashMap;

use catalog_core::quantity::{checked_add, checked_multiply, round_up_to_package};
use catalog_core::{
    BillOfMaterialsLine, CatalogError, EntityKind, LowStockRecommendation, Result, StockLevel,
};
use rust_decimal::Decimal;

/// 採購建議計算器
pub struct PurchaseAdvisor;

impl PurchaseAdvisor {
    /// 依目標產量為每種材料產生採購建議
    ///
    /// 同一材料的多筆 BOM 行會先加總需求（庫存以材料為單位）。
    /// 輸出順序依材料在 BOM 中首次出現的位置。
    pub fn recommend_purchases(
        lines: &[BillOfMaterialsLine],
        target_quantity: i64,
        stock_levels: &HashMap<i64, StockLevel>,
        tolerance: Decimal,
    ) -> Result<Vec<LowStockRecommendation>> {
        if target_quantity <= 0 {
            return Err(CatalogError::invalid(
                "target_quantity",
                format!("目標產量必須大於 0，實際為 {}", target_quantity),
            ));
        }

        let target = Decimal::from(target_quantity);
        let mut requirements: Vec<(i64, Decimal)> = Vec::new();
        for line in lines {
            line.check()?;
            let required = checked_multiply(line.quantity_per_unit, target, "required_quantity")?;
            match requirements.iter_mut().find(|(id, _)| *id == line.material_id) {
                Some((_, total)) => *total = checked_add(*total, required, "required_quantity")?,
                None => requirements.push((line.material_id, required)),
            }
        }

        requirements
            .into_iter()
            .map(|(material_id, required_quantity)| -> Result<LowStockRecommendation> {
                let stock = stock_levels
                    .get(&material_id)
                    .ok_or(CatalogError::NotFound {
                        kind: EntityKind::Stock,
                        id: material_id,
                    })?;
                Self::recommend(stock, required_quantity, tolerance)
            })
            .collect()
    }

    /// 單一材料的採購建議
    pub fn recommend(
        stock: &StockLevel,
        required_quantity: Decimal,
        tolerance: Decimal,
    ) -> Result<LowStockRecommendation> {
        stock.check()?;
        let need_to_purchase = stock.shortfall(required_quantity);

        if need_to_purchase > Decimal::ZERO && stock.package_size <= Decimal::ZERO {
            return Err(CatalogError::invalid(
                "package_size",
                format!(
                    "材料 {} 的包裝規格必須大於 0，實際為 {}",
                    stock.material_id, stock.package_size
                ),
            ));
        }

        let recommended_purchase = round_up_to_package(need_to_purchase, stock.package_size, tolerance)?;

        if stock.is_low_stock() {
            tracing::debug!(
                "材料 {} 低庫存: 現有 {}, 最低 {}, 建議採購 {}",
                stock.material_id,
                stock.current_stock,
                stock.min_stock,
                recommended_purchase
            );
        }

        Ok(LowStockRecommendation {
            material_id: stock.material_id,
            required_quantity,
            current_stock: stock.current_stock,
            min_stock: stock.min_stock,
            need_to_purchase,
            recommended_purchase,
            is_low_stock: stock.is_low_stock(),
        })
    }
}
