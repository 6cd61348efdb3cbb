//! BOM 成本與定價計算

use catalog_core::quantity::{checked_add, checked_divide, checked_multiply, round_money};
use catalog_core::{
    BillOfMaterialsLine, CatalogError, CostLine, CostMode, EntityKind, MaterialResolver,
    ProductCostResult, ProductTypeCoefficient, Result,
};
use rust_decimal::Decimal;

use crate::CalcWarning;

/// 解析後的 BOM：可計算的行，以及寬鬆模式下被跳過的行
#[derive(Debug, Clone, Default)]
pub struct ResolvedBom {
    pub lines: Vec<BillOfMaterialsLine>,
    pub warnings: Vec<CalcWarning>,
}

/// 成本計算器
pub struct CostCalculator;

impl CostCalculator {
    /// 計算產品批量成本
    ///
    /// 各行小計不做捨入，金額只在定價的最後一步捨入一次。
    pub fn calculate_product_cost(
        lines: &[BillOfMaterialsLine],
        quantity: i64,
    ) -> Result<ProductCostResult> {
        if quantity <= 0 {
            return Err(CatalogError::invalid(
                "quantity",
                format!("計算數量必須大於 0，實際為 {}", quantity),
            ));
        }
        if lines.is_empty() {
            return Err(CatalogError::EmptyBillOfMaterials);
        }

        let batch = Decimal::from(quantity);
        let mut cost_lines = Vec::with_capacity(lines.len());
        let mut total_cost = Decimal::ZERO;

        for line in lines {
            line.check()?;

            let quantity_needed = checked_multiply(line.quantity_per_unit, batch, "quantity_needed")?;
            let line_total = checked_multiply(quantity_needed, line.cost_per_unit, "line_total")?;
            total_cost = checked_add(total_cost, line_total, "total_cost")?;

            cost_lines.push(CostLine {
                material_id: line.material_id,
                quantity_needed,
                unit_cost: line.cost_per_unit,
                line_total,
            });
        }

        let cost_per_unit = checked_divide(total_cost, batch, "quantity")?;

        tracing::debug!(
            "BOM 成本: {} 行, 數量 {}, 總成本 {}, 單位成本 {}",
            cost_lines.len(),
            quantity,
            total_cost,
            cost_per_unit
        );

        Ok(ProductCostResult {
            total_cost,
            cost_per_unit,
            lines: cost_lines,
        })
    }

    /// 合併相同材料的 BOM 行
    ///
    /// 用量相加，單位成本以用量加權平均，保持總成本不變。輸出順序依各材料首次出現的位置。
    pub fn merge_duplicate_lines(lines: &[BillOfMaterialsLine]) -> Result<Vec<BillOfMaterialsLine>> {
        let mut merged: Vec<(BillOfMaterialsLine, Decimal)> = Vec::with_capacity(lines.len());

        for line in lines {
            line.check()?;
            let line_cost = checked_multiply(line.quantity_per_unit, line.cost_per_unit, "line_total")?;

            match merged.iter_mut().find(|(m, _)| m.material_id == line.material_id) {
                Some((existing, cost)) => {
                    existing.quantity_per_unit = checked_add(
                        existing.quantity_per_unit,
                        line.quantity_per_unit,
                        "quantity_per_unit",
                    )?;
                    *cost = checked_add(*cost, line_cost, "line_total")?;
                }
                None => merged.push((line.clone(), line_cost)),
            }
        }

        merged
            .into_iter()
            .map(|(mut line, cost)| -> Result<BillOfMaterialsLine> {
                line.cost_per_unit = checked_divide(cost, line.quantity_per_unit, "quantity_per_unit")?;
                Ok(line)
            })
            .collect()
    }

    /// 確認每一行引用的材料仍存在
    ///
    /// - `Strict`: 任一材料無法解析即回傳錯誤
    /// - `Lenient`: 跳過該行並記錄警告
    pub fn resolve_lines<R: MaterialResolver + ?Sized>(
        product_id: i64,
        lines: Vec<BillOfMaterialsLine>,
        resolver: &R,
        mode: CostMode,
    ) -> Result<ResolvedBom> {
        let mut resolved = ResolvedBom::default();

        for line in lines {
            match resolver.material(line.material_id) {
                Ok(_) => resolved.lines.push(line),
                Err(err) => match mode {
                    CostMode::Strict => {
                        return Err(CatalogError::resolve_failed(EntityKind::Material, err));
                    }
                    CostMode::Lenient => {
                        tracing::warn!(
                            "產品 {} 的 BOM 行跳過，材料 {} 無法解析: {}",
                            product_id,
                            line.material_id,
                            err
                        );
                        resolved.warnings.push(CalcWarning::skipped_line(
                            product_id,
                            line.material_id,
                            err.to_string(),
                        ));
                    }
                },
            }
        }

        Ok(resolved)
    }
}

/// 計算目錄售價
///
/// `售價 = 單位成本 × 類型係數 × (1 + 加價比例)`，最後捨入到最小貨幣單位。
pub fn calculate_catalog_price(
    cost_per_unit: Decimal,
    coefficient: ProductTypeCoefficient,
    markup_fraction: Decimal,
) -> Result<Decimal> {
    if cost_per_unit < Decimal::ZERO {
        return Err(CatalogError::invalid(
            "cost_per_unit",
            format!("單位成本不可為負，實際為 {}", cost_per_unit),
        ));
    }
    if markup_fraction < Decimal::ZERO {
        return Err(CatalogError::invalid(
            "markup_fraction",
            format!("加價比例不可為負，實際為 {}", markup_fraction),
        ));
    }

    let price = checked_multiply(
        checked_multiply(cost_per_unit, coefficient.value(), "price")?,
        checked_add(Decimal::ONE, markup_fraction, "markup_fraction")?,
        "price",
    )?;
    Ok(round_money(price))
}
