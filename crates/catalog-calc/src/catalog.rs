//! 目錄計算器：把外部協作者接到各計算器

use std::collections::HashMap;

use catalog_core::{
    BillOfMaterialsLine, CatalogError, CatalogSource, CostMode, EngineConfig, EntityKind,
    LowStockRecommendation, MaterialRequirementInput, MaterialRequirementResult, ProductCostResult,
    ProductType, RequirementRequest, Result,
};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::costing::{calculate_catalog_price, CostCalculator, ResolvedBom};
use crate::purchasing::PurchaseAdvisor;
use crate::requirement::RequirementCalculator;
use crate::validation::RequirementValidator;
use crate::CalcWarning;

/// 單一產品的成本報告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCostReport {
    pub product_id: i64,
    pub product_type: ProductType,
    pub cost: ProductCostResult,
    /// 含類型係數與加價的單位售價（已捨入）
    pub unit_price: Decimal,
}

/// 目錄列表中的一筆
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub report: ProductCostReport,
    /// 被跳過的 BOM 行數
    pub skipped_lines: usize,
}

/// 目錄列表結果
#[derive(Debug, Clone, Serialize)]
pub struct CatalogListing {
    pub entries: Vec<CatalogEntry>,
    pub warnings: Vec<CalcWarning>,
    pub generated_at: DateTime<Utc>,
}

impl CatalogListing {
    /// 找出指定產品的報告
    pub fn entry(&self, product_id: i64) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.report.product_id == product_id)
    }
}

/// 目錄計算器
pub struct CatalogCalculator<'a, S: CatalogSource + ?Sized> {
    /// 外部資料來源
    source: &'a S,

    /// 引擎配置
    config: EngineConfig,
}

impl<'a, S: CatalogSource + ?Sized> CatalogCalculator<'a, S> {
    /// 創建新的目錄計算器
    pub fn new(source: &'a S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    /// 材料需求計算（庫存由呼叫端提供）
    pub fn material_requirement(
        &self,
        request: &RequirementRequest,
    ) -> Result<MaterialRequirementResult> {
        tracing::info!(
            "開始材料需求計算：產品類型 {}，材料類型 {}，數量 {}",
            request.product_type_id,
            request.material_type_id,
            request.input.product_quantity
        );

        RequirementValidator::validate_request(request, &self.config)?;

        let product_type = self
            .source
            .product_type(request.product_type_id)
            .map_err(|e| CatalogError::resolve_failed(EntityKind::ProductType, e))?;
        let material_type = self
            .source
            .material_type(request.material_type_id)
            .map_err(|e| CatalogError::resolve_failed(EntityKind::MaterialType, e))?;

        let result = RequirementCalculator::calculate(
            &request.input,
            product_type.coefficient,
            material_type.waste_rate,
            &self.config,
        )?;

        tracing::info!(
            "材料需求計算完成：需採購 {} 單位",
            result.required_purchase_quantity
        );
        Ok(result)
    }

    /// 材料需求計算（庫存由庫存來源提供）
    pub fn material_requirement_for_stock(
        &self,
        product_type_id: i64,
        material_type_id: i64,
        material_id: i64,
        product_quantity: i64,
        param1: Decimal,
        param2: Decimal,
    ) -> Result<MaterialRequirementResult> {
        let stock = self
            .source
            .stock_level(material_id)
            .map_err(|e| CatalogError::resolve_failed(EntityKind::Stock, e))?;

        let input = MaterialRequirementInput::new(product_quantity, param1, param2)
            .with_stock(stock.current_stock);
        self.material_requirement(&RequirementRequest::new(
            product_type_id,
            material_type_id,
            input,
        ))
    }

    /// 單一產品的權威成本（嚴格模式，用於開票）
    pub fn product_cost(&self, product_id: i64, quantity: i64) -> Result<ProductCostReport> {
        tracing::info!("計算產品 {} 成本，數量 {}", product_id, quantity);
        self.cost_report(product_id, quantity, CostMode::Strict).report
    }

    /// 依配置的 `cost_mode` 產生目錄列表
    pub fn catalog_listing(&self, product_ids: &[i64], quantity: i64) -> Result<CatalogListing> {
        self.catalog_listing_with_mode(product_ids, quantity, self.config.cost_mode)
    }

    /// 產生目錄列表
    ///
    /// 各產品互相獨立，平行計算後依輸入順序輸出。
    /// - `Strict`: 任一產品失敗即回傳錯誤
    /// - `Lenient`: 無法解析的行與失敗的產品記為警告
    pub fn catalog_listing_with_mode(
        &self,
        product_ids: &[i64],
        quantity: i64,
        mode: CostMode,
    ) -> Result<CatalogListing> {
        tracing::info!(
            "開始目錄列表計算：產品 {} 筆，模式 {:?}",
            product_ids.len(),
            mode
        );
        if quantity <= 0 {
            return Err(CatalogError::invalid(
                "quantity",
                format!("計算數量必須大於 0，實際為 {}", quantity),
            ));
        }
        let start_time = std::time::Instant::now();

        let outcomes: Vec<(i64, CostOutcome)> = product_ids
            .par_iter()
            .map(|&id| (id, self.cost_report(id, quantity, mode)))
            .collect();

        let mut entries = Vec::with_capacity(outcomes.len());
        let mut warnings = Vec::new();
        for (product_id, outcome) in outcomes {
            let skipped_lines = outcome.warnings.len();
            match outcome.report {
                Ok(report) => {
                    entries.push(CatalogEntry {
                        report,
                        skipped_lines,
                    });
                    warnings.extend(outcome.warnings);
                }
                Err(err) if mode == CostMode::Lenient && is_skippable(&err) => {
                    tracing::warn!("產品 {} 從目錄列表略過: {}", product_id, err);
                    warnings.extend(outcome.warnings);
                    warnings.push(CalcWarning::skipped_product(product_id, err.to_string()));
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!(
            "目錄列表計算完成，耗時 {:?}，成功 {} 筆，警告 {} 筆",
            start_time.elapsed(),
            entries.len(),
            warnings.len()
        );

        Ok(CatalogListing {
            entries,
            warnings,
            generated_at: Utc::now(),
        })
    }

    /// 依目標產量產生採購建議
    pub fn purchase_plan(
        &self,
        product_id: i64,
        target_quantity: i64,
    ) -> Result<Vec<LowStockRecommendation>> {
        tracing::info!("產生產品 {} 的採購建議，目標產量 {}", product_id, target_quantity);

        let lines = self.bill_of_materials(product_id)?;
        let mut stock_levels = HashMap::with_capacity(lines.len());
        for line in &lines {
            if stock_levels.contains_key(&line.material_id) {
                continue;
            }
            let stock = self
                .source
                .stock_level(line.material_id)
                .map_err(|e| CatalogError::resolve_failed(EntityKind::Stock, e))?;
            stock_levels.insert(line.material_id, stock);
        }

        let recommendations = PurchaseAdvisor::recommend_purchases(
            &lines,
            target_quantity,
            &stock_levels,
            self.config.unit_tolerance,
        )?;

        let low_stock = recommendations.iter().filter(|r| r.is_low_stock).count();
        tracing::info!(
            "採購建議完成：材料 {} 種，低庫存 {} 種",
            recommendations.len(),
            low_stock
        );
        Ok(recommendations)
    }

    /// 獲取引擎配置
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn bill_of_materials(&self, product_id: i64) -> Result<Vec<BillOfMaterialsLine>> {
        self.source
            .bill_of_materials(product_id)
            .map_err(|e| CatalogError::resolve_failed(EntityKind::BillOfMaterials, e))
    }

    fn cost_report(&self, product_id: i64, quantity: i64, mode: CostMode) -> CostOutcome {
        let (product_type, resolved) = match self.resolve_product(product_id, mode) {
            Ok(found) => found,
            Err(err) => {
                return CostOutcome {
                    report: Err(err),
                    warnings: Vec::new(),
                }
            }
        };

        CostOutcome {
            report: self.price_lines(product_id, product_type, resolved.lines, quantity),
            warnings: resolved.warnings,
        }
    }

    fn resolve_product(&self, product_id: i64, mode: CostMode) -> Result<(ProductType, ResolvedBom)> {
        let product = self
            .source
            .product(product_id)
            .map_err(|e| CatalogError::resolve_failed(EntityKind::Product, e))?;
        let product_type = self
            .source
            .product_type(product.product_type_id)
            .map_err(|e| CatalogError::resolve_failed(EntityKind::ProductType, e))?;

        let lines = self.bill_of_materials(product_id)?;
        let resolved = CostCalculator::resolve_lines(product_id, lines, self.source, mode)?;
        Ok((product_type, resolved))
    }

    fn price_lines(
        &self,
        product_id: i64,
        product_type: ProductType,
        lines: Vec<BillOfMaterialsLine>,
        quantity: i64,
    ) -> Result<ProductCostReport> {
        let lines = if self.config.merge_duplicate_lines {
            CostCalculator::merge_duplicate_lines(&lines)?
        } else {
            lines
        };

        let cost = CostCalculator::calculate_product_cost(&lines, quantity)?;
        let unit_price = calculate_catalog_price(
            cost.cost_per_unit,
            product_type.coefficient,
            self.config.markup_fraction,
        )?;

        tracing::debug!(
            "產品 {} 單位成本 {}，售價 {}",
            product_id,
            cost.cost_per_unit,
            unit_price
        );

        Ok(ProductCostReport {
            product_id,
            product_type,
            cost,
            unit_price,
        })
    }
}

/// 單一產品的計算結果，失敗時仍保留已跳過行的警告
struct CostOutcome {
    report: Result<ProductCostReport>,
    warnings: Vec<CalcWarning>,
}

/// 寬鬆模式可略過的失敗：查不到資料或沒有可計算的 BOM 行
fn is_skippable(err: &CatalogError) -> bool {
    matches!(
        err,
        CatalogError::ResolveFailed { .. }
            | CatalogError::NotFound { .. }
            | CatalogError::EmptyBillOfMaterials
    )
}
