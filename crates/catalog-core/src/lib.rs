//! # Catalog Core
//!
//! 物料需求與 BOM 成本引擎的核心資料模型與類型定義

pub mod bom;
pub mod catalog;
pub mod config;
pub mod inventory;
pub mod provider;
pub mod quantity;
pub mod requirement;

use std::fmt;

// Re-export 主要類型
pub use bom::{BillOfMaterialsLine, CostLine, ProductCostResult};
pub use catalog::{Material, MaterialType, MaterialWasteRate, Product, ProductType, ProductTypeCoefficient};
pub use config::{CostMode, EngineConfig};
pub use inventory::{LowStockRecommendation, StockLevel};
pub use provider::{
    BomProvider, CatalogSource, InMemoryCatalog, MaterialResolver, MaterialTypeResolver,
    ProductResolver, ProductTypeResolver, StockProvider,
};
pub use requirement::{MaterialRequirementInput, MaterialRequirementResult, RequirementRequest};

/// 查詢對象種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// 產品類型
    ProductType,
    /// 材料類型
    MaterialType,
    /// 產品
    Product,
    /// 材料
    Material,
    /// 物料清單
    BillOfMaterials,
    /// 庫存
    Stock,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::ProductType => "產品類型",
            EntityKind::MaterialType => "材料類型",
            EntityKind::Product => "產品",
            EntityKind::Material => "材料",
            EntityKind::BillOfMaterials => "物料清單",
            EntityKind::Stock => "庫存",
        };
        f.write_str(name)
    }
}

/// 單一欄位的驗證失敗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// 驗證失敗集合（每個欄位獨立驗證，全部收集）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一筆欄位錯誤
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// 所有出錯的欄位名稱（依驗證順序）
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }

    /// 合併另一組驗證結果
    pub fn extend(&mut self, other: ValidationErrors) {
        self.violations.extend(other.violations);
    }

    /// 沒有錯誤時回傳 Ok，否則轉為 [`CatalogError::Validation`]
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

/// 引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("無效的參數 {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("輸入驗證失敗: {0}")]
    Validation(ValidationErrors),

    #[error("找不到{kind}: {id}")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("查詢{lookup}失敗")]
    ResolveFailed {
        lookup: EntityKind,
        #[source]
        source: Box<CatalogError>,
    },

    #[error("物料清單為空，無法計算成本")]
    EmptyBillOfMaterials,

    #[error("除數為零或負數: {divisor}")]
    DivisionByZero { divisor: &'static str },

    #[error("數值溢位: {what}")]
    Overflow { what: &'static str },

    #[error("配置解析錯誤: {0}")]
    Config(#[from] serde_json::Error),
}

impl CatalogError {
    /// 建立單一欄位的參數錯誤
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    /// 包裝協作者的查詢錯誤，標明是哪一個查詢失敗
    pub fn resolve_failed(lookup: EntityKind, source: CatalogError) -> Self {
        Self::ResolveFailed {
            lookup,
            source: Box::new(source),
        }
    }

    /// 此錯誤涉及的欄位（參數錯誤或驗證錯誤）
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        match self {
            CatalogError::InvalidArgument { field, .. } => vec![*field],
            CatalogError::Validation(errors) => errors.fields(),
            CatalogError::ResolveFailed { source, .. } => source.invalid_fields(),
            _ => Vec::new(),
        }
    }

    /// 剝除查詢包裝，取得最內層錯誤
    pub fn root_cause(&self) -> &CatalogError {
        match self {
            CatalogError::ResolveFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), CatalogError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
