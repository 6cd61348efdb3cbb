//! 引擎配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::quantity::DEFAULT_UNIT_TOLERANCE;
use crate::{CatalogError, Result};

/// 引擎計算參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 加價比例（0.2 代表 20%），沒有預設值，必須由呼叫端決定
    pub markup_fraction: Decimal,

    /// 是否允許產品參數為 0
    /// - true: 只拒絕負數（預設）
    /// - false: 參數必須大於 0
    #[serde(default = "default_allow_zero_dimensions")]
    pub allow_zero_dimensions: bool,

    /// 向上取整時視為整數的容差
    #[serde(default = "default_unit_tolerance")]
    pub unit_tolerance: Decimal,

    /// 解析 BOM 時遇到無法解析的材料如何處理
    #[serde(default)]
    pub cost_mode: CostMode,

    /// 是否合併相同材料的 BOM 行
    #[serde(default)]
    pub merge_duplicate_lines: bool,
}

fn default_allow_zero_dimensions() -> bool {
    true
}

fn default_unit_tolerance() -> Decimal {
    DEFAULT_UNIT_TOLERANCE
}

impl EngineConfig {
    /// 創建新的引擎配置
    pub fn new(markup_fraction: Decimal) -> Self {
        Self {
            markup_fraction,
            allow_zero_dimensions: true,
            unit_tolerance: DEFAULT_UNIT_TOLERANCE,
            cost_mode: CostMode::Strict,
            merge_duplicate_lines: false,
        }
    }

    /// 從 JSON 載入配置並檢查
    ///
    /// # 範例
    /// ```
    /// # use catalog_core::{CostMode, EngineConfig};
    /// let config = EngineConfig::from_json_str(r#"{"markup_fraction": "0.2", "cost_mode": "lenient"}"#)
    ///     .unwrap();
    /// assert_eq!(config.cost_mode, CostMode::Lenient);
    /// assert!(config.allow_zero_dimensions);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置是否允許參數為 0
    pub fn with_allow_zero_dimensions(mut self, allow: bool) -> Self {
        self.allow_zero_dimensions = allow;
        self
    }

    /// 建構器模式：設置取整容差
    pub fn with_unit_tolerance(mut self, tolerance: Decimal) -> Self {
        self.unit_tolerance = tolerance;
        self
    }

    /// 建構器模式：設置成本解析模式
    pub fn with_cost_mode(mut self, mode: CostMode) -> Self {
        self.cost_mode = mode;
        self
    }

    /// 建構器模式：設置是否合併相同材料
    pub fn with_merge_duplicate_lines(mut self, merge: bool) -> Self {
        self.merge_duplicate_lines = merge;
        self
    }

    /// 檢查配置值
    pub fn validate(&self) -> Result<()> {
        if self.markup_fraction < Decimal::ZERO {
            return Err(CatalogError::invalid(
                "markup_fraction",
                format!("加價比例不可為負，實際為 {}", self.markup_fraction),
            ));
        }
        if self.unit_tolerance < Decimal::ZERO || self.unit_tolerance >= Decimal::new(5, 1) {
            return Err(CatalogError::invalid(
                "unit_tolerance",
                format!("取整容差必須介於 0 與 0.5 之間，實際為 {}", self.unit_tolerance),
            ));
        }
        Ok(())
    }
}

/// BOM 解析模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// 嚴格：任何一行無法解析即失敗（開票、單一產品成本）
    #[default]
    Strict,
    /// 寬鬆：跳過無法解析的行並記錄警告（目錄列表）
    Lenient,
}
