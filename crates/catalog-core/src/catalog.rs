//! 目錄主檔模型：產品類型、材料類型、產品、材料

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, Result};

/// 產品類型係數（必須大於 0）
///
/// 乘在單位原始用量與成本上，代表該類產品的額外耗用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ProductTypeCoefficient(Decimal);

impl ProductTypeCoefficient {
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(CatalogError::invalid(
                "coefficient",
                format!("類型係數必須大於 0，實際為 {}", value),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for ProductTypeCoefficient {
    type Error = CatalogError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ProductTypeCoefficient> for Decimal {
    fn from(coefficient: ProductTypeCoefficient) -> Self {
        coefficient.0
    }
}

/// 材料損耗率，一律以百分比（0–100）保存
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct MaterialWasteRate(Decimal);

impl MaterialWasteRate {
    /// 無損耗
    pub const ZERO: MaterialWasteRate = MaterialWasteRate(Decimal::ZERO);

    /// 以百分比建立（例如 10 代表 10%）
    pub fn from_percentage(percentage: Decimal) -> Result<Self> {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(CatalogError::invalid(
                "waste_percentage",
                format!("損耗率必須介於 0 到 100 之間，實際為 {}", percentage),
            ));
        }
        Ok(Self(percentage))
    }

    /// 以比例建立（例如 0.1 代表 10%），轉換為百分比保存
    ///
    /// 給以 0–1 儲存損耗率的資料來源使用，呼叫計算器前先正規化。
    pub fn from_fraction(fraction: Decimal) -> Result<Self> {
        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(CatalogError::invalid(
                "waste_fraction",
                format!("損耗比例必須介於 0 到 1 之間，實際為 {}", fraction),
            ));
        }
        Ok(Self(fraction * Decimal::ONE_HUNDRED))
    }

    pub fn percentage(&self) -> Decimal {
        self.0
    }

    /// 損耗乘數：`1 + percentage / 100`
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE + self.0 / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<Decimal> for MaterialWasteRate {
    type Error = CatalogError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::from_percentage(value)
    }
}

impl From<MaterialWasteRate> for Decimal {
    fn from(rate: MaterialWasteRate) -> Self {
        rate.0
    }
}

/// 產品類型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: i64,
    pub name: String,
    pub coefficient: ProductTypeCoefficient,
}

impl ProductType {
    pub fn new(id: i64, name: impl Into<String>, coefficient: ProductTypeCoefficient) -> Self {
        Self {
            id,
            name: name.into(),
            coefficient,
        }
    }
}

/// 材料類型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialType {
    pub id: i64,
    pub name: String,
    pub waste_rate: MaterialWasteRate,
}

impl MaterialType {
    pub fn new(id: i64, name: impl Into<String>, waste_rate: MaterialWasteRate) -> Self {
        Self {
            id,
            name: name.into(),
            waste_rate,
        }
    }
}

/// 產品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub product_type_id: i64,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, product_type_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            product_type_id,
        }
    }
}

/// 材料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub name: String,
    pub material_type_id: i64,
}

impl Material {
    pub fn new(id: i64, name: impl Into<String>, material_type_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            material_type_id,
        }
    }
}
