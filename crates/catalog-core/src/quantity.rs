//! 數量與金額的數值語意
//!
//! 所有數量與金額都以 [`Decimal`] 表示。進位、金額捨入與除法保護集中在此，
//! 計算器不直接呼叫 `ceil()` 或 `/`。

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{CatalogError, Result};

/// 預設整數容差：距離整數 1e-9 以內的值視為該整數
pub const DEFAULT_UNIT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

/// 金額小數位數（最小貨幣單位）
pub const MONEY_SCALE: u32 = 2;

/// 向上取整到整數單位
///
/// 先把距離整數 `tolerance` 以內的值吸附到該整數，再取 ceiling，
/// 避免 `44.0000000000000001` 被進位成 45。非正數一律回傳 0。
pub fn ceil_units(value: Decimal, tolerance: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let nearest = value.round();
    if (value - nearest).abs() <= tolerance {
        nearest
    } else {
        value.ceil()
    }
}

/// 向上取整並轉為整數單位數
pub fn ceil_to_count(value: Decimal, tolerance: Decimal) -> Result<u64> {
    ceil_units(value, tolerance)
        .to_u64()
        .ok_or(CatalogError::Overflow {
            what: "採購單位數",
        })
}

/// 金額捨入到最小貨幣單位（四捨五入，中點遠離零）
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// 受保護的除法：除數非正時回傳 [`CatalogError::DivisionByZero`]，不會產生 NaN/Inf
pub fn checked_divide(
    dividend: Decimal,
    divisor: Decimal,
    divisor_name: &'static str,
) -> Result<Decimal> {
    if divisor <= Decimal::ZERO {
        return Err(CatalogError::DivisionByZero {
            divisor: divisor_name,
        });
    }
    dividend
        .checked_div(divisor)
        .ok_or(CatalogError::Overflow { what: divisor_name })
}

/// 受保護的乘法
pub fn checked_multiply(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_mul(b).ok_or(CatalogError::Overflow { what })
}

/// 受保護的加法
pub fn checked_add(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_add(b).ok_or(CatalogError::Overflow { what })
}

/// 向上取整到包裝倍數
///
/// `need <= 0` 時不需採購，回傳 0；否則 `ceil(need / package) * package`。
pub fn round_up_to_package(
    need: Decimal,
    package_size: Decimal,
    tolerance: Decimal,
) -> Result<Decimal> {
    if need <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let packages = ceil_units(checked_divide(need, package_size, "package_size")?, tolerance);
    checked_multiply(packages, package_size, "package_size")
}
