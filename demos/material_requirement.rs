//! 材料需求與目錄定價示例

use catalog::catalog_core::{
    BillOfMaterialsLine, CostMode, InMemoryCatalog, Material, MaterialRequirementInput,
    MaterialType, MaterialWasteRate, Product, ProductType, ProductTypeCoefficient,
    RequirementRequest, StockLevel,
};
use catalog::{CatalogCalculator, EngineConfig};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

const CONFIG_JSON: &str = r#"{
    "markup_fraction": "0.2",
    "allow_zero_dimensions": true,
    "cost_mode": "lenient"
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 材料需求與目錄定價示例 ===\n");

    let config = EngineConfig::from_json_str(CONFIG_JSON)?;

    let source = InMemoryCatalog::new()
        .with_product_type(ProductType::new(
            1,
            "家具",
            ProductTypeCoefficient::new(Decimal::new(15, 1))?,
        ))
        .with_material_type(MaterialType::new(
            1,
            "木材",
            MaterialWasteRate::from_percentage(Decimal::from(10))?,
        ))
        .with_material(Material::new(1, "橡木板", 1))
        .with_material(Material::new(2, "五金", 1))
        .with_product(
            Product::new(100, "餐桌", 1),
            vec![
                BillOfMaterialsLine::new(1, Decimal::from(2), Decimal::from(100))?,
                BillOfMaterialsLine::new(2, Decimal::new(5, 1), Decimal::from(200))?,
            ],
        )
        .with_stock(
            StockLevel::new(1, Decimal::from(5))
                .with_min_stock(Decimal::from(20))
                .with_package_size(Decimal::from(10)),
        )
        .with_stock(StockLevel::new(2, Decimal::from(40)));

    let calculator = CatalogCalculator::new(&source, config)?;

    // 材料需求
    let request = RequirementRequest::new(
        1,
        1,
        MaterialRequirementInput::new(10, Decimal::from(2), Decimal::new(15, 1))
            .with_stock(Decimal::from(5)),
    );
    let requirement = calculator.material_requirement(&request)?;
    println!("材料需求:");
    println!("  - 單位用量: {}", requirement.material_per_unit);
    println!("  - 含損耗總用量: {}", requirement.material_with_waste);
    println!("  - 需採購: {} 單位", requirement.required_purchase_quantity);

    // 目錄定價
    let listing = calculator.catalog_listing_with_mode(&source.product_ids(), 1, CostMode::Lenient)?;
    println!("\n目錄列表:");
    for entry in &listing.entries {
        println!(
            "  - 產品 {}: 單位成本 {}, 售價 {}",
            entry.report.product_id, entry.report.cost.cost_per_unit, entry.report.unit_price
        );
    }

    // 採購建議
    println!("\n採購建議（目標產量 30）:");
    for rec in calculator.purchase_plan(100, 30)? {
        println!(
            "  - 材料 {}: 需求 {}, 庫存 {}, 建議採購 {}{}",
            rec.material_id,
            rec.required_quantity,
            rec.current_stock,
            rec.recommended_purchase,
            if rec.is_low_stock { "（低庫存）" } else { "" }
        );
    }

    Ok(())
}
