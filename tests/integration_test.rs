//! 集成測試

use catalog::catalog_core::{
    BillOfMaterialsLine, CostMode, EntityKind, InMemoryCatalog, Material, MaterialRequirementInput,
    MaterialType, MaterialWasteRate, Product, ProductType, ProductTypeCoefficient,
    RequirementRequest, StockLevel,
};
use catalog::{
    calculate_catalog_price, CatalogCalculator, CatalogError, CostCalculator, EngineConfig,
    RequirementCalculator,
};
use rust_decimal::Decimal;

fn product_type(id: i64, coefficient: Decimal) -> ProductType {
    ProductType::new(id, format!("TYPE-{}", id), ProductTypeCoefficient::new(coefficient).unwrap())
}

fn material_type(id: i64, waste: i64) -> MaterialType {
    MaterialType::new(
        id,
        format!("MAT-TYPE-{}", id),
        MaterialWasteRate::from_percentage(Decimal::from(waste)).unwrap(),
    )
}

fn line(material_id: i64, quantity: Decimal, cost: Decimal) -> BillOfMaterialsLine {
    BillOfMaterialsLine::new(material_id, quantity, cost).unwrap()
}

/// 場景：家具廠
///   餐桌 (類型 1, 係數 1.5)
///     ├── 橡木板 x2 @100
///     └── 五金   x0.5 @200
///   書櫃 (類型 2, 係數 1.2)
///     ├── 橡木板 x3 @100
///     └── 舊款把手 x4 @10（材料已刪除）
///   樣品 (類型 1) 沒有 BOM 行
fn furniture_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_product_type(product_type(1, Decimal::new(15, 1)))
        .with_product_type(product_type(2, Decimal::new(12, 1)))
        .with_material_type(material_type(1, 10))
        .with_material_type(material_type(2, 50))
        .with_material(Material::new(1, "橡木板", 1))
        .with_material(Material::new(2, "五金", 2))
        .with_product(
            Product::new(100, "餐桌", 1),
            vec![
                line(1, Decimal::from(2), Decimal::from(100)),
                line(2, Decimal::new(5, 1), Decimal::from(200)),
            ],
        )
        .with_product(
            Product::new(200, "書櫃", 2),
            vec![
                line(1, Decimal::from(3), Decimal::from(100)),
                line(3, Decimal::from(4), Decimal::from(10)),
            ],
        )
        .with_product(Product::new(300, "樣品", 1), vec![])
        .with_stock(
            StockLevel::new(1, Decimal::from(50))
                .with_min_stock(Decimal::from(60))
                .with_package_size(Decimal::from(25)),
        )
        .with_stock(
            StockLevel::new(2, Decimal::from(100))
                .with_min_stock(Decimal::from(10))
                .with_package_size(Decimal::from(10)),
        )
}

fn markup_20() -> EngineConfig {
    EngineConfig::new(Decimal::new(2, 1))
}

#[test]
fn test_requirement_scenario_partial_stock() {
    // param1=2.0, param2=1.5, 係數 1.5, 數量 10, 損耗 10%, 庫存 5.0
    let input = MaterialRequirementInput::new(10, Decimal::new(20, 1), Decimal::new(15, 1))
        .with_stock(Decimal::new(50, 1));

    let result = RequirementCalculator::calculate(
        &input,
        ProductTypeCoefficient::new(Decimal::new(15, 1)).unwrap(),
        MaterialWasteRate::from_percentage(Decimal::from(10)).unwrap(),
        &markup_20(),
    )
    .unwrap();

    assert_eq!(result.material_per_unit, Decimal::new(45, 1));
    assert_eq!(result.total_material_needed, Decimal::from(45));
    assert_eq!(result.material_with_waste, Decimal::new(495, 1));
    assert_eq!(result.material_to_purchase, Decimal::new(445, 1));
    assert_eq!(result.required_purchase_quantity, 45);
}

#[test]
fn test_requirement_scenario_stock_sufficient() {
    let input = MaterialRequirementInput::new(1, Decimal::ONE, Decimal::ONE)
        .with_stock(Decimal::from(100));

    let result = RequirementCalculator::calculate(
        &input,
        ProductTypeCoefficient::new(Decimal::ONE).unwrap(),
        MaterialWasteRate::ZERO,
        &markup_20(),
    )
    .unwrap();

    assert_eq!(result.required_purchase_quantity, 0);
    assert!(result.is_stock_sufficient);
}

#[test]
fn test_requirement_scenario_half_waste() {
    let input = MaterialRequirementInput::new(5, Decimal::from(2), Decimal::from(2));

    let result = RequirementCalculator::calculate(
        &input,
        ProductTypeCoefficient::new(Decimal::ONE).unwrap(),
        MaterialWasteRate::from_percentage(Decimal::from(50)).unwrap(),
        &markup_20(),
    )
    .unwrap();

    assert_eq!(result.required_purchase_quantity, 30);
}

#[test]
fn test_requirement_scenario_zero_quantity() {
    let input = MaterialRequirementInput::new(0, Decimal::ONE, Decimal::ONE);

    let err = RequirementCalculator::calculate(
        &input,
        ProductTypeCoefficient::new(Decimal::ONE).unwrap(),
        MaterialWasteRate::ZERO,
        &markup_20(),
    )
    .unwrap_err();

    assert_eq!(err.invalid_fields(), vec!["product_quantity"]);
}

#[test]
fn test_cost_scenario_with_markup() {
    let lines = vec![
        line(1, Decimal::new(20, 1), Decimal::new(1000, 1)),
        line(2, Decimal::new(5, 1), Decimal::new(2000, 1)),
    ];

    let cost = CostCalculator::calculate_product_cost(&lines, 1).unwrap();
    assert_eq!(cost.total_cost, Decimal::from(300));

    let price = calculate_catalog_price(
        cost.cost_per_unit,
        ProductTypeCoefficient::new(Decimal::new(15, 1)).unwrap(),
        Decimal::new(2, 1),
    )
    .unwrap();
    assert_eq!(price, Decimal::new(5400, 1));
}

#[test]
fn test_cost_scenario_empty_bom() {
    let err = CostCalculator::calculate_product_cost(&[], 1).unwrap_err();
    assert!(matches!(err, CatalogError::EmptyBillOfMaterials));
}

#[test]
fn test_facade_requirement_end_to_end() {
    let source = furniture_catalog();
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    // 數量 10，每件 2 × 1.5 × 係數 1.5 = 4.5，損耗 10% → 49.5，庫存 50 → 足夠
    let result = calculator
        .material_requirement_for_stock(1, 1, 1, 10, Decimal::from(2), Decimal::new(15, 1))
        .unwrap();

    assert!(result.is_stock_sufficient);
    assert_eq!(result.required_purchase_quantity, 0);

    // 數量 20 → 99，庫存 50 → 採購 49
    let result = calculator
        .material_requirement_for_stock(1, 1, 1, 20, Decimal::from(2), Decimal::new(15, 1))
        .unwrap();
    assert_eq!(result.required_purchase_quantity, 49);
}

#[test]
fn test_facade_reports_all_invalid_fields_before_lookup() {
    let source = furniture_catalog();
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    // 類型ID 無效且數量為 0：兩個錯誤一起回報，不會先去查詢類型
    let request = RequirementRequest::new(
        0,
        1,
        MaterialRequirementInput::new(0, Decimal::ONE, Decimal::from(-1)),
    );
    let err = calculator.material_requirement(&request).unwrap_err();

    assert_eq!(
        err.invalid_fields(),
        vec!["product_type_id", "product_quantity", "param2"]
    );
}

#[test]
fn test_facade_unknown_material_type() {
    let source = furniture_catalog();
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    let request = RequirementRequest::new(
        1,
        9,
        MaterialRequirementInput::new(1, Decimal::ONE, Decimal::ONE),
    );
    let err = calculator.material_requirement(&request).unwrap_err();

    match err {
        CatalogError::ResolveFailed { lookup, source } => {
            assert_eq!(lookup, EntityKind::MaterialType);
            assert!(matches!(
                *source,
                CatalogError::NotFound {
                    kind: EntityKind::MaterialType,
                    id: 9
                }
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_product_cost_is_strict() {
    let source = furniture_catalog();
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    let report = calculator.product_cost(100, 2).unwrap();
    assert_eq!(report.cost.total_cost, Decimal::from(600));
    assert_eq!(report.cost.cost_per_unit, Decimal::from(300));
    assert_eq!(report.unit_price, Decimal::from(540));

    // 書櫃引用已刪除的材料 3
    let err = calculator.product_cost(200, 1).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::ResolveFailed {
            lookup: EntityKind::Material,
            ..
        }
    ));

    let err = calculator.product_cost(300, 1).unwrap_err();
    assert!(matches!(err, CatalogError::EmptyBillOfMaterials));
}

#[test]
fn test_catalog_listing_lenient_skips_and_warns() {
    let source = furniture_catalog();
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    let listing = calculator
        .catalog_listing_with_mode(&[100, 200, 300, 999], 1, CostMode::Lenient)
        .unwrap();

    // 餐桌與書櫃成功（書櫃跳過一行），樣品與不存在的產品記為警告
    assert_eq!(listing.entries.len(), 2);
    assert_eq!(listing.entries[0].report.product_id, 100);
    assert_eq!(listing.entries[1].report.product_id, 200);

    let bookcase = listing.entry(200).unwrap();
    assert_eq!(bookcase.skipped_lines, 1);
    assert_eq!(bookcase.report.cost.total_cost, Decimal::from(300));
    // 300 × 1.2 × 1.2 = 432
    assert_eq!(bookcase.report.unit_price, Decimal::from(432));

    assert_eq!(listing.warnings.len(), 3);
    assert_eq!(listing.warnings[0].material_id, Some(3));
    assert!(listing.warnings.iter().any(|w| w.product_id == 300));
    assert!(listing.warnings.iter().any(|w| w.product_id == 999));
}

#[test]
fn test_catalog_listing_strict_fails() {
    let source = furniture_catalog();
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    let err = calculator
        .catalog_listing_with_mode(&[100, 200], 1, CostMode::Strict)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_catalog_listing_uses_configured_mode() {
    let source = furniture_catalog();
    let calculator =
        CatalogCalculator::new(&source, markup_20().with_cost_mode(CostMode::Lenient)).unwrap();

    let listing = calculator.catalog_listing(&source.product_ids(), 1).unwrap();
    assert_eq!(listing.entries.len(), 2);
    assert!(listing.entry(300).is_none());
}

#[test]
fn test_purchase_plan_rounds_to_packages() {
    let source = furniture_catalog();
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    // 餐桌 × 40：橡木板需 80，庫存 50 → 缺 30 → 包裝 25 → 50
    //            五金需 20，庫存 100 → 不需採購
    let plan = calculator.purchase_plan(100, 40).unwrap();

    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].material_id, 1);
    assert_eq!(plan[0].required_quantity, Decimal::from(80));
    assert_eq!(plan[0].need_to_purchase, Decimal::from(30));
    assert_eq!(plan[0].recommended_purchase, Decimal::from(50));
    assert!(plan[0].is_low_stock);

    assert_eq!(plan[1].recommended_purchase, Decimal::ZERO);
    assert!(!plan[1].is_low_stock);
}

#[test]
fn test_purchase_plan_missing_stock() {
    let mut source = furniture_catalog();
    source.set_stock(StockLevel::new(3, Decimal::ZERO));
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    // 書櫃的材料 3 雖已刪除，但庫存紀錄仍在；材料 1 有庫存
    let plan = calculator.purchase_plan(200, 1).unwrap();
    assert_eq!(plan.len(), 2);

    let err = calculator.purchase_plan(999, 1).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::ResolveFailed {
            lookup: EntityKind::BillOfMaterials,
            ..
        }
    ));
}

#[test]
fn test_merge_duplicate_lines_in_listing() {
    let source = InMemoryCatalog::new()
        .with_product_type(product_type(1, Decimal::ONE))
        .with_material(Material::new(1, "螺絲", 1))
        .with_product(
            Product::new(1, "層架", 1),
            vec![
                line(1, Decimal::from(4), Decimal::new(5, 1)),
                line(1, Decimal::from(4), Decimal::new(15, 1)),
            ],
        );
    let config = markup_20().with_merge_duplicate_lines(true);
    let calculator = CatalogCalculator::new(&source, config).unwrap();

    let report = calculator.product_cost(1, 1).unwrap();
    assert_eq!(report.cost.lines.len(), 1);
    assert_eq!(report.cost.lines[0].quantity_needed, Decimal::from(8));
    assert_eq!(report.cost.total_cost, Decimal::from(8));
}

#[test]
fn test_listing_serializes_for_adapters() {
    let source = furniture_catalog();
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    let listing = calculator
        .catalog_listing_with_mode(&[100, 300], 1, CostMode::Lenient)
        .unwrap();
    let json = serde_json::to_value(&listing).unwrap();

    assert_eq!(json["entries"].as_array().unwrap().len(), 1);
    assert_eq!(json["entries"][0]["report"]["product_id"], 100);
    assert_eq!(json["warnings"][0]["severity"], "error");
    assert!(json["generated_at"].is_string());
}

#[test]
fn test_catalog_listing_rejects_invalid_quantity_in_any_mode() {
    let source = furniture_catalog();
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    for mode in [CostMode::Lenient, CostMode::Strict] {
        let err = calculator
            .catalog_listing_with_mode(&[100, 200], 0, mode)
            .unwrap_err();
        assert_eq!(err.invalid_fields(), vec!["quantity"]);
    }
}

#[test]
fn test_catalog_listing_keeps_line_warnings_when_every_line_is_skipped() {
    let source = furniture_catalog().with_product(
        Product::new(400, "舊款椅", 1),
        vec![line(9, Decimal::ONE, Decimal::from(30))],
    );
    let calculator = CatalogCalculator::new(&source, markup_20()).unwrap();

    let listing = calculator
        .catalog_listing_with_mode(&[100, 400], 1, CostMode::Lenient)
        .unwrap();

    assert_eq!(listing.entries.len(), 1);
    assert!(listing.entry(400).is_none());

    // 先記錄被跳過的行，再記錄整個產品
    assert_eq!(listing.warnings.len(), 2);
    assert_eq!(listing.warnings[0].product_id, 400);
    assert_eq!(listing.warnings[0].material_id, Some(9));
    assert_eq!(listing.warnings[1].product_id, 400);
    assert_eq!(listing.warnings[1].material_id, None);
}
