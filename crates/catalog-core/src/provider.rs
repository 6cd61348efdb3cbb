//! 外部協作者介面
//!
//! 引擎本身不讀寫資料庫。類型係數、損耗率、BOM 與庫存由呼叫端透過以下
//! trait 提供；查不到時回傳 [`CatalogError::NotFound`]，引擎不會代入預設值。

use std::collections::HashMap;

use crate::{
    BillOfMaterialsLine, CatalogError, EntityKind, Material, MaterialType, Product, ProductType,
    Result, StockLevel,
};

/// 產品類型查詢（提供類型係數）
pub trait ProductTypeResolver {
    fn product_type(&self, id: i64) -> Result<ProductType>;
}

/// 材料類型查詢（提供損耗率）
pub trait MaterialTypeResolver {
    fn material_type(&self, id: i64) -> Result<MaterialType>;
}

/// 產品查詢
pub trait ProductResolver {
    fn product(&self, id: i64) -> Result<Product>;
}

/// 材料查詢
pub trait MaterialResolver {
    fn material(&self, id: i64) -> Result<Material>;
}

/// 物料清單查詢
pub trait BomProvider {
    fn bill_of_materials(&self, product_id: i64) -> Result<Vec<BillOfMaterialsLine>>;
}

/// 庫存查詢
pub trait StockProvider {
    fn stock_level(&self, material_id: i64) -> Result<StockLevel>;
}

/// 計算器所需的全部協作者
///
/// 需要 `Sync`，目錄列表會跨執行緒共用同一個來源。
pub trait CatalogSource:
    ProductTypeResolver
    + MaterialTypeResolver
    + ProductResolver
    + MaterialResolver
    + BomProvider
    + StockProvider
    + Sync
{
}

impl<T> CatalogSource for T where
    T: ProductTypeResolver
        + MaterialTypeResolver
        + ProductResolver
        + MaterialResolver
        + BomProvider
        + StockProvider
        + Sync
{
}

/// 記憶體中的目錄資料
///
/// 給測試、示例以及已預先載入資料的轉接層使用。
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    product_types: HashMap<i64, ProductType>,
    material_types: HashMap<i64, MaterialType>,
    products: HashMap<i64, Product>,
    materials: HashMap<i64, Material>,
    boms: HashMap<i64, Vec<BillOfMaterialsLine>>,
    stock: HashMap<i64, StockLevel>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入產品類型
    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_types.insert(product_type.id, product_type);
        self
    }

    /// 建構器模式：加入材料類型
    pub fn with_material_type(mut self, material_type: MaterialType) -> Self {
        self.material_types.insert(material_type.id, material_type);
        self
    }

    /// 建構器模式：加入產品及其 BOM
    pub fn with_product(mut self, product: Product, lines: Vec<BillOfMaterialsLine>) -> Self {
        self.boms.insert(product.id, lines);
        self.products.insert(product.id, product);
        self
    }

    /// 建構器模式：加入材料
    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.insert(material.id, material);
        self
    }

    /// 建構器模式：加入庫存水位
    pub fn with_stock(mut self, stock: StockLevel) -> Self {
        self.stock.insert(stock.material_id, stock);
        self
    }

    /// 刪除材料（BOM 中仍引用它的行會變成無法解析）
    pub fn remove_material(&mut self, material_id: i64) -> Option<Material> {
        self.materials.remove(&material_id)
    }

    /// 更新庫存水位
    pub fn set_stock(&mut self, stock: StockLevel) {
        self.stock.insert(stock.material_id, stock);
    }

    /// 所有產品ID（遞增排序）
    pub fn product_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.products.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

fn lookup<T: Clone>(map: &HashMap<i64, T>, kind: EntityKind, id: i64) -> Result<T> {
    map.get(&id)
        .cloned()
        .ok_or(CatalogError::NotFound { kind, id })
}

impl ProductTypeResolver for InMemoryCatalog {
    fn product_type(&self, id: i64) -> Result<ProductType> {
        lookup(&self.product_types, EntityKind::ProductType, id)
    }
}

impl MaterialTypeResolver for InMemoryCatalog {
    fn material_type(&self, id: i64) -> Result<MaterialType> {
        lookup(&self.material_types, EntityKind::MaterialType, id)
    }
}

impl ProductResolver for InMemoryCatalog {
    fn product(&self, id: i64) -> Result<Product> {
        lookup(&self.products, EntityKind::Product, id)
    }
}

impl MaterialResolver for InMemoryCatalog {
    fn material(&self, id: i64) -> Result<Material> {
        lookup(&self.materials, EntityKind::Material, id)
    }
}

impl BomProvider for InMemoryCatalog {
    fn bill_of_materials(&self, product_id: i64) -> Result<Vec<BillOfMaterialsLine>> {
        lookup(&self.boms, EntityKind::BillOfMaterials, product_id)
    }
}

impl StockProvider for InMemoryCatalog {
    fn stock_level(&self, material_id: i64) -> Result<StockLevel> {
        lookup(&self.stock, EntityKind::Stock, material_id)
    }
}
