//! Test data fixtures

use catalog_core::{
    Category, DashboardConfig, PageInfo, Product, ProductPage, ProductStats, Role, SessionContext,
};
use serde_json::{Value, json};

/// Signed-in admin session
pub fn admin_session() -> SessionContext {
    SessionContext::signed_in(1, Role::Admin)
}

/// Signed-in seller session
pub fn seller_session() -> SessionContext {
    SessionContext::signed_in(2, Role::Other("seller".to_string()))
}

/// Default dashboard settings
pub fn dashboard_config() -> DashboardConfig {
    DashboardConfig::default()
}

/// Product with a name, seller 7 and category 1
pub fn product(id: i64, name: &str, approved: bool, in_stock: bool) -> Product {
    Product {
        id,
        name: Some(name.to_string()),
        seller_id: 7,
        category_id: Some(1),
        is_approved: approved,
        stock_available: in_stock,
    }
}

/// Page `number` of `total_pages` holding one product named after the page
pub fn numbered_page(number: u32, total_pages: u32) -> ProductPage {
    ProductPage {
        products: vec![product(
            i64::from(number),
            &format!("Page {number} Widget"),
            true,
            true,
        )],
        pagination: PageInfo {
            page: number,
            page_size: 10,
            total_pages,
            total_products: u64::from(total_pages) * 10,
        },
        stats: ProductStats {
            active_products: 20,
            pending_products: 7,
            inactive_products: 5,
        },
    }
}

/// Two categories
pub fn categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            name: "Widgets".to_string(),
        },
        Category {
            id: 2,
            name: "Gadgets".to_string(),
        },
    ]
}

/// Backend JSON for the admin products endpoint
pub fn admin_products_body(page: u32, total_pages: u32) -> Value {
    json!({
        "products": [
            {
                "id": 11,
                "name": "Blue Widget Pro",
                "sellerId": 4,
                "categoryId": 1,
                "isApproved": true,
                "stockAvailable": true
            },
            {
                "id": 12,
                "name": "Red Gadget",
                "sellerId": 5,
                "categoryId": 2,
                "isApproved": false,
                "stockAvailable": false
            },
            {
                "id": 13,
                "sellerId": 5,
                "categoryId": 2,
                "isApproved": true,
                "stockAvailable": false
            }
        ],
        "pagination": { "page": page, "pageSize": 10, "totalPages": total_pages, "totalProducts": 25 },
        "stats": { "activeProducts": 20, "pendingProducts": 7, "inactiveProducts": 5 }
    })
}

/// Backend JSON for the categories endpoint
pub fn categories_body() -> Value {
    json!([
        { "CategoryID": 1, "CategoryName": "Widgets" },
        { "CategoryID": 2, "CategoryName": "Gadgets" }
    ])
}
