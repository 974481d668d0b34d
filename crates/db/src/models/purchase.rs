//! Purchase entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use studyquest_core::types::{CalendarDate, DbId, Timestamp};

/// Full row from the `purchases` table.
#[derive(Debug, Clone, FromRow)]
pub struct Purchase {
    pub id: DbId,
    pub user_id: DbId,
    pub item_id: DbId,
    pub item_name: String,
    pub item_cost: i64,
    pub purchase_date: CalendarDate,
    pub created_at: Timestamp,
}

/// DTO for recording a redemption.
#[derive(Debug)]
pub struct CreatePurchase {
    pub user_id: DbId,
    pub item_id: DbId,
    pub item_name: String,
    pub item_cost: i64,
    pub purchase_date: CalendarDate,
}

/// Purchase shape for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub id: DbId,
    pub item_id: DbId,
    pub item_name: String,
    pub item_cost: i64,
    pub purchase_date: CalendarDate,
}

impl From<Purchase> for PurchaseResponse {
    fn from(p: Purchase) -> Self {
        PurchaseResponse {
            id: p.id,
            item_id: p.item_id,
            item_name: p.item_name,
            item_cost: p.item_cost,
            purchase_date: p.purchase_date,
        }
    }
}

/// One row of the per-item redemption summary.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRedemptionCount {
    pub item_id: DbId,
    pub item_name: String,
    pub count: i64,
}
