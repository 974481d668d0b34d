//! Handlers for the `/store` resource (catalog, redemption, history).

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use studyquest_core::error::CoreError;
use studyquest_core::store::{check_affordable, find_item, StoreItem, CATALOG};
use studyquest_core::types::{CalendarDate, DbId};
use studyquest_db::models::purchase::{CreatePurchase, ItemRedemptionCount, PurchaseResponse};
use studyquest_db::models::user::UserResponse;
use studyquest_db::repositories::purchase_repo::RedeemOutcome;
use studyquest_db::repositories::PurchaseRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::load_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::{self, AppState};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /store/purchase`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub item_id: DbId,
}

/// Response body for a successful redemption.
#[derive(Debug, Serialize)]
pub struct PurchaseOutcome {
    pub purchase: PurchaseResponse,
    pub user: UserResponse,
}

/// Query parameters for `GET /store/purchases`.
#[derive(Debug, Deserialize)]
pub struct PurchaseListQuery {
    pub date: Option<CalendarDate>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/store/items
///
/// The fixed catalog. No database involved.
pub async fn list_items(_auth: AuthUser) -> Json<DataResponse<Vec<StoreItem>>> {
    Json(DataResponse {
        data: CATALOG.to_vec(),
    })
}

/// POST /api/store/purchase
///
/// Redeem a catalog item. The balance is checked before the transaction
/// and again inside it; the one-per-item-per-day rule is the table's
/// unique constraint and surfaces as 409.
pub async fn purchase(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<PurchaseRequest>,
) -> AppResult<Json<DataResponse<PurchaseOutcome>>> {
    let date = state::today();

    // 1. Resolve the item against the catalog.
    let item = find_item(input.item_id)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown store item: {}", input.item_id)))?;

    // 2. Cheap pre-check on the current balance.
    let user = load_user(&state, auth.user_id).await?;
    check_affordable(user.gold_coins, item)?;

    // 3. Insert and debit in one transaction.
    let outcome = PurchaseRepo::redeem(
        &state.pool,
        &CreatePurchase {
            user_id: user.id,
            item_id: item.id,
            item_name: item.name.to_string(),
            item_cost: item.cost,
            purchase_date: date,
        },
    )
    .await?;

    match outcome {
        RedeemOutcome::Purchased { purchase, user } => {
            tracing::info!(
                user_id = user.id,
                item_id = purchase.item_id,
                cost = purchase.item_cost,
                "Item redeemed"
            );
            Ok(Json(DataResponse {
                data: PurchaseOutcome {
                    purchase: purchase.into(),
                    user: user.into(),
                },
            }))
        }
        // The balance moved between the pre-check and the transaction.
        RedeemOutcome::InsufficientFunds => Err(AppError::Core(CoreError::Validation(format!(
            "insufficient gold coins for {}",
            item.name
        )))),
    }
}

/// GET /api/store/purchases?date=YYYY-MM-DD
///
/// Redemption history, newest first, optionally narrowed to one day.
pub async fn list_purchases(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PurchaseListQuery>,
) -> AppResult<Json<DataResponse<Vec<PurchaseResponse>>>> {
    let rows = PurchaseRepo::list_for_user(&state.pool, auth.user_id, query.date).await?;

    Ok(Json(DataResponse {
        data: rows.into_iter().map(PurchaseResponse::from).collect(),
    }))
}

/// GET /api/store/purchases/summary
///
/// Per-item redemption counts across the whole history.
pub async fn purchase_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ItemRedemptionCount>>>> {
    let counts = PurchaseRepo::counts_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: counts }))
}
