//! Repository for the `purchases` table.
//!
//! A redemption inserts the purchase row and debits the coin balance in
//! one transaction. The once-per-day-per-item rule is the table's
//! uniqueness constraint; a violation aborts the transaction before any
//! coins move, and the API layer maps it to the expected conflict.

use sqlx::PgPool;
use studyquest_core::types::{CalendarDate, DbId};

use crate::models::purchase::{CreatePurchase, ItemRedemptionCount, Purchase};
use crate::models::user::User;
use crate::repositories::user_repo::debit_coins_tx;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, item_id, item_name, item_cost, purchase_date, created_at";

/// Outcome of a redemption attempt.
#[derive(Debug)]
pub enum RedeemOutcome {
    /// Row inserted and coins debited.
    Purchased { purchase: Purchase, user: User },
    /// The balance no longer covers the cost; nothing was written.
    InsufficientFunds,
}

/// Provides persistence operations for redemptions.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Redeem an item: insert the purchase and debit the coins, atomically.
    ///
    /// The debit re-checks the balance inside the transaction, so a racing
    /// redemption cannot drive the balance negative. A same-day duplicate
    /// surfaces as the `uq_purchases_user_item_date` database error.
    pub async fn redeem(
        pool: &PgPool,
        input: &CreatePurchase,
    ) -> Result<RedeemOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO purchases (user_id, item_id, item_name, item_cost, purchase_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let purchase = sqlx::query_as::<_, Purchase>(&insert)
            .bind(input.user_id)
            .bind(input.item_id)
            .bind(&input.item_name)
            .bind(input.item_cost)
            .bind(input.purchase_date)
            .fetch_one(&mut *tx)
            .await?;

        let user = debit_coins_tx(&mut tx, input.user_id, input.item_cost).await?;

        let Some(user) = user else {
            tx.rollback().await?;
            return Ok(RedeemOutcome::InsufficientFunds);
        };

        tx.commit().await?;
        Ok(RedeemOutcome::Purchased { purchase, user })
    }

    /// A user's purchases, newest first, optionally restricted to one day.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        date: Option<CalendarDate>,
    ) -> Result<Vec<Purchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases
             WHERE user_id = $1 AND ($2::date IS NULL OR purchase_date = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// Per-item redemption counts across a user's whole history.
    pub async fn counts_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ItemRedemptionCount>, sqlx::Error> {
        sqlx::query_as::<_, ItemRedemptionCount>(
            "SELECT item_id, item_name, COUNT(*) AS count
             FROM purchases
             WHERE user_id = $1
             GROUP BY item_id, item_name
             ORDER BY item_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
