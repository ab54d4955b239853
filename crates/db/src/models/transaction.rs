use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display)]
#[sqlx(type_name = "transaction_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// One ledger line in the finance book.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub attachment_url: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub attachment_url: Option<String>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTransaction {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub attachment_url: Option<String>,
}

impl Transaction {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM transactions ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateTransaction) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO transactions (id, type, amount, category, description, date,
                                         attachment_url, created_by, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.transaction_type.clone())
        .bind(data.amount)
        .bind(&data.category)
        .bind(&data.description)
        .bind(data.date)
        .bind(&data.attachment_url)
        .bind(data.created_by)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateTransaction,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let transaction = sqlx::query_as::<_, Self>(
            r#"UPDATE transactions
               SET type = $2, amount = $3, category = $4, description = $5, date = $6,
                   attachment_url = $7, updated_at = $8
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.transaction_type.clone().unwrap_or(existing.transaction_type))
        .bind(data.amount.unwrap_or(existing.amount))
        .bind(data.category.clone().unwrap_or(existing.category))
        .bind(data.description.clone().unwrap_or(existing.description))
        .bind(data.date.unwrap_or(existing.date))
        .bind(data.attachment_url.clone().or(existing.attachment_url))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(transaction))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn ledger_lines_round_trip() {
        let pool = test_support::new_pool().await;
        let tx = Transaction::create(
            &pool,
            &CreateTransaction {
                transaction_type: TransactionType::Expense,
                amount: 99.99,
                category: "hosting".to_string(),
                description: "VPS renewal".to_string(),
                date: Utc::now(),
                attachment_url: None,
                created_by: Uuid::new_v4(),
            },
        )
        .await
        .unwrap();

        let found = Transaction::find_by_id(&pool, tx.id).await.unwrap().unwrap();
        assert_eq!(found.transaction_type, TransactionType::Expense);
        assert_eq!(found.amount, 99.99);
        assert_eq!(found.category, "hosting");
    }
}
