use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "quotation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

/// A quotation is addressed either to a registered client or to an ad hoc
/// person/company captured inline.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quotation {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub client_company: Option<String>,
    pub client_is_company: bool,
    pub quotation_number: String,
    pub amount: f64,
    pub currency: String,
    pub valid_until: DateTime<Utc>,
    pub status: QuotationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuotation {
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub client_company: Option<String>,
    pub client_is_company: Option<bool>,
    pub quotation_number: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub valid_until: DateTime<Utc>,
    pub status: Option<QuotationStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateQuotation {
    pub client_name: Option<String>,
    pub client_company: Option<String>,
    pub client_is_company: Option<bool>,
    pub quotation_number: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub status: Option<QuotationStatus>,
}

impl Quotation {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM quotations ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM quotations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateQuotation) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO quotations (id, client_id, client_name, client_company, client_is_company,
                                       quotation_number, amount, currency, valid_until, status,
                                       created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.client_id)
        .bind(&data.client_name)
        .bind(&data.client_company)
        .bind(data.client_is_company.unwrap_or(false))
        .bind(&data.quotation_number)
        .bind(data.amount)
        .bind(data.currency.clone().unwrap_or_else(|| "USD".to_string()))
        .bind(data.valid_until)
        .bind(data.status.clone().unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateQuotation,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let quotation = sqlx::query_as::<_, Self>(
            r#"UPDATE quotations
               SET client_name = $2, client_company = $3, client_is_company = $4,
                   quotation_number = $5, amount = $6, currency = $7, valid_until = $8,
                   status = $9, updated_at = $10
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.client_name.clone().or(existing.client_name))
        .bind(data.client_company.clone().or(existing.client_company))
        .bind(data.client_is_company.unwrap_or(existing.client_is_company))
        .bind(data.quotation_number.clone().unwrap_or(existing.quotation_number))
        .bind(data.amount.unwrap_or(existing.amount))
        .bind(data.currency.clone().unwrap_or(existing.currency))
        .bind(data.valid_until.unwrap_or(existing.valid_until))
        .bind(data.status.clone().unwrap_or(existing.status))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(quotation))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quotations WHERE id = $1")
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
    async fn create_defaults_to_usd_draft() {
        let pool = test_support::new_pool().await;
        let quotation = Quotation::create(
            &pool,
            &CreateQuotation {
                client_id: None,
                client_name: Some("Jo Byrne".to_string()),
                client_company: None,
                client_is_company: None,
                quotation_number: "Q-2024-07".to_string(),
                amount: 1800.0,
                currency: None,
                valid_until: Utc::now(),
                status: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(quotation.status, QuotationStatus::Draft);
        assert_eq!(quotation.currency, "USD");
        assert!(!quotation.client_is_company);
    }
}
