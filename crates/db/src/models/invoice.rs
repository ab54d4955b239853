use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type, types::Json};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub project_id: Uuid,
    pub client_id: Uuid,
    pub invoice_number: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub status: InvoiceStatus,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub payment_qr_url: Option<String>,
    pub bank_details: Option<Json<serde_json::Value>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoice {
    pub project_id: Uuid,
    pub client_id: Uuid,
    pub invoice_number: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub status: Option<InvoiceStatus>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub payment_qr_url: Option<String>,
    pub bank_details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInvoice {
    pub invoice_number: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<InvoiceStatus>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub payment_qr_url: Option<String>,
    pub bank_details: Option<serde_json::Value>,
}

impl Invoice {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM invoices ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_client_id(
        pool: &SqlitePool,
        client_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM invoices WHERE client_id = $1 ORDER BY created_at DESC",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_project_id(
        pool: &SqlitePool,
        project_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM invoices WHERE project_id = $1 ORDER BY created_at DESC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateInvoice) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO invoices (id, project_id, client_id, invoice_number, amount, due_date,
                                     status, description, notes, payment_qr_url, bank_details,
                                     created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.project_id)
        .bind(data.client_id)
        .bind(&data.invoice_number)
        .bind(data.amount)
        .bind(data.due_date)
        .bind(data.status.clone().unwrap_or_default())
        .bind(&data.description)
        .bind(&data.notes)
        .bind(&data.payment_qr_url)
        .bind(data.bank_details.clone().map(Json))
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    /// Field-level merge; `paid_at` is stamped when the status update lands
    /// on `paid` and left untouched otherwise.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateInvoice,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let status = data.status.clone().unwrap_or(existing.status.clone());
        let paid_at = if status == InvoiceStatus::Paid && existing.status != InvoiceStatus::Paid {
            Some(Utc::now())
        } else {
            existing.paid_at
        };

        let invoice = sqlx::query_as::<_, Self>(
            r#"UPDATE invoices
               SET invoice_number = $2, amount = $3, due_date = $4, status = $5,
                   description = $6, notes = $7, payment_qr_url = $8, bank_details = $9,
                   paid_at = $10, updated_at = $11
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.invoice_number.clone().unwrap_or(existing.invoice_number))
        .bind(data.amount.unwrap_or(existing.amount))
        .bind(data.due_date.unwrap_or(existing.due_date))
        .bind(status)
        .bind(data.description.clone().or(existing.description))
        .bind(data.notes.clone().or(existing.notes))
        .bind(data.payment_qr_url.clone().or(existing.payment_qr_url))
        .bind(data.bank_details.clone().map(Json).or(existing.bank_details))
        .bind(paid_at)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(invoice))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
