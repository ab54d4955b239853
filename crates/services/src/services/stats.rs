//! Dashboard aggregation over already-fetched collections. Collections are
//! admin-sized (hundreds of rows), so plain O(n) scans on demand are fine.

use db::models::{
    enquiry::{Enquiry, EnquiryStatus},
    invoice::{Invoice, InvoiceStatus},
    lead::{Lead, LeadStatus},
    project::{Project, ProjectStatus},
    support_request::{SupportRequest, SupportStatus},
    transaction::{Transaction, TransactionType},
    user::{User, UserRole},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub pending_amount: f64,
    pub paid_invoices: usize,
    pub pending_invoices: usize,
    pub active_projects: usize,
    pub pending_projects: usize,
    pub open_support_requests: usize,
    pub client_count: usize,
}

pub fn dashboard_stats(
    projects: &[Project],
    invoices: &[Invoice],
    support: &[SupportRequest],
    users: &[User],
) -> DashboardStats {
    let total_revenue = invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Paid)
        .map(|i| i.amount)
        .sum();
    let pending_amount = invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Pending)
        .map(|i| i.amount)
        .sum();

    DashboardStats {
        total_revenue,
        pending_amount,
        paid_invoices: invoices.iter().filter(|i| i.status == InvoiceStatus::Paid).count(),
        pending_invoices: invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Pending)
            .count(),
        active_projects: projects
            .iter()
            .filter(|p| {
                matches!(
                    p.status,
                    ProjectStatus::Accepted | ProjectStatus::InProgress | ProjectStatus::Testing
                )
            })
            .count(),
        pending_projects: projects
            .iter()
            .filter(|p| {
                matches!(p.status, ProjectStatus::Pending | ProjectStatus::UnderReview)
            })
            .count(),
        open_support_requests: support
            .iter()
            .filter(|s| matches!(s.status, SupportStatus::Open | SupportStatus::InProgress))
            .count(),
        client_count: users.iter().filter(|u| u.role == UserRole::Client).count(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineStage {
    pub status: LeadStatus,
    pub count: usize,
    pub total_value: f64,
}

/// One bucket per pipeline stage, in kanban order. Every lead lands in
/// exactly one bucket.
pub fn lead_pipeline(leads: &[Lead]) -> Vec<PipelineStage> {
    LeadStatus::stages()
        .into_iter()
        .map(|status| {
            let stage_leads: Vec<&Lead> = leads.iter().filter(|l| l.status == status).collect();
            PipelineStage {
                count: stage_leads.len(),
                total_value: stage_leads
                    .iter()
                    .map(|l| l.potential_value.unwrap_or(0.0))
                    .sum(),
                status,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct EnquiryStats {
    pub total: usize,
    pub new: usize,
    pub converted: usize,
    /// Percentage of enquiries that have moved past `new`, 0-100.
    pub response_rate: u32,
}

pub fn enquiry_stats(enquiries: &[Enquiry]) -> EnquiryStats {
    let total = enquiries.len();
    let new = enquiries.iter().filter(|e| e.status == EnquiryStatus::New).count();
    let converted = enquiries
        .iter()
        .filter(|e| e.status == EnquiryStatus::Converted)
        .count();
    let response_rate = if total == 0 {
        0
    } else {
        (((total - new) as f64 / total as f64) * 100.0).round() as u32
    };
    EnquiryStats {
        total,
        new,
        converted,
        response_rate,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FinanceSummary {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

pub fn finance_summary(transactions: &[Transaction]) -> FinanceSummary {
    let income = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Income)
        .map(|t| t.amount)
        .sum::<f64>();
    let expenses = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
        .map(|t| t.amount)
        .sum::<f64>();
    FinanceSummary {
        income,
        expenses,
        net: income - expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::{
        models::{
            invoice::{CreateInvoice, UpdateInvoice},
            lead::CreateLead,
        },
        test_support,
    };
    use chrono::Utc;
    use uuid::Uuid;

    async fn seed_invoice(
        pool: &sqlx::SqlitePool,
        amount: f64,
        status: InvoiceStatus,
    ) -> Invoice {
        let invoice = Invoice::create(
            pool,
            &CreateInvoice {
                project_id: Uuid::new_v4(),
                client_id: Uuid::new_v4(),
                invoice_number: format!("INV-{amount}"),
                amount,
                due_date: Utc::now(),
                status: None,
                description: None,
                notes: None,
                payment_qr_url: None,
                bank_details: None,
            },
        )
        .await
        .unwrap();
        Invoice::update(
            pool,
            invoice.id,
            &UpdateInvoice {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap()
    }

    #[tokio::test]
    async fn revenue_sums_paid_invoices_in_any_order() {
        let pool = test_support::new_pool().await;
        let mut invoices = vec![
            seed_invoice(&pool, 100.0, InvoiceStatus::Paid).await,
            seed_invoice(&pool, 50.0, InvoiceStatus::Pending).await,
            seed_invoice(&pool, 200.0, InvoiceStatus::Paid).await,
            seed_invoice(&pool, 75.0, InvoiceStatus::Cancelled).await,
        ];

        let forward = dashboard_stats(&[], &invoices, &[], &[]);
        invoices.reverse();
        let backward = dashboard_stats(&[], &invoices, &[], &[]);

        assert_eq!(forward.total_revenue, 300.0);
        assert_eq!(backward.total_revenue, 300.0);
        assert_eq!(forward.pending_amount, 50.0);
        assert_eq!(forward.paid_invoices, 2);
    }

    #[tokio::test]
    async fn pipeline_buckets_partition_all_leads() {
        let pool = test_support::new_pool().await;
        let statuses = [
            LeadStatus::New,
            LeadStatus::New,
            LeadStatus::Qualified,
            LeadStatus::Won,
            LeadStatus::Lost,
        ];
        for (i, status) in statuses.iter().enumerate() {
            db::models::lead::Lead::create(
                &pool,
                &CreateLead {
                    name: format!("Lead {i}"),
                    email: format!("lead{i}@example.com"),
                    status: Some(status.clone()),
                    potential_value: Some(1000.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        let leads = Lead::find_all(&pool).await.unwrap();
        let pipeline = lead_pipeline(&leads);

        assert_eq!(pipeline.len(), 7);
        let bucketed: usize = pipeline.iter().map(|s| s.count).sum();
        assert_eq!(bucketed, leads.len());

        let new_stage = pipeline.iter().find(|s| s.status == LeadStatus::New).unwrap();
        assert_eq!(new_stage.count, 2);
        assert_eq!(new_stage.total_value, 2000.0);
    }

    #[test]
    fn enquiry_response_rate_counts_everything_past_new() {
        assert_eq!(enquiry_stats(&[]).response_rate, 0);
    }
}
