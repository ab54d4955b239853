use db::models::{
    enquiry::{Enquiry, EnquiryStatus, UpdateEnquiry},
    lead::{CreateLead, Lead, LeadStatus},
};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

pub struct EnquiryService;

impl EnquiryService {
    /// Seed a pipeline lead from a website enquiry and mark the enquiry
    /// converted.
    pub async fn convert_to_lead(
        pool: &SqlitePool,
        enquiry_id: Uuid,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let Some(enquiry) = Enquiry::find_by_id(pool, enquiry_id).await? else {
            return Ok(None);
        };

        let lead = Lead::create(
            pool,
            &CreateLead {
                name: enquiry.name.clone(),
                email: enquiry.email.clone(),
                phone: enquiry.phone.clone(),
                status: Some(LeadStatus::New),
                source: Some("Website Enquiry".to_string()),
                notes: Some(format!("Original Message: {}", enquiry.message)),
                potential_value: Some(0.0),
                probability: Some(0),
                ..Default::default()
            },
        )
        .await?;

        Enquiry::update(
            pool,
            enquiry.id,
            &UpdateEnquiry {
                status: Some(EnquiryStatus::Converted),
                converted: Some(true),
            },
        )
        .await?;

        info!(enquiry_id = %enquiry.id, lead_id = %lead.id, "enquiry converted to lead");
        Ok(Some(lead))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::{models::enquiry::CreateEnquiry, test_support};

    #[tokio::test]
    async fn conversion_creates_a_new_lead_and_flags_the_enquiry() {
        let pool = test_support::new_pool().await;
        let enquiry = Enquiry::create(
            &pool,
            &CreateEnquiry {
                name: "Sam".to_string(),
                email: "sam@example.com".to_string(),
                phone: Some("0412".to_string()),
                message: "Looking for a booking system".to_string(),
            },
        )
        .await
        .unwrap();

        let lead = EnquiryService::convert_to_lead(&pool, enquiry.id)
            .await
            .unwrap()
            .expect("enquiry exists");

        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.source.as_deref(), Some("Website Enquiry"));
        assert!(lead.notes.as_deref().unwrap().contains("booking system"));

        let converted = Enquiry::find_by_id(&pool, enquiry.id).await.unwrap().unwrap();
        assert_eq!(converted.status, EnquiryStatus::Converted);
        assert!(converted.converted);
    }

    #[tokio::test]
    async fn converting_a_missing_enquiry_returns_none() {
        let pool = test_support::new_pool().await;
        let result = EnquiryService::convert_to_lead(&pool, Uuid::new_v4()).await.unwrap();
        assert!(result.is_none());
    }
}
