//! Contact-the-agent inquiries about a listing.
//!
//! Nothing is sent anywhere; submission validates the draft, waits out the
//! simulated latency and hands back a receipt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::Listing;
use crate::services::latency::{Call, Latency};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InquiryError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Inquiry is for property {draft}, not {listing}")]
    WrongListing { draft: u32, listing: u32 },
}

/// An inquiry being filled in for one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryDraft {
    pub property_id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl InquiryDraft {
    /// Empty contact details with the default message for this listing
    pub fn for_listing(listing: &Listing) -> Self {
        Self {
            property_id: listing.id,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            message: default_message(listing),
        }
    }

    pub fn validate(&self) -> Result<(), InquiryError> {
        if self.name.trim().is_empty() {
            return Err(InquiryError::MissingField("Name"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(InquiryError::MissingField("Email"));
        }
        if !looks_like_email(email) {
            return Err(InquiryError::InvalidEmail(email.to_string()));
        }
        if self.message.trim().is_empty() {
            return Err(InquiryError::MissingField("Message"));
        }
        Ok(())
    }
}

pub fn default_message(listing: &Listing) -> String {
    format!(
        "I'm interested in {} at {}. Please contact me with more information.",
        listing.title, listing.address.full
    )
}

// local@domain.tld, nothing stricter
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}

/// Acknowledgement of a submitted inquiry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryReceipt {
    pub property_id: u32,
    pub name: String,
    pub email: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct InquiryService {
    latency: Latency,
}

impl InquiryService {
    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    /// Validate and "send" the draft, then reset it for the next inquiry.
    pub async fn submit(
        &self,
        draft: &mut InquiryDraft,
        listing: &Listing,
    ) -> Result<InquiryReceipt, InquiryError> {
        if draft.property_id != listing.id {
            return Err(InquiryError::WrongListing {
                draft: draft.property_id,
                listing: listing.id,
            });
        }
        draft.validate()?;

        self.latency.wait(Call::SubmitInquiry).await;
        let receipt = InquiryReceipt {
            property_id: listing.id,
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            submitted_at: Utc::now(),
        };
        info!("Inquiry about property {} sent by {}", listing.id, receipt.email);

        *draft = InquiryDraft::for_listing(listing);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::listing;
    use crate::models::PropertyType;

    fn filled(listing: &Listing) -> InquiryDraft {
        let mut draft = InquiryDraft::for_listing(listing);
        draft.name = "Sam Rivera".to_string();
        draft.email = "sam@example.com".to_string();
        draft
    }

    #[test]
    fn test_default_message() {
        let home = listing(1, 200_000, 2, PropertyType::Condo, "Austin");
        assert_eq!(
            InquiryDraft::for_listing(&home).message,
            "I'm interested in Condo in Austin at 1 Main St, Austin, TX 78701. \
             Please contact me with more information."
        );
    }

    #[test]
    fn test_validation() {
        let home = listing(1, 200_000, 2, PropertyType::Condo, "Austin");
        let blank = InquiryDraft::for_listing(&home);
        assert_eq!(blank.validate(), Err(InquiryError::MissingField("Name")));

        let mut draft = filled(&home);
        assert_eq!(draft.validate(), Ok(()));

        draft.email = "sam.example.com".to_string();
        assert!(matches!(draft.validate(), Err(InquiryError::InvalidEmail(_))));

        draft.email = "sam@localhost".to_string();
        assert!(matches!(draft.validate(), Err(InquiryError::InvalidEmail(_))));

        let mut draft = filled(&home);
        draft.message = "   ".to_string();
        assert_eq!(draft.validate(), Err(InquiryError::MissingField("Message")));
    }

    #[tokio::test]
    async fn test_submit_resets_draft() {
        let home = listing(1, 200_000, 2, PropertyType::Condo, "Austin");
        let mut draft = filled(&home);
        draft.phone = "555-0100".to_string();

        let receipt = InquiryService::default()
            .submit(&mut draft, &home)
            .await
            .unwrap();
        assert_eq!(receipt.property_id, 1);
        assert_eq!(receipt.email, "sam@example.com");
        assert_eq!(draft, InquiryDraft::for_listing(&home));
    }

    #[tokio::test]
    async fn test_submit_rejects_other_listing() {
        let home = listing(1, 200_000, 2, PropertyType::Condo, "Austin");
        let other = listing(2, 500_000, 4, PropertyType::House, "Dallas");
        let mut draft = filled(&home);

        let err = InquiryService::default()
            .submit(&mut draft, &other)
            .await
            .unwrap_err();
        assert_eq!(err, InquiryError::WrongListing { draft: 1, listing: 2 });
        assert_eq!(draft.name, "Sam Rivera");
    }
}
