use serde::{Deserialize, Serialize};

/// Response from creating a Stripe checkout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutSessionResponse {
    /// The checkout session identifier to redirect the customer with.
    pub id: String,
}

/// Response from requesting the billing portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingPortalResponse {
    /// URL of the Stripe customer portal.
    pub url: String,
}
