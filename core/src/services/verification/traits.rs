//! Traits for SMS delivery integration

use async_trait::async_trait;

/// Trait for the outbound SMS collaborator
///
/// Implementations wrap a concrete provider. Delivery is fire-and-forget
/// from the core's perspective: a failure never rolls back an already
/// issued challenge.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver a message, returning the provider's message id
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String>;
}
