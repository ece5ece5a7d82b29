//! OTP repository trait defining the interface for OTP record persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp::OtpRecord;
use crate::errors::DomainResult;

/// Repository trait for OtpRecord persistence operations.
///
/// The backing store is the system of record for OTP state; the OTP
/// service is the sole mutator. Implementations must provide at least
/// read-committed isolation, and `supersede_active` must be a single
/// conditional update so it cannot race a concurrent verify without one
/// side winning cleanly.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a newly issued OTP record
    async fn create(&self, record: &OtpRecord) -> DomainResult<()>;

    /// Persist mutations to an existing record (attempts, is_used)
    async fn save(&self, record: &OtpRecord) -> DomainResult<()>;

    /// Most recently created record for a client, used or not
    async fn find_latest_by_client(&self, client_id: Uuid) -> DomainResult<Option<OtpRecord>>;

    /// Most recently created record for a client with `is_used = false`
    async fn find_latest_active_by_client(
        &self,
        client_id: Uuid,
    ) -> DomainResult<Option<OtpRecord>>;

    /// Mark every unused record for the client as used, returning the
    /// number of superseded records
    async fn supersede_active(&self, client_id: Uuid) -> DomainResult<u64>;
}
