//! OTP lifecycle service implementation

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use fc_shared::utils::phone::{mask_phone_number, normalize_to_e164};

use crate::domain::entities::client::Client;
use crate::domain::entities::notification::{AuditEvent, AuditEventType};
use crate::domain::entities::otp::{OtpRecord, CODE_LENGTH};
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::{AuditEventRepository, ClientRepository, OtpRepository};

use super::config::OtpServiceConfig;
use super::traits::MessagingServiceTrait;
use super::types::{DeliveryOutcome, IssueOtpResult, OtpStatus, VerifiedClient};

/// OTP lifecycle manager.
///
/// Sole mutator of the per-client OTP record set. All state transitions
/// (supersession, attempt counting, terminal marking) go through this
/// service; expiry is evaluated lazily on each read, never scheduled.
pub struct OtpService<O, C, A, M>
where
    O: OtpRepository,
    C: ClientRepository,
    A: AuditEventRepository,
    M: MessagingServiceTrait,
{
    /// OTP record persistence (system of record)
    otp_repo: Arc<O>,
    /// Client lookups
    client_repo: Arc<C>,
    /// Append-only audit sink
    audit_repo: Arc<A>,
    /// External messaging delivery
    messaging: Arc<M>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<O, C, A, M> OtpService<O, C, A, M>
where
    O: OtpRepository,
    C: ClientRepository,
    A: AuditEventRepository,
    M: MessagingServiceTrait,
{
    /// Create a new OTP service
    pub fn new(
        otp_repo: Arc<O>,
        client_repo: Arc<C>,
        audit_repo: Arc<A>,
        messaging: Arc<M>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            otp_repo,
            client_repo,
            audit_repo,
            messaging,
            config,
        }
    }

    /// Issue a new OTP for a client.
    ///
    /// Supersedes every unused record for the client before the new one
    /// is created, preserving the single-active-OTP invariant, then
    /// attempts best-effort delivery. A delivery failure does not
    /// invalidate the freshly issued code; it is reported through
    /// `IssueOtpResult::delivery` instead.
    pub async fn issue_otp(
        &self,
        client_id: Uuid,
        actor_id: Option<Uuid>,
    ) -> DomainResult<IssueOtpResult> {
        let (client, phone) = self.resolve_destination(client_id).await?;
        self.issue_internal(client, phone, actor_id, AuditEventType::OtpIssued)
            .await
    }

    /// Resend an OTP for a client.
    ///
    /// Rejected with `RateLimited` while the latest record is still valid
    /// and younger than the cooldown; otherwise proceeds exactly as issue.
    /// Only resend is throttled; the initial issue path is not.
    pub async fn resend_otp(
        &self,
        client_id: Uuid,
        actor_id: Option<Uuid>,
    ) -> DomainResult<IssueOtpResult> {
        let (client, phone) = self.resolve_destination(client_id).await?;

        let now = Utc::now();
        if let Some(latest) = self.otp_repo.find_latest_by_client(client_id).await? {
            if latest.is_valid(now) {
                if let Some(wait_seconds) =
                    latest.resend_wait_seconds(now, self.config.resend_cooldown_seconds)
                {
                    tracing::warn!(
                        client_id = %client_id,
                        wait_seconds,
                        event = "otp_resend_throttled",
                        "OTP resend rejected by cooldown"
                    );
                    self.record_audit(
                        AuditEvent::new(AuditEventType::OtpRateLimited, client_id)
                            .with_otp(latest.id)
                            .with_message(format!(
                                "Resend rejected, {} seconds of cooldown remaining",
                                wait_seconds
                            )),
                    )
                    .await;
                    return Err(OtpError::RateLimited { wait_seconds }.into());
                }
            }
        }

        self.issue_internal(client, phone, actor_id, AuditEventType::OtpResent)
            .await
    }

    /// Verify a submitted code for a client.
    ///
    /// The validity predicate is evaluated here, at verification time.
    /// Every outcome that consumes the record marks it used in the same
    /// step as the decision, so a code can be consumed exactly once.
    pub async fn verify_otp(
        &self,
        client_id: Uuid,
        submitted_code: &str,
    ) -> DomainResult<VerifiedClient> {
        if submitted_code.len() != CODE_LENGTH
            || !submitted_code.chars().all(|c| c.is_ascii_digit())
        {
            tracing::warn!(
                client_id = %client_id,
                event = "otp_malformed_code",
                "Malformed OTP submission"
            );
            return Err(OtpError::InvalidOtp {
                attempts_left: None,
            }
            .into());
        }

        let now = Utc::now();
        let mut record = match self.otp_repo.find_latest_active_by_client(client_id).await? {
            Some(record) => record,
            None => {
                // Deliberately indistinguishable from a wrong code so the
                // response does not reveal whether a code is pending.
                self.record_audit(
                    AuditEvent::new(AuditEventType::OtpVerifyFailed, client_id)
                        .with_message("Verification attempt with no active code"),
                )
                .await;
                return Err(OtpError::InvalidOtp {
                    attempts_left: None,
                }
                .into());
            }
        };

        if !record.is_valid(now) {
            record.mark_used();
            self.otp_repo.save(&record).await?;
            tracing::info!(
                client_id = %client_id,
                otp_id = %record.id,
                event = "otp_expired",
                "Stale OTP retired on verification attempt"
            );
            self.record_audit(
                AuditEvent::new(AuditEventType::OtpVerifyFailed, client_id)
                    .with_otp(record.id)
                    .with_message("Verification attempt against expired or exhausted code"),
            )
            .await;
            return Err(OtpError::Expired.into());
        }

        record.attempts += 1;

        if !record.matches(submitted_code) {
            self.otp_repo.save(&record).await?;
            let attempts_left = (self.config.max_attempts - record.attempts).max(0);
            tracing::warn!(
                client_id = %client_id,
                otp_id = %record.id,
                attempts_left,
                event = "otp_verify_failed",
                "OTP verification failed"
            );
            self.record_audit(
                AuditEvent::new(AuditEventType::OtpVerifyFailed, client_id)
                    .with_otp(record.id)
                    .with_message(format!(
                        "Wrong code submitted, {} attempt(s) remaining",
                        attempts_left
                    )),
            )
            .await;
            return Err(OtpError::InvalidOtp {
                attempts_left: Some(attempts_left),
            }
            .into());
        }

        // Terminal write happens with the match confirmation so the same
        // code cannot be replayed between check and write.
        record.mark_used();
        self.otp_repo.save(&record).await?;

        tracing::info!(
            client_id = %client_id,
            otp_id = %record.id,
            event = "otp_verified",
            "OTP verified successfully"
        );
        self.record_audit(
            AuditEvent::new(AuditEventType::OtpVerified, client_id)
                .with_otp(record.id)
                .with_message("Client identity verified"),
        )
        .await;

        Ok(VerifiedClient {
            client_id,
            verified_at: now,
        })
    }

    /// Read-only snapshot of a client's OTP state. Never mutates state;
    /// a stale-but-unswept record is reported with `has_active_otp: false`.
    /// Reads the latest record regardless of its used flag, so a freshly
    /// verified client shows `is_used: true` rather than an empty status.
    pub async fn otp_status(&self, client_id: Uuid) -> DomainResult<OtpStatus> {
        let now = Utc::now();
        let status = match self.otp_repo.find_latest_by_client(client_id).await? {
            Some(record) => OtpStatus {
                has_active_otp: record.is_valid(now),
                is_used: record.is_used,
                attempts: record.attempts,
                expires_in_seconds: record.seconds_until_expiry(now),
            },
            None => OtpStatus::none(),
        };
        Ok(status)
    }

    /// Resolve a client and the normalized destination phone number
    async fn resolve_destination(&self, client_id: Uuid) -> DomainResult<(Client, String)> {
        let client = self
            .client_repo
            .find_by_id(client_id)
            .await?
            .ok_or(OtpError::ClientNotFound)?;

        let raw_phone = client
            .phone
            .clone()
            .ok_or(OtpError::NoPhoneOnFile)?;

        let phone = normalize_to_e164(&raw_phone, &self.config.default_country_code).ok_or(
            DomainError::Validation {
                message: format!(
                    "Phone number on file for client {} is not a valid destination",
                    client_id
                ),
            },
        )?;

        Ok((client, phone))
    }

    /// Shared issue path for both issue and resend
    async fn issue_internal(
        &self,
        client: Client,
        phone: String,
        actor_id: Option<Uuid>,
        event_type: AuditEventType,
    ) -> DomainResult<IssueOtpResult> {
        // Supersession must complete before the new record exists so two
        // concurrent issues can never leave two active codes behind.
        let superseded = self.otp_repo.supersede_active(client.id).await?;
        if superseded > 0 {
            tracing::info!(
                client_id = %client.id,
                superseded,
                event = "otp_superseded",
                "Marked prior unused OTP record(s) as used"
            );
        }

        let record = OtpRecord::new_with_expiration(
            client.id,
            phone,
            self.config.code_expiration_minutes,
        );
        self.otp_repo.create(&record).await?;

        tracing::info!(
            client_id = %client.id,
            otp_id = %record.id,
            phone = mask_phone_number(&record.phone),
            event = "otp_issued",
            "Issued new OTP code"
        );

        let mut audit = AuditEvent::new(event_type, client.id)
            .with_otp(record.id)
            .with_message(format!("OTP issued to {}", mask_phone_number(&record.phone)));
        if let Some(actor_id) = actor_id {
            audit = audit.with_actor(actor_id);
        }
        self.record_audit(audit).await;

        let delivery = if self.config.delivery_enabled {
            match self
                .messaging
                .send_code(&record.phone, &record.code, &client.name)
                .await
            {
                Ok(message_id) => {
                    tracing::info!(
                        client_id = %client.id,
                        message_id = %message_id,
                        event = "otp_delivered",
                        "OTP message accepted by provider"
                    );
                    DeliveryOutcome::Sent { message_id }
                }
                Err(error) => {
                    // Non-fatal: the record stays valid, the caller is
                    // told delivery failed.
                    tracing::warn!(
                        client_id = %client.id,
                        otp_id = %record.id,
                        error = %error,
                        event = "otp_delivery_failed",
                        "OTP delivery failed"
                    );
                    self.record_audit(
                        AuditEvent::new(AuditEventType::OtpDeliveryFailed, client.id)
                            .with_otp(record.id)
                            .with_message(format!("Delivery failed: {}", error)),
                    )
                    .await;
                    DeliveryOutcome::Failed { error }
                }
            }
        } else {
            tracing::info!(
                client_id = %client.id,
                otp_id = %record.id,
                event = "otp_delivery_skipped",
                "Delivery disabled by configuration"
            );
            DeliveryOutcome::Skipped {
                echoed_code: self
                    .config
                    .echo_code_when_disabled
                    .then(|| record.code.clone()),
            }
        };

        let next_resend_at =
            record.created_at + Duration::seconds(self.config.resend_cooldown_seconds);

        Ok(IssueOtpResult {
            record,
            delivery,
            next_resend_at,
        })
    }

    /// Append an audit event; failures are logged and swallowed so audit
    /// writes never block the OTP flow.
    async fn record_audit(&self, event: AuditEvent) {
        if let Err(error) = self.audit_repo.create(&event).await {
            tracing::warn!(
                error = %error,
                event_type = event.event_type.as_str(),
                client_id = %event.client_id,
                "Failed to record audit event"
            );
        }
    }
}
