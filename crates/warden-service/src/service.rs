//! The serialized lock façade
//!
//! `LockService` owns the session/config pair and is the only path
//! collaborators take into the lock. All mutable state sits behind one
//! mutex; the lockout expiry task re-locks it before acting, so timer
//! expiry and user input never interleave.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{error, info};

use warden_core::{
    AuditCategory, AuditEntry, CoreError, LockConfig, LockSession, LockStatus, SubmitOutcome,
    CREDENTIAL_LEN,
};

use crate::audit_log::AuditLog;
use crate::error::{Result, ServiceError};
use crate::paths;
use crate::settings::SettingsStore;
use crate::timer::LockoutTimer;

struct Inner {
    config: LockConfig,
    session: LockSession,
    settings: SettingsStore,
    audit: AuditLog,
    timer: LockoutTimer,
    last_security_report: u32,
}

impl Inner {
    /// Best-effort audit append. A failed write never changes a lock
    /// decision; it degrades to an error trace.
    fn log(&self, category: AuditCategory, detail: impl Into<String>) {
        let entry = AuditEntry::new(category, detail);
        if let Err(e) = self.audit.append(&entry) {
            error!("Logging error: {e}");
        }
    }

    /// Repeated-lockout check, run when a lockout trips. Fires once per
    /// distinct counter value.
    fn report_repeated_lockouts(&mut self) {
        let failures = self.session.failure_count();
        if failures >= self.config.max_attempts * 2 && self.last_security_report != failures {
            self.last_security_report = failures;
            self.log(
                AuditCategory::Security,
                format!("Multiple lockouts detected: {failures}"),
            );
        }
    }
}

/// Serialized façade over the lock state machine, its persistence and the
/// lockout countdown
pub struct LockService {
    inner: Arc<Mutex<Inner>>,
}

impl LockService {
    /// Open the stores under `data_dir` and load the persisted
    /// configuration. A missing or corrupt settings file starts from
    /// defaults.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let settings = SettingsStore::new(
            data_dir.join(paths::SETTINGS_FILE),
            data_dir.join(paths::BACKUP_FILE),
        );
        let audit = AuditLog::new(data_dir.join(paths::LOG_FILE));
        let config = settings.load();

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                config,
                session: LockSession::new(),
                settings,
                audit,
                timer: LockoutTimer::new(),
                last_security_report: 0,
            })),
        })
    }

    /// Open the stores under the default data directory
    pub fn open_default() -> Result<Self> {
        Self::open(&paths::default_data_dir())
    }

    // --- keypad ---

    /// Append a digit to the input buffer; reports whether it was accepted
    pub async fn push_digit(&self, digit: char) -> bool {
        self.inner.lock().await.session.push_digit(digit)
    }

    /// Remove the last buffered digit
    pub async fn pop_digit(&self) -> bool {
        self.inner.lock().await.session.pop_digit()
    }

    /// Empty the input buffer; the failure counter is untouched
    pub async fn clear_input(&self) -> bool {
        self.inner.lock().await.session.clear_input()
    }

    /// Validate the buffered input against the configured credential.
    ///
    /// The accept/deny decision never depends on whether the audit write
    /// succeeds.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        let mut inner = self.inner.lock().await;

        if inner.session.is_locked() {
            return Err(CoreError::Locked.into());
        }
        if inner.session.input().len() != CREDENTIAL_LEN {
            inner.log(AuditCategory::Failed, "Invalid length");
            return Err(CoreError::InvalidLength.into());
        }

        let attempted = inner.session.input().to_owned();
        let outcome = {
            let Inner {
                session, config, ..
            } = &mut *inner;
            session.submit(config)?
        };

        match outcome {
            SubmitOutcome::Granted => {
                inner.log(AuditCategory::Success, "Correct password");
                info!("access granted");
            }
            SubmitOutcome::Denied { locked, .. } => {
                inner.log(
                    AuditCategory::Failed,
                    format!("Wrong password: {attempted}"),
                );
                if locked {
                    let failures = inner.session.failure_count();
                    inner.log(
                        AuditCategory::Locked,
                        format!("Too many attempts: {failures}"),
                    );
                    inner.report_repeated_lockouts();
                    self.arm_lockout(&mut inner);
                    info!("lockout tripped after {failures} failures");
                }
            }
        }

        Ok(outcome)
    }

    /// Force the locked state immediately, callable in any state
    pub async fn emergency_lock(&self) {
        let mut inner = self.inner.lock().await;
        let max_attempts = inner.config.max_attempts;
        inner.session.emergency_lock(max_attempts);
        inner.log(AuditCategory::Emergency, "Emergency lock activated by user");
        self.arm_lockout(&mut inner);
    }

    /// Arm the lockout countdown for the configured duration. The expiry
    /// task re-locks the service state and verifies its generation, so a
    /// superseded arm can never double-fire.
    fn arm_lockout(&self, inner: &mut Inner) {
        let duration = Duration::from_secs(inner.config.lockout_time);
        let shared = Arc::clone(&self.inner);
        inner.timer.arm(duration, move |generation| async move {
            let mut inner = shared.lock().await;
            if !inner.timer.is_current(generation) {
                return;
            }
            inner.timer.finish();
            // Natural expiry is deliberately silent in the audit log.
            if inner.session.release_lockout() {
                info!("lockout expired; lock ready");
            }
        });
    }

    // --- admin ---

    /// Change the credential. Validation order: current credential, new
    /// format, confirmation match. Weak-credential confirmation is the
    /// collaborator's gate, before calling in.
    pub async fn change_password(&self, old: &str, new: &str, confirm: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;

        if old != inner.config.password {
            return Err(CoreError::WrongCurrent.into());
        }
        if !LockConfig::is_valid_credential(new) {
            return Err(CoreError::InvalidFormat.into());
        }
        if new != confirm {
            return Err(CoreError::Mismatch.into());
        }

        inner.config.password = new.to_owned();
        inner.log(
            AuditCategory::PasswordChange,
            "Password updated successfully",
        );
        inner.settings.save(&inner.config)
    }

    /// Reset the transient session state; configuration is untouched
    pub async fn reset_session(&self) {
        let mut inner = self.inner.lock().await;
        inner.timer.cancel();
        inner.session.reset();
        inner.log(AuditCategory::System, "System reset to default state");
    }

    /// Restore factory defaults, clear the session and wipe the audit
    /// log. The collaborator must double-confirm before calling.
    pub async fn factory_reset(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.timer.cancel();
        inner.session.reset();
        inner.last_security_report = 0;
        inner.config = LockConfig::default();
        inner.settings.save(&inner.config)?;
        inner.audit.clear()?;
        inner.log(AuditCategory::System, "Factory reset performed");
        Ok(())
    }

    pub async fn set_max_attempts(&self, value: u32) -> Result<()> {
        if value == 0 {
            return Err(ServiceError::InvalidConfig(
                "max_attempts must be positive".into(),
            ));
        }
        let mut inner = self.inner.lock().await;
        inner.config.max_attempts = value;
        inner.settings.save(&inner.config)
    }

    pub async fn set_lockout_secs(&self, value: u64) -> Result<()> {
        if value == 0 {
            return Err(ServiceError::InvalidConfig(
                "lockout_time must be positive".into(),
            ));
        }
        let mut inner = self.inner.lock().await;
        inner.config.lockout_time = value;
        inner.settings.save(&inner.config)
    }

    pub async fn set_audio_feedback(&self, enabled: bool) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.config.audio_feedback = enabled;
        inner.settings.save(&inner.config)
    }

    pub async fn set_haptic_feedback(&self, enabled: bool) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.config.haptic_feedback = enabled;
        inner.settings.save(&inner.config)
    }

    /// Write a snapshot of the current configuration
    pub async fn backup(&self) -> Result<()> {
        let inner = self.inner.lock().await;
        inner.settings.backup(&inner.config)
    }

    /// Apply the snapshot to the live configuration and persist it
    pub async fn restore(&self) -> Result<LockConfig> {
        let mut inner = self.inner.lock().await;
        let restored = inner.settings.restore()?;
        inner.config = restored.clone();
        inner.settings.save(&inner.config)?;
        Ok(restored)
    }

    // --- audit log ---

    pub async fn read_log(&self) -> Result<Vec<AuditEntry>> {
        self.inner.lock().await.audit.read_all()
    }

    pub async fn read_log_raw(&self) -> Result<String> {
        self.inner.lock().await.audit.read_raw()
    }

    pub async fn clear_log(&self) -> Result<()> {
        self.inner.lock().await.audit.clear()
    }

    pub async fn export_log(&self, dest: &Path) -> Result<()> {
        self.inner.lock().await.audit.export_to(dest)
    }

    /// Record a collaborator navigation event
    pub async fn note_navigation(&self, detail: impl Into<String>) {
        self.inner.lock().await.log(AuditCategory::Navigation, detail);
    }

    // --- introspection ---

    pub async fn config(&self) -> LockConfig {
        self.inner.lock().await.config.clone()
    }

    pub async fn status(&self) -> LockStatus {
        self.inner.lock().await.session.status()
    }

    pub async fn is_locked(&self) -> bool {
        self.inner.lock().await.session.is_locked()
    }

    pub async fn failure_count(&self) -> u32 {
        self.inner.lock().await.session.failure_count()
    }

    /// Failure count as shown to the operator, wrapped at the attempt limit
    pub async fn attempts_display(&self) -> u32 {
        let inner = self.inner.lock().await;
        inner.session.attempts_display(inner.config.max_attempts)
    }

    pub async fn input_len(&self) -> usize {
        self.inner.lock().await.session.input().len()
    }

    /// Seconds left on the lockout countdown, zero when not locked
    pub async fn lockout_remaining_secs(&self) -> u64 {
        self.inner.lock().await.timer.remaining_secs()
    }
}
