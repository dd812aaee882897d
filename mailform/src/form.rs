//! The email form: field values, staged attachment, field errors and the in-flight flag.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::attachment::{self, Attachment};
use crate::submit::{Delivery, MailApi, Payload};
use crate::validate::{validate, ErrorMap, Field};
use crate::{NoticeKind, Notifier, SubmitError};

pub const SENT: &str = "Email sent successfully!";

/// The editable text fields of one outgoing email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl FormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::From => &self.from,
            Field::To => &self.to,
            Field::Subject => &self.subject,
            Field::Text => &self.text,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::From => &mut self.from,
            Field::To => &mut self.to,
            Field::Subject => &mut self.subject,
            Field::Text => &mut self.text,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting,
}

/// Shared in-flight flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct SubmissionStatus(Arc<AtomicBool>);

impl SubmissionStatus {
    pub fn is_in_flight(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn begin(&self) -> InFlight<'_> {
        self.0.store(true, Ordering::SeqCst);
        InFlight(self)
    }
}

/// Clears the flag when the submission ends, however it ends.
struct InFlight<'a>(&'a SubmissionStatus);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; see [`EmailForm::errors`]. Nothing was sent.
    Invalid,
    /// The API accepted the email. The form has been reset.
    Sent(Delivery),
    /// The API rejected the email or could not be reached. The form is unchanged.
    Failed(SubmitError),
}

/// Holds the state of one email being composed and drives its submission.
pub struct EmailForm<A, N> {
    state: FormState,
    attachment: Option<Attachment>,
    errors: ErrorMap,
    status: SubmissionStatus,
    api: A,
    notifier: N,
}

impl<A, N> EmailForm<A, N>
where
    A: MailApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N) -> Self {
        EmailForm {
            state: FormState::default(),
            attachment: None,
            errors: ErrorMap::new(),
            status: SubmissionStatus::default(),
            api,
            notifier,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// A handle on the in-flight flag, e.g. to disable a send button.
    pub fn status(&self) -> SubmissionStatus {
        self.status.clone()
    }

    pub fn phase(&self) -> Phase {
        if self.status.is_in_flight() {
            Phase::Submitting
        } else {
            Phase::Editing
        }
    }

    /// Whether a send control should be enabled. Advisory only.
    pub fn can_submit(&self) -> bool {
        !self.status.is_in_flight()
    }

    /// Updates one field and clears that field's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.set(field, value);
        self.errors.clear(field);
    }

    /// Stages `candidate` if it passes the attachment gate, replacing any staged file.
    ///
    /// A rejected file raises an error notice and leaves the staged attachment untouched.
    pub fn select_attachment(&mut self, candidate: Attachment) -> bool {
        match attachment::check(&candidate) {
            Ok(()) => {
                log::debug!("staged {:?}", candidate);
                self.attachment = Some(candidate);
                true
            }
            Err(err) => {
                log::debug!("{}", err);
                self.notifier.notify(&err.notice_message(), err.notice_kind());
                false
            }
        }
    }

    /// Loads `path` and stages it. The gate runs before the file is read, so a
    /// rejected file is never loaded.
    pub async fn select_file(&mut self, path: impl AsRef<Path>) -> bool {
        match Attachment::from_path(path).await {
            Ok(candidate) => self.select_attachment(candidate),
            Err(err) => {
                log::debug!("{}", err);
                self.notifier.notify(&err.notice_message(), err.notice_kind());
                false
            }
        }
    }

    pub fn remove_attachment(&mut self) {
        self.attachment = None;
    }

    /// Recomputes every field error. Returns true when the form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.state);
        self.errors.is_empty()
    }

    /// Validates the form and, if valid, submits it once.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.validate() {
            log::debug!("not submitting, {} invalid field(s)", self.errors.len());
            return SubmitOutcome::Invalid;
        }

        let payload = Payload::new(&self.state, self.attachment.as_ref());
        let result = {
            let _in_flight = self.status.begin();
            self.api.send(payload).await
        };

        match result {
            Ok(delivery) => {
                self.notifier.notify(SENT, NoticeKind::Success);
                self.reset();
                SubmitOutcome::Sent(delivery)
            }
            Err(err) => {
                match &err {
                    SubmitError::Rejected { status, .. } => {
                        log::warn!("mail API rejected submission ({}): {}", status, err)
                    }
                    _ => log::error!("submission failed: {:?}", err),
                }
                self.notifier.notify(&err.notice_message(), err.notice_kind());
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn reset(&mut self) {
        self.state = FormState::default();
        self.attachment = None;
        self.errors = ErrorMap::new();
    }
}
