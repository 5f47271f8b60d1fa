//! Submission sequencing for create/edit forms.
//!
//! A form closes and resets only after its store operation succeeds. On
//! failure it stays open with the same draft and the error message, so the
//! user can correct and resubmit.

use std::future::Future;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Open,
    Submitting,
    Closed,
}

#[derive(Debug, Clone)]
pub struct FormSession<D> {
    initial: D,
    draft: D,
    state: FormState,
    error: Option<String>,
}

impl<D: Clone> FormSession<D> {
    #[must_use]
    pub fn open(initial: D) -> Self {
        Self {
            draft: initial.clone(),
            initial,
            state: FormState::Open,
            error: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != FormState::Closed
    }

    #[must_use]
    pub const fn draft(&self) -> &D {
        &self.draft
    }

    /// Editable draft; `None` while submitting or once closed.
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        (self.state == FormState::Open).then_some(&mut self.draft)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reopen a closed form with the initial values.
    pub fn reopen(&mut self) {
        self.draft = self.initial.clone();
        self.state = FormState::Open;
        self.error = None;
    }

    /// Mark the form submitting and hand out the draft to send.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Busy`] while a submission is in flight and
    /// [`StoreError::FormClosed`] after a successful one.
    pub fn begin_submit(&mut self) -> Result<D, StoreError> {
        match self.state {
            FormState::Submitting => Err(StoreError::Busy),
            FormState::Closed => Err(StoreError::FormClosed),
            FormState::Open => {
                self.state = FormState::Submitting;
                self.error = None;
                Ok(self.draft.clone())
            }
        }
    }

    /// Settle a submission: close and reset on success, reopen with the
    /// error otherwise.
    ///
    /// # Errors
    ///
    /// Passes the operation's error through.
    pub fn finish_submit<T>(&mut self, outcome: Result<T, StoreError>) -> Result<T, StoreError> {
        match outcome {
            Ok(value) => {
                self.draft = self.initial.clone();
                self.state = FormState::Closed;
                self.error = None;
                Ok(value)
            }
            Err(error) => {
                self.state = FormState::Open;
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Run `operation` on the current draft and settle the form with its outcome.
    ///
    /// # Errors
    ///
    /// Returns the operation's error, or the [`Self::begin_submit`] refusal.
    pub async fn submit<T, F, Fut>(&mut self, operation: F) -> Result<T, StoreError>
    where
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let draft = self.begin_submit()?;
        let outcome = operation(draft).await;
        self.finish_submit(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_client::ClientError;

    fn rejected() -> StoreError {
        StoreError::Client(ClientError::Api {
            status: 400,
            message: r#"{"name":["required"]}"#.into(),
        })
    }

    #[tokio::test]
    async fn failure_keeps_form_open_with_same_draft() {
        let mut form = FormSession::open(String::new());
        *form.draft_mut().unwrap() = "Sprint 1".into();

        let err = form
            .submit(|_| async { Err::<(), _>(rejected()) })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(form.state(), FormState::Open);
        assert_eq!(form.draft(), "Sprint 1");
        assert!(form.error().unwrap().contains("required"));
    }

    #[tokio::test]
    async fn success_closes_and_resets() {
        let mut form = FormSession::open("initial".to_string());
        *form.draft_mut().unwrap() = "edited".into();

        let sent = form
            .submit(|draft| async move { Ok::<_, StoreError>(draft) })
            .await
            .unwrap();
        assert_eq!(sent, "edited");
        assert_eq!(form.state(), FormState::Closed);
        assert_eq!(form.draft(), "initial");
        assert!(form.error().is_none());
        assert!(form.draft_mut().is_none());
    }

    #[test]
    fn second_submit_while_in_flight_is_refused() {
        let mut form = FormSession::open(1_u32);
        assert_eq!(form.begin_submit().unwrap(), 1);
        assert!(matches!(form.begin_submit(), Err(StoreError::Busy)));
        assert!(form.draft_mut().is_none());

        let _ = form.finish_submit::<()>(Err(rejected()));
        assert_eq!(form.begin_submit().unwrap(), 1, "retry uses the same input");
    }

    #[test]
    fn closed_form_refuses_until_reopened() {
        let mut form = FormSession::open(0_u8);
        form.begin_submit().unwrap();
        form.finish_submit(Ok(())).unwrap();
        assert!(matches!(form.begin_submit(), Err(StoreError::FormClosed)));
        form.reopen();
        assert!(form.begin_submit().is_ok());
    }
}
