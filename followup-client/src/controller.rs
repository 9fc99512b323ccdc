use chrono::{Local, NaiveDate};
use common::{models::SaveRemarksResponse, reasons::ReasonSet, utils::SaveVariant};
use tracing::{error, info, warn};

use crate::{
    api::{ClientError, RemarksApi},
    config::{AdvancePolicy, Config},
    picker::{DateField, PickerError},
    session::{CustomerView, EditField, Session},
    telephony::{tel_uri, Dialer},
};

pub const SAVED_MESSAGE: &str = "Remarks saved successfully!";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save remarks";

/// Blocking user-facing notification.
pub trait Notifier {
    fn notify(&self, message: &str);
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Walks the user through the customer list one customer at a time.
///
/// The controller owns the current [`Session`] and swaps it for the session
/// each transition returns.
pub struct Controller<A, D, N> {
    api: A,
    dialer: D,
    notifier: N,
    session: Session,
    save_variant: SaveVariant,
    advance_policy: AdvancePolicy,
    reasons: ReasonSet,
    today: fn() -> NaiveDate,
}

impl<A: RemarksApi, D: Dialer, N: Notifier> Controller<A, D, N> {
    pub fn new(api: A, dialer: D, notifier: N, config: &Config) -> Self {
        Controller {
            api,
            dialer,
            notifier,
            session: Session::default(),
            save_variant: config.save_variant,
            advance_policy: config.advance_policy,
            reasons: config.reasons.clone(),
            today: local_today,
        }
    }

    pub fn with_clock(self, today: fn() -> NaiveDate) -> Self {
        Controller { today, ..self }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn reasons(&self) -> &ReasonSet {
        &self.reasons
    }

    pub fn view(&self) -> CustomerView {
        self.session.view()
    }

    fn transition(&mut self, step: impl FnOnce(Session) -> Session) {
        let session = std::mem::take(&mut self.session);
        self.session = step(session);
    }

    /// Fetches the customer list. A failure is logged and leaves the list as is.
    pub async fn load_customers(&mut self) -> Result<(), ClientError> {
        match self.api.fetch_customers().await {
            Ok(customers) => {
                info!("Loaded {} customers", customers.len());
                self.transition(|s| s.with_customers(customers));
                Ok(())
            }
            Err(e) => {
                error!("Error fetching customers: {}", e);
                Err(e)
            }
        }
    }

    /// Swaps in the reason set the service is configured with.
    pub async fn load_reasons(&mut self) -> Result<(), ClientError> {
        match self.api.fetch_reasons().await {
            Ok(reasons) if !reasons.is_empty() => {
                self.reasons = reasons;
                Ok(())
            }
            Ok(_) => {
                warn!("Service returned no reasons, keeping the configured ones");
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching reasons: {}", e);
                Err(e)
            }
        }
    }

    pub fn record_edit(&mut self, field: EditField) {
        self.transition(|s| s.record_edit(field));
    }

    /// Records the reason at `index`; `not_coming` also forces the remarks.
    pub fn select_reason(&mut self, index: usize, not_coming: bool) -> bool {
        let Some(reason) = self.reasons.get(index).map(str::to_string) else {
            warn!("No reason at position {}", index);
            return false;
        };
        let field = if not_coming {
            EditField::NotComingReason(reason)
        } else {
            EditField::Reason(reason)
        };
        self.record_edit(field);
        true
    }

    /// Hands the current customer's number to the dialer.
    pub fn initiate_call(&self) -> bool {
        let uri = self
            .session
            .current()
            .and_then(|c| c.mobno.as_deref())
            .and_then(tel_uri);

        let Some(uri) = uri else {
            error!("No customer data available or phone number missing");
            return false;
        };

        match self.dialer.dial(&uri) {
            Ok(()) => true,
            Err(e) => {
                error!("Could not dial {}: {}", uri, e);
                false
            }
        }
    }

    pub fn select_customer(&mut self, index: usize) {
        self.transition(|s| s.select(index));
    }

    pub fn next_customer(&mut self) -> bool {
        if self.session.current().is_none() {
            warn!("No current customer to move past");
            return false;
        }
        self.transition(Session::advance);
        true
    }

    pub fn open_picker(&mut self, field: DateField) {
        let today = (self.today)();
        self.transition(|s| s.open_picker(field, today));
    }

    pub fn confirm_date(&mut self, date: NaiveDate) -> Result<(), PickerError> {
        self.session = self.session.confirm_date(date)?;
        Ok(())
    }

    pub fn cancel_picker(&mut self) {
        self.transition(Session::cancel_picker);
    }

    /// Sends the edit for the current customer.
    ///
    /// On success the list is reloaded, the edit cleared and, under
    /// [`AdvancePolicy::OnSave`], the cursor moves on. On failure the edit is
    /// kept so the user can retry.
    pub async fn submit_remarks(&mut self) -> Result<SaveRemarksResponse, ClientError> {
        let payload = match self.session.payload(self.save_variant, (self.today)()) {
            Ok(payload) => payload,
            Err(e) => {
                error!("No customer selected");
                return Err(e);
            }
        };

        let response = match self.api.save_remarks(&payload).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error saving remarks: {}", e);
                self.notifier.notify(SAVE_FAILED_MESSAGE);
                return Err(e);
            }
        };

        self.notifier.notify(SAVED_MESSAGE);
        // a failed reload is already logged and keeps the old list
        let _ = self.load_customers().await;
        match self.advance_policy {
            AdvancePolicy::OnSave => self.transition(Session::advance),
            AdvancePolicy::Explicit => self.transition(Session::clear_edit),
        }
        Ok(response)
    }
}
