use std::fmt;

use chrono::NaiveDate;
use common::{
    models::{BasicRemarksRequest, Customer, ExtendedRemarksRequest, NOT_COMING_REMARKS},
    utils::SaveVariant,
};

use crate::{
    api::{ClientError, SavePayload},
    picker::{DateField, DatePicker, PickerError},
};

pub const LOADING: &str = "Loading...";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One field of the edit in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditField {
    Remarks(String),
    FollowUpDate(NaiveDate),
    BookingDate(NaiveDate),
    Reason(String),
    /// Also forces the remarks to [`NOT_COMING_REMARKS`].
    NotComingReason(String),
}

/// What has been entered for the current customer so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    pub remarks: String,
    pub follow_up_date: Option<NaiveDate>,
    pub booking_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub not_coming_reason: Option<String>,
    pub picker: Option<DatePicker>,
}

impl EditSession {
    /// The not-coming reason wins over the neutral one.
    pub fn selected_reason(&self) -> Option<&str> {
        self.not_coming_reason
            .as_deref()
            .or(self.reason.as_deref())
    }
}

/// Client state: the customer list, the cursor into it and the edit in
/// progress.
///
/// Every transition consumes the session and hands back a new one; nothing is
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    customers: Vec<Customer>,
    cursor: usize,
    loaded: bool,
    edit: EditSession,
}

impl Session {
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn current(&self) -> Option<&Customer> {
        self.customers.get(self.cursor)
    }

    /// Replaces the list. Only the first load puts the cursor back at 0.
    pub fn with_customers(self, customers: Vec<Customer>) -> Self {
        let cursor = if self.loaded { self.cursor } else { 0 };
        Session {
            customers,
            cursor,
            loaded: true,
            ..self
        }
    }

    pub fn record_edit(self, field: EditField) -> Self {
        let mut edit = self.edit;
        match field {
            EditField::Remarks(remarks) => edit.remarks = remarks,
            EditField::FollowUpDate(date) => edit.follow_up_date = Some(date),
            EditField::BookingDate(date) => edit.booking_date = Some(date),
            EditField::Reason(reason) => edit.reason = Some(reason),
            EditField::NotComingReason(reason) => {
                edit.not_coming_reason = Some(reason);
                edit.remarks = NOT_COMING_REMARKS.to_string();
            }
        }
        Session { edit, ..self }
    }

    pub fn clear_edit(self) -> Self {
        Session {
            edit: EditSession::default(),
            ..self
        }
    }

    /// Moves to the next customer with an empty edit.
    pub fn advance(self) -> Self {
        Session {
            cursor: self.cursor + 1,
            edit: EditSession::default(),
            ..self
        }
    }

    /// Points the cursor at `index`. Out of range is allowed and shows the
    /// loading placeholders.
    pub fn select(self, index: usize) -> Self {
        if index == self.cursor {
            return self;
        }
        Session {
            cursor: index,
            edit: EditSession::default(),
            ..self
        }
    }

    pub fn open_picker(self, field: DateField, today: NaiveDate) -> Self {
        let edit = EditSession {
            picker: Some(DatePicker::open(field, today)),
            ..self.edit
        };
        Session { edit, ..self }
    }

    /// Commits `date` into the open picker's field and closes it. A rejected
    /// date leaves the picker open.
    pub fn confirm_date(&self, date: NaiveDate) -> Result<Self, PickerError> {
        let picker = self.edit.picker.ok_or(PickerError::NotOpen)?;
        let date = picker.check(date)?;
        let field = match picker.field {
            DateField::FollowUp => EditField::FollowUpDate(date),
            DateField::Booking => EditField::BookingDate(date),
        };
        Ok(self.clone().cancel_picker().record_edit(field))
    }

    pub fn cancel_picker(self) -> Self {
        let edit = EditSession {
            picker: None,
            ..self.edit
        };
        Session { edit, ..self }
    }

    /// Builds the save body for the current customer.
    ///
    /// The basic variant sends the follow-up date as `date`, defaulting to
    /// `today` when none was picked.
    pub fn payload(&self, variant: SaveVariant, today: NaiveDate) -> Result<SavePayload, ClientError> {
        let customer = self
            .current()
            .filter(|c| c.id != 0)
            .ok_or(ClientError::NoCustomer)?;
        let edit = &self.edit;
        let format = |date: NaiveDate| date.format(DATE_FORMAT).to_string();

        let payload = match variant {
            SaveVariant::Basic => SavePayload::Basic(BasicRemarksRequest {
                id: Some(customer.id),
                remarks: Some(edit.remarks.clone()),
                date: Some(format(edit.follow_up_date.unwrap_or(today))),
            }),
            SaveVariant::Extended => SavePayload::Extended(ExtendedRemarksRequest {
                id: Some(customer.id),
                remarks: Some(edit.remarks.clone()),
                follow_up_date: edit.follow_up_date.map(format),
                booking_date: edit.booking_date.map(format),
                selected_reason: Some(edit.selected_reason().unwrap_or_default().to_string()),
            }),
        };
        Ok(payload)
    }

    pub fn view(&self) -> CustomerView {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        match self.current() {
            Some(customer) => CustomerView {
                id: customer.id.to_string(),
                name: text(&customer.name),
                mobno: text(&customer.mobno),
                jc_no: text(&customer.jc_no),
                model: text(&customer.model),
                can_call: true,
                can_next: true,
                can_save: !self.edit.remarks.is_empty(),
            },
            None => CustomerView {
                id: LOADING.to_string(),
                name: LOADING.to_string(),
                mobno: LOADING.to_string(),
                jc_no: LOADING.to_string(),
                model: LOADING.to_string(),
                can_call: false,
                can_next: false,
                can_save: false,
            },
        }
    }
}

/// What the screen shows for the customer under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerView {
    pub id: String,
    pub name: String,
    pub mobno: String,
    pub jc_no: String,
    pub model: String,
    pub can_call: bool,
    pub can_next: bool,
    pub can_save: bool,
}

impl fmt::Display for CustomerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Customer ID: {}", self.id)?;
        writeln!(f, "Customer Name: {}", self.name)?;
        writeln!(f, "Customer Phone: {}", self.mobno)?;
        writeln!(f, "JCNo: {}", self.jc_no)?;
        write!(f, "Model: {}", self.model)
    }
}
