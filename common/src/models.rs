use serde::{Deserialize, Serialize};

/// Remarks text forced when a customer is marked as not coming.
pub const NOT_COMING_REMARKS: &str = "Not Coming";

/// One customer row as served by `GET /customers`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    #[serde(rename = "Name")]
    #[sqlx(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Mobno")]
    #[sqlx(rename = "Mobno")]
    pub mobno: Option<String>,
    #[serde(rename = "JCNo")]
    #[sqlx(rename = "JCNo")]
    pub jc_no: Option<String>,
    #[serde(rename = "Model")]
    #[sqlx(rename = "Model")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BasicRemarksRequest {
    pub id: Option<i64>,
    pub remarks: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedRemarksRequest {
    pub id: Option<i64>,
    pub remarks: Option<String>,
    pub follow_up_date: Option<String>,
    pub booking_date: Option<String>,
    pub selected_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SaveRemarksResponse {
    pub success: bool,
    #[serde(
        rename = "selectedReason",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_reason: Option<String>,
}

/// A save request that passed the presence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemarksUpdate {
    Basic {
        id: i64,
        remarks: String,
        date: String,
    },
    Extended {
        id: i64,
        remarks: String,
        follow_up_date: String,
        booking_date: String,
        selected_reason: String,
    },
}

impl RemarksUpdate {
    pub fn id(&self) -> i64 {
        match self {
            RemarksUpdate::Basic { id, .. } | RemarksUpdate::Extended { id, .. } => *id,
        }
    }
}

fn present_id(id: Option<i64>) -> Option<i64> {
    id.filter(|id| *id != 0)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl BasicRemarksRequest {
    pub const REQUIRED: &'static str = "id, remarks, and date are required";

    /// `None` when any of id, remarks or date is absent or empty.
    pub fn into_update(self) -> Option<RemarksUpdate> {
        Some(RemarksUpdate::Basic {
            id: present_id(self.id)?,
            remarks: present(self.remarks)?,
            date: present(self.date)?,
        })
    }
}

impl ExtendedRemarksRequest {
    pub const REQUIRED: &'static str =
        "id, remarks, followUpDate, and bookingDate are required";

    /// `None` when any of id, remarks or the two dates is absent or empty.
    /// The reason is optional and stored as an empty string when absent.
    pub fn into_update(self) -> Option<RemarksUpdate> {
        Some(RemarksUpdate::Extended {
            id: present_id(self.id)?,
            remarks: present(self.remarks)?,
            follow_up_date: present(self.follow_up_date)?,
            booking_date: present(self.booking_date)?,
            selected_reason: self.selected_reason.unwrap_or_default(),
        })
    }
}
