use serde::{Deserialize, Serialize};

use crate::{impl_display_for_enum, impl_from_str_for_enum};

/// Payload shape of `POST /saveRemarks`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveVariant {
    /// `{id, remarks, date}`
    Basic,
    /// `{id, remarks, followUpDate, bookingDate, selectedReason}`
    #[default]
    Extended,
}

impl_from_str_for_enum!(SaveVariant, Basic => "basic", Extended => "extended");
impl_display_for_enum!(SaveVariant, Basic => "basic", Extended => "extended");

/// Reads a comma separated list, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
