use std::env;

use common::{
    impl_display_for_enum, impl_from_str_for_enum, reasons::ReasonSet, utils::SaveVariant,
};
use dotenv::dotenv;

/// When the cursor moves on to the next customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdvancePolicy {
    /// Only through an explicit "next".
    Explicit,
    /// Also right after a successful save.
    #[default]
    OnSave,
}

impl_from_str_for_enum!(AdvancePolicy, Explicit => "explicit", OnSave => "on-save");
impl_display_for_enum!(AdvancePolicy, Explicit => "explicit", OnSave => "on-save");

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub save_variant: SaveVariant,
    pub advance_policy: AdvancePolicy,
    pub reasons: ReasonSet,
    // Program handed the `tel:` URI; unset means log only
    pub dialer_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: "http://127.0.0.1:3000".to_string(),
            save_variant: SaveVariant::default(),
            advance_policy: AdvancePolicy::default(),
            reasons: ReasonSet::default(),
            dialer_command: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        let defaults = Config::default();

        let api_url = env::var("REMARKS_API_URL").unwrap_or(defaults.api_url);

        let save_variant = match env::var("SAVE_VARIANT") {
            Ok(raw) => raw.parse::<SaveVariant>()?,
            Err(_) => defaults.save_variant,
        };

        let advance_policy = match env::var("ADVANCE_POLICY") {
            Ok(raw) => raw.parse::<AdvancePolicy>()?,
            Err(_) => defaults.advance_policy,
        };

        let dialer_command = env::var("DIALER_COMMAND")
            .ok()
            .filter(|cmd| !cmd.trim().is_empty());

        Ok(Config {
            api_url,
            save_variant,
            advance_policy,
            reasons: ReasonSet::from_env(),
            dialer_command,
        })
    }
}
