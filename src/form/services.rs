//! Service enumeration offered on the onboarding form
//!
//! The four services a client can express interest in, plus the helpers that
//! translate between the `service` query parameter and a selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Services a client can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceOption {
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Branding")]
    Branding,
    #[serde(rename = "Web Dev")]
    WebDev,
    #[serde(rename = "Mobile App")]
    MobileApp,
}

impl ServiceOption {
    /// All options, in display order
    pub fn all() -> &'static [ServiceOption] {
        &[
            ServiceOption::UiUx,
            ServiceOption::Branding,
            ServiceOption::WebDev,
            ServiceOption::MobileApp,
        ]
    }

    /// Wire/display string
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceOption::UiUx => "UI/UX",
            ServiceOption::Branding => "Branding",
            ServiceOption::WebDev => "Web Dev",
            ServiceOption::MobileApp => "Mobile App",
        }
    }

    /// Exact, case-sensitive match against the wire string
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|opt| opt.as_str() == s)
    }
}

impl fmt::Display for ServiceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Services pre-selected by the `service` query parameter.
///
/// The parameter is a comma-separated list; anything outside the enumeration
/// is dropped and repeated values are kept once.
pub fn preselected_services(param: Option<&str>) -> Vec<ServiceOption> {
    let mut selected = Vec::new();
    let Some(param) = param else {
        return selected;
    };

    for opt in param.split(',').filter_map(ServiceOption::parse) {
        if !selected.contains(&opt) {
            selected.push(opt);
        }
    }
    selected
}

/// Location reflecting the current selection, e.g. `/?service=UI%2FUX,Branding`.
pub fn selection_location(selected: &[ServiceOption]) -> String {
    if selected.is_empty() {
        return "/".to_string();
    }

    let query = selected
        .iter()
        .map(|opt| urlencoding::encode(opt.as_str()).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    format!("/?service={}", query)
}
