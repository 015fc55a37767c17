//! Declarative schema for the onboarding form
//!
//! Each field carries its wire name, presentation hints and a [`FieldRule`].
//! Rules are plain data; [`FieldRule::check`] interprets them against the raw
//! value pulled out of a draft.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::services::ServiceOption;

static PERSON_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z\s'-]+$").unwrap());

// Lookahead-free half of the usual email shape; leading dots and ".." are
// rejected separately.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").unwrap()
});

/// HTML input used to render a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Number,
    Date,
    /// Single boolean checkbox
    Checkbox,
    /// One checkbox per enumeration value
    CheckboxGroup,
}

impl InputKind {
    /// `type` attribute for single-input kinds
    pub fn html_type(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Number => "number",
            InputKind::Date => "date",
            InputKind::Checkbox | InputKind::CheckboxGroup => "checkbox",
        }
    }
}

/// Character-class constraints on free text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPattern {
    /// Letters, whitespace, apostrophes and hyphens
    PersonName,
}

impl TextPattern {
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            TextPattern::PersonName => PERSON_NAME_RE.is_match(value),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            TextPattern::PersonName => "Only letters, spaces, apostrophes, or hyphens allowed",
        }
    }

    /// Same pattern as an HTML `pattern` attribute (implicitly anchored, `v` flag safe)
    pub fn html_pattern(&self) -> &'static str {
        match self {
            TextPattern::PersonName => r"[A-Za-z\s'\-]+",
        }
    }
}

/// Validation rule attached to a field
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Free text with inclusive length bounds (Unicode scalar values)
    Text {
        min_length: usize,
        max_length: usize,
        pattern: Option<TextPattern>,
        too_short: &'static str,
        too_long: &'static str,
    },

    /// RFC-shaped email address
    Email { message: &'static str },

    /// Non-empty selection from a fixed enumeration
    Selection {
        options: &'static [ServiceOption],
        empty: &'static str,
    },

    /// Optional integer with an inclusive range
    Integer {
        min: i64,
        max: i64,
        message: &'static str,
    },

    /// ISO date (YYYY-MM-DD) that must be today or later
    FutureDate { message: &'static str },

    /// Checkbox that must be ticked
    MustAccept { message: &'static str },
}

/// Raw value handed to a rule
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Selection(&'a [String]),
    Integer(Option<&'a BudgetInput>),
    Flag(bool),
}

/// Budget as typed into the form: the browser may send a string or a number
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum BudgetInput {
    Number(f64),
    Text(String),
}

impl BudgetInput {
    /// Interpret the input. `Ok(None)` means "not provided": empty text or 0.
    pub fn parse(&self) -> Result<Option<i64>, ()> {
        match self {
            BudgetInput::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<i64>().map(Some).map_err(|_| ())
            }
            BudgetInput::Number(n) => {
                if *n == 0.0 {
                    Ok(None)
                } else if !n.is_finite() || n.fract() != 0.0 {
                    Err(())
                } else {
                    Ok(Some(*n as i64))
                }
            }
        }
    }
}

/// Parse a date input value
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn is_email_shaped(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

impl FieldRule {
    /// Check a value against this rule, returning the first failing message.
    pub fn check(&self, value: FieldValue<'_>, today: NaiveDate) -> Result<(), Cow<'static, str>> {
        match (self, value) {
            (
                FieldRule::Text {
                    min_length,
                    max_length,
                    pattern,
                    too_short,
                    too_long,
                },
                FieldValue::Text(s),
            ) => {
                let len = s.chars().count();
                if len < *min_length {
                    return Err(Cow::Borrowed(*too_short));
                }
                if len > *max_length {
                    return Err(Cow::Borrowed(*too_long));
                }
                match pattern {
                    Some(p) if !p.is_match(s) => Err(Cow::Borrowed(p.message())),
                    _ => Ok(()),
                }
            }

            (FieldRule::Email { message }, FieldValue::Text(s)) => {
                if is_email_shaped(s) {
                    Ok(())
                } else {
                    Err(Cow::Borrowed(*message))
                }
            }

            (FieldRule::Selection { options, empty }, FieldValue::Selection(selected)) => {
                if selected.is_empty() {
                    return Err(Cow::Borrowed(*empty));
                }
                match selected
                    .iter()
                    .find(|s| !options.iter().any(|opt| opt.as_str() == s.as_str()))
                {
                    Some(unknown) => Err(Cow::Owned(format!("Invalid service: {}", unknown))),
                    None => Ok(()),
                }
            }

            (FieldRule::Integer { min, max, message }, FieldValue::Integer(input)) => {
                match input.map(BudgetInput::parse) {
                    None | Some(Ok(None)) => Ok(()),
                    Some(Ok(Some(n))) if n >= *min && n <= *max => Ok(()),
                    _ => Err(Cow::Borrowed(*message)),
                }
            }

            (FieldRule::FutureDate { message }, FieldValue::Text(s)) => match parse_date(s) {
                Some(date) if date >= today => Ok(()),
                _ => Err(Cow::Borrowed(*message)),
            },

            (FieldRule::MustAccept { message }, FieldValue::Flag(accepted)) => {
                if accepted {
                    Ok(())
                } else {
                    Err(Cow::Borrowed(*message))
                }
            }

            (rule, value) => {
                tracing::error!(?rule, ?value, "Field rule applied to mismatched value");
                Err(Cow::Borrowed("Invalid value"))
            }
        }
    }
}

/// A single field of the form
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// Wire name (camelCase, as posted)
    pub name: &'static str,

    /// Human-readable label
    pub label: &'static str,

    pub input: InputKind,

    /// Placeholder text
    pub placeholder: Option<&'static str>,

    pub rule: FieldRule,
}

/// The complete form: an ordered list of fields
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldDefinition>,
}

impl FormSchema {
    /// The client onboarding form
    pub fn onboarding() -> Self {
        Self {
            fields: vec![
                FieldDefinition {
                    name: "fullName",
                    label: "Full Name",
                    input: InputKind::Text,
                    placeholder: Some("Enter your full name"),
                    rule: FieldRule::Text {
                        min_length: 2,
                        max_length: 80,
                        pattern: Some(TextPattern::PersonName),
                        too_short: "Full name must be at least 2 characters",
                        too_long: "Full name cannot exceed 80 characters",
                    },
                },
                FieldDefinition {
                    name: "email",
                    label: "Email",
                    input: InputKind::Email,
                    placeholder: Some("Enter your email"),
                    rule: FieldRule::Email {
                        message: "Invalid email address",
                    },
                },
                FieldDefinition {
                    name: "companyName",
                    label: "Company Name",
                    input: InputKind::Text,
                    placeholder: Some("Enter your company name"),
                    rule: FieldRule::Text {
                        min_length: 2,
                        max_length: 100,
                        pattern: None,
                        too_short: "Company name must be at least 2 characters",
                        too_long: "Company name cannot exceed 100 characters",
                    },
                },
                FieldDefinition {
                    name: "services",
                    label: "Services interested in",
                    input: InputKind::CheckboxGroup,
                    placeholder: None,
                    rule: FieldRule::Selection {
                        options: ServiceOption::all(),
                        empty: "Select at least one service",
                    },
                },
                FieldDefinition {
                    name: "budget",
                    label: "Budget (USD)",
                    input: InputKind::Number,
                    placeholder: Some("Budget for the project"),
                    rule: FieldRule::Integer {
                        min: 100,
                        max: 1_000_000,
                        message: "Budget must be an integer between 100 and 1,000,000",
                    },
                },
                FieldDefinition {
                    name: "projectStartDate",
                    label: "Project Start Date",
                    input: InputKind::Date,
                    placeholder: None,
                    rule: FieldRule::FutureDate {
                        message: "Date must be today or later",
                    },
                },
                FieldDefinition {
                    name: "acceptTerms",
                    label: "I accept the terms and conditions",
                    input: InputKind::Checkbox,
                    placeholder: None,
                    rule: FieldRule::MustAccept {
                        message: "You must accept the terms",
                    },
                },
            ],
        }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Get a field by wire name
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::onboarding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn rule(name: &str) -> FieldRule {
        FormSchema::onboarding().get_field(name).unwrap().rule.clone()
    }

    #[test]
    fn test_field_order() {
        let schema = FormSchema::onboarding();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "fullName",
                "email",
                "companyName",
                "services",
                "budget",
                "projectStartDate",
                "acceptTerms"
            ]
        );
    }

    #[test]
    fn test_text_checks_length_before_pattern() {
        let r = rule("fullName");
        assert_eq!(
            r.check(FieldValue::Text("1"), today()).unwrap_err(),
            "Full name must be at least 2 characters"
        );
        assert_eq!(
            r.check(FieldValue::Text("R2-D2"), today()).unwrap_err(),
            "Only letters, spaces, apostrophes, or hyphens allowed"
        );
        assert!(r.check(FieldValue::Text("Mary-Jane O'Neil"), today()).is_ok());

        let long = "a".repeat(81);
        assert_eq!(
            r.check(FieldValue::Text(&long), today()).unwrap_err(),
            "Full name cannot exceed 80 characters"
        );
    }

    #[test]
    fn test_company_name_length_counts_chars() {
        let r = rule("companyName");
        // "é" is two bytes but one character
        assert!(r.check(FieldValue::Text("éé"), today()).is_ok());
        assert!(r.check(FieldValue::Text(&"é".repeat(100)), today()).is_ok());
        assert_eq!(
            r.check(FieldValue::Text(&"é".repeat(101)), today()).unwrap_err(),
            "Company name cannot exceed 100 characters"
        );
        assert_eq!(
            r.check(FieldValue::Text("é"), today()).unwrap_err(),
            "Company name must be at least 2 characters"
        );
    }

    #[test]
    fn test_email_shape() {
        let r = rule("email");
        for ok in ["user@example.com", "first.last+tag@mail.example.co", "o'neil@example.org"] {
            assert!(r.check(FieldValue::Text(ok), today()).is_ok(), "{ok}");
        }
        for bad in [
            "",
            "user",
            "user@",
            "@example.com",
            ".user@example.com",
            "us..er@example.com",
            "user.@example.com",
            "user@example",
            "user@example.c",
        ] {
            assert!(r.check(FieldValue::Text(bad), today()).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_budget_input_parse() {
        assert_eq!(BudgetInput::Text("".into()).parse(), Ok(None));
        assert_eq!(BudgetInput::Text(" 500 ".into()).parse(), Ok(Some(500)));
        assert_eq!(BudgetInput::Text("12.5".into()).parse(), Err(()));
        assert_eq!(BudgetInput::Number(0.0).parse(), Ok(None));
        assert_eq!(BudgetInput::Number(750.0).parse(), Ok(Some(750)));
        assert_eq!(BudgetInput::Number(750.5).parse(), Err(()));
    }

    #[test]
    fn test_budget_range() {
        let r = rule("budget");
        let check = |b: BudgetInput| r.check(FieldValue::Integer(Some(&b)), today());

        assert!(check(BudgetInput::Number(50.0)).is_err());
        assert!(check(BudgetInput::Number(100.0)).is_ok());
        assert!(check(BudgetInput::Text("500".into())).is_ok());
        assert!(check(BudgetInput::Number(1_000_000.0)).is_ok());
        assert!(check(BudgetInput::Number(1_000_001.0)).is_err());
        assert!(r.check(FieldValue::Integer(None), today()).is_ok());
    }

    #[test]
    fn test_future_date() {
        let r = rule("projectStartDate");
        assert!(r.check(FieldValue::Text("2026-10-18"), today()).is_ok());
        assert!(r.check(FieldValue::Text("2027-01-01"), today()).is_ok());
        assert_eq!(
            r.check(FieldValue::Text("2026-10-17"), today()).unwrap_err(),
            "Date must be today or later"
        );
        assert!(r.check(FieldValue::Text(""), today()).is_err());
        assert!(r.check(FieldValue::Text("next week"), today()).is_err());
    }

    #[test]
    fn test_selection() {
        let r = rule("services");
        let none: Vec<String> = vec![];
        assert_eq!(
            r.check(FieldValue::Selection(&none), today()).unwrap_err(),
            "Select at least one service"
        );

        let unknown = vec!["Branding".to_string(), "Hosting".to_string()];
        assert_eq!(
            r.check(FieldValue::Selection(&unknown), today()).unwrap_err(),
            "Invalid service: Hosting"
        );
    }

    #[test]
    fn test_mismatched_value_is_rejected() {
        let r = rule("acceptTerms");
        assert!(r.check(FieldValue::Flag(true), today()).is_ok());

        // Generic message; rule internals stay in the log
        let err = r.check(FieldValue::Text("yes"), today()).unwrap_err();
        assert_eq!(err, "Invalid value");
        assert!(!err.contains("MustAccept"));
        assert!(!err.contains("yes"));
    }
}
