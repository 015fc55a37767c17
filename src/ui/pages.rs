//! HTML page generation for the onboarding form
//!
//! Fields are rendered straight from the [`FormSchema`], so the page and the
//! validator never disagree about names, labels or order. Each rule is also
//! emitted as HTML constraint attributes so the browser checks fields as
//! they change.

use chrono::NaiveDate;

use crate::form::{
    selection_location, FieldDefinition, FieldRule, FieldValue, FormDraft, FormSchema, InputKind,
    ServiceOption, ValidationErrors,
};

/// Banner shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Everything needed to render the onboarding page
pub struct FormView<'a> {
    pub schema: &'a FormSchema,
    pub draft: &'a FormDraft,
    pub errors: Option<&'a ValidationErrors>,
    pub notice: Option<Notice>,
    /// Earliest selectable project start date
    pub today: NaiveDate,
}

impl<'a> FormView<'a> {
    pub fn new(schema: &'a FormSchema, draft: &'a FormDraft, today: NaiveDate) -> Self {
        Self {
            schema,
            draft,
            errors: None,
            notice: None,
            today,
        }
    }

    pub fn with_errors(mut self, errors: &'a ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.and_then(|e| e.get(field))
    }
}

/// Onboarding page: header, welcome panel and the form
pub fn onboarding_page(view: &FormView<'_>) -> String {
    let notice = match &view.notice {
        Some(Notice::Success(text)) => format!(
            r#"<div class="notice success" role="status">{}</div>"#,
            escape_html(text)
        ),
        Some(Notice::Error(text)) => format!(
            r#"<div class="notice error" role="alert">{}</div>"#,
            escape_html(text)
        ),
        None => String::new(),
    };

    let fields: String = view
        .schema
        .fields()
        .iter()
        .map(|field| render_field(view, field))
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Client Onboarding | Besta.App</title>
    <style>
{css}
    </style>
</head>
<body>
    <header class="site-header">
        <span class="brand">Besta.App</span>
        <nav>
            <a href="#">Home</a>
            <a href="#">Blog</a>
            <a href="#">Pages</a>
            <a href="#">Projects</a>
            <a href="#">Services</a>
        </nav>
    </header>

    <main>
        <div class="card">
            <section class="welcome">
                <div class="logo"><span>B</span> Besta.App</div>
                <h2>Welcome to Client Onboarding</h2>
                <p>Please fill out the form to get started. Our team will review your information and contact you shortly.</p>
            </section>

            <section class="form-panel">
                <h1>Client Onboarding</h1>
                <p class="subtitle">Please fill the form below.</p>
                {notice}
                <form id="onboarding-form" method="post" action="{action}">
{fields}
                    <button type="submit" id="submit-btn">Submit</button>
                </form>
            </section>
        </div>
    </main>

    <script>
{js}
    </script>
</body>
</html>"##,
        css = CSS,
        js = JS,
        notice = notice,
        action = escape_html(&selection_location(&view.draft.known_services())),
        fields = fields,
    )
}

fn render_field(view: &FormView<'_>, field: &FieldDefinition) -> String {
    let error = view.error_for(field.name);
    let error_html = error
        .map(|msg| format!(r#"<p class="field-error">{}</p>"#, escape_html(msg)))
        .unwrap_or_default();

    match field.input {
        InputKind::CheckboxGroup => {
            let options: &[ServiceOption] = match &field.rule {
                FieldRule::Selection { options, .. } => *options,
                _ => &[],
            };
            let boxes: String = options
                .iter()
                .map(|opt| {
                    format!(
                        r#"<label class="check"><input type="checkbox" name="{name}" value="{value}"{checked}> {value}</label>"#,
                        name = field.name,
                        value = escape_html(opt.as_str()),
                        checked = if view.draft.is_service_selected(*opt) { " checked" } else { "" },
                    )
                })
                .collect();

            let group_attrs = match &field.rule {
                FieldRule::Selection { empty, .. } => format!(
                    r#" data-min-selected="1" data-empty-message="{}""#,
                    escape_html(empty)
                ),
                _ => String::new(),
            };

            format!(
                r#"                    <fieldset class="field" id="{name}"{group_attrs}>
                        <legend>{label}</legend>
                        <div class="options">{boxes}</div>
                        {error}
                    </fieldset>
"#,
                name = field.name,
                group_attrs = group_attrs,
                label = escape_html(field.label),
                boxes = boxes,
                error = error_html,
            )
        }

        InputKind::Checkbox => {
            let checked = matches!(view.draft.value(field.name), Some(FieldValue::Flag(true)));
            format!(
                r#"                    <div class="field">
                        <label class="check"><input type="checkbox" name="{name}" id="{name}"{checked}{constraints}> {label}</label>
                        {error}
                    </div>
"#,
                name = field.name,
                label = escape_html(field.label),
                checked = if checked { " checked" } else { "" },
                constraints = constraint_attrs(&field.rule, view.today),
                error = error_html,
            )
        }

        InputKind::Text | InputKind::Email | InputKind::Number | InputKind::Date => {
            let value = match view.draft.value(field.name) {
                Some(FieldValue::Text(s)) => s.to_string(),
                Some(FieldValue::Integer(_)) => view.draft.budget_text(),
                _ => String::new(),
            };
            let placeholder = field
                .placeholder
                .map(|p| format!(r#" placeholder="{}""#, escape_html(p)))
                .unwrap_or_default();

            format!(
                r#"                    <div class="field">
                        <label for="{name}">{label}</label>
                        <input type="{kind}" id="{name}" name="{name}" value="{value}"{placeholder}{constraints} class="{class}">
                        {error}
                    </div>
"#,
                name = field.name,
                label = escape_html(field.label),
                kind = field.input.html_type(),
                value = escape_html(&value),
                placeholder = placeholder,
                constraints = constraint_attrs(&field.rule, view.today),
                class = if error.is_some() { "invalid" } else { "" },
                error = error_html,
            )
        }
    }
}

/// HTML constraint attributes mirroring a rule, so the browser validates on change.
///
/// A selection group has no native constraint; the inline script enforces it
/// from the fieldset's `data-min-selected`.
fn constraint_attrs(rule: &FieldRule, today: NaiveDate) -> String {
    match rule {
        FieldRule::Text {
            min_length,
            max_length,
            pattern,
            ..
        } => {
            let mut attrs = format!(
                r#" required minlength="{}" maxlength="{}""#,
                min_length, max_length
            );
            if let Some(p) = pattern {
                attrs.push_str(&format!(
                    r#" pattern="{}" title="{}""#,
                    escape_html(p.html_pattern()),
                    escape_html(p.message())
                ));
            }
            attrs
        }
        FieldRule::Email { .. } => " required".to_string(),
        FieldRule::Integer { min, max, .. } => {
            format!(r#" min="{}" max="{}" step="1""#, min, max)
        }
        FieldRule::FutureDate { .. } => {
            format!(r#" required min="{}""#, today.format("%Y-%m-%d"))
        }
        FieldRule::MustAccept { .. } => " required".to_string(),
        FieldRule::Selection { .. } => String::new(),
    }
}

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: system-ui, -apple-system, sans-serif;
    background: #f9fafb;
    color: #1f2937;
}

.site-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 12px 20px;
    background: #e5e7eb;
    border-bottom: 2px solid #e5e7eb;
}

.site-header .brand { font-weight: 800; font-style: italic; }
.site-header nav a { margin-left: 24px; color: #000; font-weight: 600; text-decoration: none; }

main {
    min-height: 100vh;
    display: flex;
    justify-content: center;
    align-items: center;
    padding: 16px;
}

.card {
    display: flex;
    width: 100%;
    max-width: 1100px;
    background: #fff;
    border-radius: 12px;
    box-shadow: 0 10px 15px rgba(0, 0, 0, 0.1);
    overflow: hidden;
}

.welcome {
    flex: 1;
    background: #1e40af;
    color: #fff;
    padding: 32px;
    display: flex;
    flex-direction: column;
    justify-content: center;
    align-items: center;
    text-align: center;
}

.welcome .logo { font-size: 1.5em; font-weight: 700; margin-bottom: 24px; }
.welcome .logo span {
    display: inline-block;
    width: 40px;
    height: 40px;
    line-height: 40px;
    border-radius: 50%;
    background: #fff;
    color: #2563eb;
}
.welcome h2 { font-size: 1.8em; margin-bottom: 16px; }

.form-panel { flex: 1; padding: 40px; }
.form-panel h1 { font-size: 1.8em; }
.subtitle { color: #4b5563; margin: 8px 0 24px; }

.field { margin-bottom: 20px; border: none; }
.field label, .field legend { display: block; font-weight: 500; margin-bottom: 4px; }
.field input[type=text], .field input[type=email], .field input[type=number], .field input[type=date] {
    width: 100%;
    padding: 8px;
    border: 1px solid #d1d5db;
    border-radius: 6px;
}
.field input.invalid { border-color: #ef4444; }
.field .options { display: grid; grid-template-columns: 1fr 1fr; gap: 8px; }
.field label.check { display: flex; align-items: center; gap: 8px; font-weight: 400; }
.field-error { color: #ef4444; font-size: 0.875em; margin-top: 4px; }

.notice { margin-bottom: 16px; padding: 12px; border-radius: 8px; white-space: pre-line; }
.notice.success { background: #dcfce7; color: #15803d; border: 1px solid #4ade80; }
.notice.error { background: #fee2e2; color: #b91c1c; border: 1px solid #f87171; }

#submit-btn {
    width: 100%;
    padding: 8px;
    font-size: 1.1em;
    border: none;
    border-radius: 8px;
    background: #1d4ed8;
    color: #fff;
    cursor: pointer;
}
#submit-btn:disabled { background: #9ca3af; cursor: not-allowed; }

@media (max-width: 768px) {
    .welcome, .site-header nav { display: none; }
    .field .options { grid-template-columns: 1fr; }
}
"#;

const JS: &str = r#"
(function () {
    const form = document.getElementById('onboarding-form');
    const submitBtn = document.getElementById('submit-btn');
    const serviceBoxes = form.querySelectorAll('input[name="services"]');

    // Mirror the selection into the address bar: /?service=a,b or /
    function selectionLocation() {
        const selected = Array.from(serviceBoxes)
            .filter(function (box) { return box.checked; })
            .map(function (box) { return encodeURIComponent(box.value); });
        return selected.length ? '/?service=' + selected.join(',') : '/';
    }

    serviceBoxes.forEach(function (box) {
        box.addEventListener('change', function () {
            const location = selectionLocation();
            history.replaceState(null, '', location);
            form.action = location;
        });
    });

    // At least one service must be ticked
    function syncServiceGroup() {
        const group = document.getElementById('services');
        if (!group || !serviceBoxes.length) return;
        const min = parseInt(group.dataset.minSelected || '0', 10);
        const count = Array.from(serviceBoxes).filter(function (box) { return box.checked; }).length;
        serviceBoxes[0].setCustomValidity(count >= min ? '' : group.dataset.emptyMessage);
    }

    function showMessage(input) {
        const field = input.closest('.field');
        if (!field) return;
        let message = field.querySelector('.field-error');
        if (!message) {
            message = document.createElement('p');
            message.className = 'field-error';
            field.appendChild(message);
        }
        message.textContent = input.validationMessage;
        input.classList.toggle('invalid', !input.validity.valid);
    }

    function revalidate(event) {
        syncServiceGroup();
        if (event && event.target.name === 'services') {
            showMessage(serviceBoxes[0]);
        } else if (event && event.target.willValidate) {
            showMessage(event.target);
        }
        submitBtn.disabled = !form.checkValidity();
    }

    form.addEventListener('input', revalidate);
    form.addEventListener('change', revalidate);
    revalidate();

    form.addEventListener('submit', function () {
        submitBtn.disabled = true;
        submitBtn.textContent = 'Submitting...';
    });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"O'Neil" & co</b>"#),
            "&lt;b&gt;&quot;O&#39;Neil&quot; &amp; co&lt;/b&gt;"
        );
    }

    #[test]
    fn test_page_renders_every_field() {
        let schema = FormSchema::onboarding();
        let draft = FormDraft::default();
        let html = onboarding_page(&FormView::new(&schema, &draft, today()));

        for field in schema.fields() {
            assert!(html.contains(&format!(r#"name="{}""#, field.name)), "{}", field.name);
        }
        assert!(html.contains(r#"action="/""#));
        assert!(html.contains("Client Onboarding"));
    }

    #[test]
    fn test_preselected_services_are_checked() {
        let schema = FormSchema::onboarding();
        let draft = FormDraft::with_services(&[ServiceOption::Branding]);
        let html = onboarding_page(&FormView::new(&schema, &draft, today()));

        assert!(html.contains(r#"value="Branding" checked"#));
        assert!(!html.contains(r#"value="Web Dev" checked"#));
        assert!(html.contains(r#"action="/?service=Branding""#));
    }

    #[test]
    fn test_errors_and_values_are_rendered_escaped() {
        let schema = FormSchema::onboarding();
        let draft = FormDraft {
            full_name: "<script>".into(),
            ..Default::default()
        };
        let errors = schema.validate(&draft, today()).unwrap_err();
        let html = onboarding_page(&FormView::new(&schema, &draft, today()).with_errors(&errors));

        assert!(html.contains(r#"value="&lt;script&gt;""#));
        assert!(html.contains("Only letters, spaces, apostrophes, or hyphens allowed"));
        assert!(html.contains("You must accept the terms"));
        assert!(!html.contains("<script>\""));
    }

    #[test]
    fn test_notice_rendering() {
        let schema = FormSchema::onboarding();
        let draft = FormDraft::default();
        let html = onboarding_page(
            &FormView::new(&schema, &draft, today())
                .with_notice(Notice::Error("Request failed with status 500".into())),
        );
        assert!(html.contains(r#"<div class="notice error" role="alert">Request failed with status 500</div>"#));
    }

    #[test]
    fn test_constraints_rendered_from_schema() {
        let schema = FormSchema::onboarding();
        let draft = FormDraft::default();
        let html = onboarding_page(&FormView::new(&schema, &draft, today()));

        assert!(!html.contains("novalidate"));
        assert!(html.contains(r#"name="fullName" value="" placeholder="Enter your full name" required minlength="2" maxlength="80" pattern="[A-Za-z\s&#39;\-]+""#));
        assert!(html.contains(r#"title="Only letters, spaces, apostrophes, or hyphens allowed""#));
        assert!(html.contains(r#"name="email" value="" placeholder="Enter your email" required"#));
        assert!(html.contains(r#"required minlength="2" maxlength="100""#));
        assert!(html.contains(r#"min="100" max="1000000" step="1""#));
        assert!(html.contains(r#"name="projectStartDate" value="" required min="2026-10-18""#));
        assert!(html.contains(r#"name="acceptTerms" id="acceptTerms" required>"#));
        assert!(html.contains(
            r#"<fieldset class="field" id="services" data-min-selected="1" data-empty-message="Select at least one service">"#
        ));
    }

    #[test]
    fn test_script_revalidates_on_change() {
        let schema = FormSchema::onboarding();
        let draft = FormDraft::default();
        let html = onboarding_page(&FormView::new(&schema, &draft, today()));

        assert!(html.contains("form.addEventListener('input', revalidate)"));
        assert!(html.contains("form.addEventListener('change', revalidate)"));
        assert!(html.contains("submitBtn.disabled = !form.checkValidity()"));
        assert!(html.contains("input.validationMessage"));
    }
}
