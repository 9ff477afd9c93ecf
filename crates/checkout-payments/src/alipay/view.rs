//! Presentation
//!
//! Side-effect-free view models for the Alipay label, name field, summary and
//! pay button. Renderers only draw what these return.

use checkout_core::{FormField, FormStatus, Localizer};

pub const METHOD_LABEL: &str = "Alipay";
pub const FIELD_LABEL: &str = "Your name";
pub const REQUIRED_FIELD: &str = "This field is required";
pub const BUTTON_PROCESSING: &str = "Processing…";
pub const BUTTON_PAY: &str = "Pay %s";
pub const BUTTON_WAIT: &str = "Please wait…";

/// What the customer-name input should show
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameFieldView {
    pub label: String,
    pub value: String,
    pub disabled: bool,
    pub error: Option<String>,
}

pub fn name_field(field: &FormField, form: FormStatus, l10n: &dyn Localizer) -> NameFieldView {
    NameFieldView {
        label: l10n.translate(FIELD_LABEL),
        value: field.value.clone(),
        disabled: !form.is_ready(),
        error: field
            .shows_required_error()
            .then(|| l10n.translate(REQUIRED_FIELD)),
    }
}

/// Pay button text for the current form status
pub fn button_label(form: FormStatus, total_display: &str, l10n: &dyn Localizer) -> String {
    match form {
        FormStatus::Submitting => l10n.translate(BUTTON_PROCESSING),
        FormStatus::Ready => l10n.format(BUTTON_PAY, &[total_display]),
        _ => l10n.translate(BUTTON_WAIT),
    }
}

/// Shown in the collapsed payment step
pub fn summary_line(field: &FormField) -> String {
    field.value.clone()
}

pub fn method_label(l10n: &dyn Localizer) -> String {
    l10n.translate(METHOD_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{CatalogLocalizer, IdentityLocalizer};

    #[test]
    fn test_button_label_variants() {
        let l10n = IdentityLocalizer;
        assert_eq!(button_label(FormStatus::Ready, "¥298.00", &l10n), "Pay ¥298.00");
        assert_eq!(button_label(FormStatus::Submitting, "¥298.00", &l10n), "Processing…");
        for other in [FormStatus::Loading, FormStatus::Validating, FormStatus::Complete] {
            assert_eq!(button_label(other, "¥298.00", &l10n), "Please wait…");
        }
    }

    #[test]
    fn test_name_field_error_and_disabled() {
        let l10n = IdentityLocalizer;

        let fresh = name_field(&FormField::default(), FormStatus::Ready, &l10n);
        assert_eq!(fresh.error, None);
        assert!(!fresh.disabled);
        assert_eq!(fresh.label, "Your name");

        let touched = FormField {
            value: String::new(),
            is_touched: true,
        };
        let view = name_field(&touched, FormStatus::Submitting, &l10n);
        assert_eq!(view.error.as_deref(), Some("This field is required"));
        assert!(view.disabled);
    }

    #[test]
    fn test_translated_labels() {
        let l10n = CatalogLocalizer::from_json(
            "zh-cn",
            r#"{"Alipay": "支付宝", "Pay %s": "支付 %s"}"#,
        )
        .unwrap();
        assert_eq!(method_label(&l10n), "支付宝");
        assert_eq!(button_label(FormStatus::Ready, "¥298.00", &l10n), "支付 ¥298.00");
    }

    #[test]
    fn test_summary_is_unformatted() {
        let field = FormField {
            value: "  jane doe ".into(),
            is_touched: true,
        };
        assert_eq!(summary_line(&field), "  jane doe ");
    }
}
