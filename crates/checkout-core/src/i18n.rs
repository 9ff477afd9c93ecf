//! Localization
//!
//! User-facing strings are looked up by their English text and may carry `%s`
//! placeholders, filled in order.

use std::collections::HashMap;

use crate::error::Result;

/// Translates and interpolates user-facing strings
pub trait Localizer {
    /// Translated text for `msgid`, or `msgid` itself when unknown
    fn translate(&self, msgid: &str) -> String;

    /// Translate, then substitute `args` into the `%s` placeholders
    fn format(&self, msgid: &str, args: &[&str]) -> String {
        interpolate(&self.translate(msgid), args)
    }
}

/// Replace each `%s` in `template` with the next argument.
///
/// Surplus placeholders stay as written; surplus arguments are ignored.
pub fn interpolate(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find("%s") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("%s"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

/// Returns every string untranslated
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityLocalizer;

impl Localizer for IdentityLocalizer {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }
}

/// Message catalog keyed by the English text
#[derive(Clone, Debug, Default)]
pub struct CatalogLocalizer {
    locale: String,
    messages: HashMap<String, String>,
}

impl CatalogLocalizer {
    pub fn new(locale: impl Into<String>, messages: HashMap<String, String>) -> Self {
        Self {
            locale: locale.into(),
            messages,
        }
    }

    /// Parse a flat JSON object of `msgid -> translation`
    pub fn from_json(locale: impl Into<String>, json: &str) -> Result<Self> {
        let messages = serde_json::from_str(json)?;
        Ok(Self::new(locale, messages))
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Localizer for CatalogLocalizer {
    fn translate(&self, msgid: &str) -> String {
        self.messages
            .get(msgid)
            .cloned()
            .unwrap_or_else(|| msgid.to_string())
    }
}
