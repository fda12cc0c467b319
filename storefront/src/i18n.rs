//! Translation boundary.
//!
//! The storefront core passes translation keys through to a [`Translator`]
//! collaborator and never interprets the returned text. The bundled
//! [`CatalogTranslator`] resolves dotted keys against a JSON catalog and
//! interpolates `{{param}}` placeholders; a missing key echoes the key
//! back, which keeps missing-translation problems visible without making
//! them the core's concern.

use serde_json::Value;

/// Translation service contract
///
/// `args` are `(name, value)` pairs substituted into `{{name}}`
/// placeholders in the resolved string.
pub trait Translator: Send + Sync {
    /// Resolve a key, substituting the given arguments
    fn translate(&self, key: &str, args: &[(&str, String)]) -> String;
}

/// JSON-catalog-backed translator
///
/// Keys are dotted paths into a nested object, e.g.
/// `mealPlan.vegetarian.name`.
#[derive(Clone, Debug)]
pub struct CatalogTranslator {
    catalog: Value,
}

impl CatalogTranslator {
    /// Build a translator over a JSON catalog
    #[must_use]
    pub const fn new(catalog: Value) -> Self {
        Self { catalog }
    }

    /// The bundled English catalog with the storefront's keys
    #[must_use]
    pub fn english() -> Self {
        Self::new(serde_json::json!({
            "header": {
                "title": "Mars Colony Tickets",
                "subtitle": "Secure your place in humanity's next chapter"
            },
            "cart": {
                "title": "Your Cart",
                "passenger": "Passenger {{number}} name",
                "checkout": "Proceed to Checkout"
            },
            "mealPlan": {
                "title": "Meal Plan",
                "select": "No meal plan",
                "standard": { "name": "Standard" },
                "vegetarian": { "name": "Vegetarian" },
                "premium": { "name": "Premium" }
            },
            "wifi": {
                "title": "Wi-Fi Package",
                "select": "No Wi-Fi",
                "basic": { "name": "Basic" },
                "high-speed": { "name": "High-Speed" },
                "ultra": { "name": "Ultra" },
                "duration": {
                    "1-month": "1 month",
                    "3-months": "3 months",
                    "6-months": "6 months"
                }
            },
            "ticket": {
                "passenger": "Passenger: {{name}}",
                "id": "Ticket ID: {{id}}"
            }
        }))
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(&self.catalog, |node, part| node.get(part))
            .and_then(Value::as_str)
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, key: &str, args: &[(&str, String)]) -> String {
        let Some(template) = self.lookup(key) else {
            tracing::debug!(key, "missing translation key");
            return key.to_string();
        };

        let mut text = template.to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{{{name}}}}}"), value);
        }
        text
    }
}
