//! Element addressing schemes.
//!
//! Selectors are produced as opaque strings for the automation driver; the
//! toolkit never parses or validates them. Elements are re-resolved by the
//! driver on every call, so a `Selector` value is the element reference:
//! there is no cached handle to go stale.

use serde::{Deserialize, Serialize};

/// Strategy for locating a remote UI element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// Exact resource-id match
    ResourceId(String),
    /// Exact visible-text match
    Text(String),
    /// Visible-text substring match
    TextContains(String),
    /// Accessibility label match
    AccessibilityId(String),
    /// Raw path expression handed through unchanged
    XPath(String),
}

impl Selector {
    /// Locate by resource id
    #[must_use]
    pub fn by_id(resource_id: impl Into<String>) -> Self {
        Self::ResourceId(resource_id.into())
    }

    /// Locate by exact visible text
    #[must_use]
    pub fn by_text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Locate by visible-text substring
    #[must_use]
    pub fn by_text_contains(text: impl Into<String>) -> Self {
        Self::TextContains(text.into())
    }

    /// Locate by accessibility label
    #[must_use]
    pub fn by_accessibility_id(label: impl Into<String>) -> Self {
        Self::AccessibilityId(label.into())
    }

    /// Locate by raw path expression
    #[must_use]
    pub fn by_xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Render the selector string consumed by the automation driver
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::ResourceId(id) => {
                format!("android=new UiSelector().resourceId(\"{id}\")")
            }
            Self::Text(text) => format!("android=new UiSelector().text(\"{text}\")"),
            Self::TextContains(text) => {
                format!("android=new UiSelector().textContains(\"{text}\")")
            }
            Self::AccessibilityId(label) => format!("~{label}"),
            Self::XPath(expr) => expr.clone(),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_query() {
        let sel = Selector::by_id("com.wdiodemoapp:id/drag");
        assert_eq!(
            sel.to_query(),
            "android=new UiSelector().resourceId(\"com.wdiodemoapp:id/drag\")"
        );
    }

    #[test]
    fn test_text_queries() {
        assert_eq!(
            Selector::by_text("Login").to_query(),
            "android=new UiSelector().text(\"Login\")"
        );
        assert_eq!(
            Selector::by_text_contains("success").to_query(),
            "android=new UiSelector().textContains(\"success\")"
        );
    }

    #[test]
    fn test_accessibility_id_query() {
        assert_eq!(Selector::by_accessibility_id("Drag").to_query(), "~Drag");
    }

    #[test]
    fn test_xpath_passthrough() {
        let expr = "//android.widget.TextView[@text='Congratulations']";
        assert_eq!(Selector::by_xpath(expr).to_query(), expr);
    }

    #[test]
    fn test_display_matches_query() {
        let sel = Selector::by_accessibility_id("Home");
        assert_eq!(sel.to_string(), sel.to_query());
    }
}
