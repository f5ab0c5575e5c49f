//! Deployment-applicability classification.
//!
//! A documentation page declares where a feature applies with two marker
//! paragraphs, `<p class="cloud-label">` and `<p class="on-prem-label">`.
//! Both may be present.

use serde::{Serialize, Serializer};

use crate::dom::{self, Document};
use crate::patterns::{CLOUD_MARKER_SELECTOR, ON_PREM_MARKER_SELECTOR};
use crate::result::FETCH_ERROR;

/// Label for cloud-only pages.
pub const CLOUD_LABEL: &str = "Alation Cloud Service";

/// Label for customer-managed (on-premises) pages.
pub const ON_PREM_LABEL: &str = "Customer Managed";

/// Label for pages that apply to both deployments.
pub const BOTH_LABEL: &str = "Alation Cloud Service, Customer Managed";

/// The closed set of answers accepted from the LLM fallback.
pub const FALLBACK_LABELS: [&str; 3] = [CLOUD_LABEL, ON_PREM_LABEL, BOTH_LABEL];

/// Why a fetched page has no deployment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownReason {
    /// Neither marker is present.
    NoMarker,
    /// The page was fetched but had no parseable document.
    Unparseable,
    /// The LLM fallback answered outside the label set.
    LlmInferenceFailed,
    /// The LLM fallback could not be reached.
    LlmApiError,
}

/// Deployment applicability of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentType {
    Cloud,
    OnPrem,
    Both,
    Unknown(UnknownReason),
    FetchError,
}

impl DeploymentType {
    /// Apply the marker decision table.
    #[must_use]
    pub fn from_markers(markers: Markers) -> Self {
        match (markers.cloud, markers.on_prem) {
            (true, true) => Self::Both,
            (true, false) => Self::Cloud,
            (false, true) => Self::OnPrem,
            (false, false) => Self::Unknown(UnknownReason::NoMarker),
        }
    }

    /// Parse one of the closed-set labels. Matching is exact.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            CLOUD_LABEL => Some(Self::Cloud),
            ON_PREM_LABEL => Some(Self::OnPrem),
            BOTH_LABEL => Some(Self::Both),
            _ => None,
        }
    }

    /// Whether the structural markers were inconclusive, making the page
    /// eligible for the LLM fallback.
    #[must_use]
    pub fn needs_fallback(self) -> bool {
        self == Self::Unknown(UnknownReason::NoMarker)
    }

    /// Report label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cloud => CLOUD_LABEL,
            Self::OnPrem => ON_PREM_LABEL,
            Self::Both => BOTH_LABEL,
            Self::Unknown(UnknownReason::NoMarker) => "Tag Not Found",
            Self::Unknown(UnknownReason::Unparseable) => "Analysis Error",
            Self::Unknown(UnknownReason::LlmInferenceFailed) => "LLM Inference Failed",
            Self::Unknown(UnknownReason::LlmApiError) => "LLM API Error",
            Self::FetchError => FETCH_ERROR,
        }
    }
}

impl std::fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DeploymentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Presence of the two deployment markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markers {
    pub cloud: bool,
    pub on_prem: bool,
}

/// Look for the marker paragraphs anywhere in the document.
#[must_use]
pub fn detect_markers(doc: &Document) -> Markers {
    Markers {
        cloud: dom::exists(doc, CLOUD_MARKER_SELECTOR),
        on_prem: dom::exists(doc, ON_PREM_MARKER_SELECTOR),
    }
}

/// Classify a parsed page. `None` means the page was fetched but could not
/// be parsed, which is reported as `"Analysis Error"`.
#[must_use]
pub fn classify(doc: Option<&Document>) -> DeploymentType {
    match doc {
        Some(doc) => DeploymentType::from_markers(detect_markers(doc)),
        None => DeploymentType::Unknown(UnknownReason::Unparseable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Document {
        dom::parse(&format!("<html><head><title>T</title></head><body>{body}</body></html>"))
    }

    #[test]
    fn truth_table_maps_all_marker_combinations() {
        let cases = [
            (true, true, BOTH_LABEL),
            (true, false, CLOUD_LABEL),
            (false, true, ON_PREM_LABEL),
            (false, false, "Tag Not Found"),
        ];
        for (cloud, on_prem, expected) in cases {
            let result = DeploymentType::from_markers(Markers { cloud, on_prem });
            assert_eq!(result.to_string(), expected, "cloud={cloud} on_prem={on_prem}");
        }
    }

    #[test]
    fn classify_detects_marker_paragraphs() {
        let both = page(r#"<p class="cloud-label">Cloud</p><p class="on-prem-label">On-prem</p>"#);
        assert_eq!(classify(Some(&both)), DeploymentType::Both);

        let cloud = page(r#"<div><p class="note cloud-label">Cloud</p></div>"#);
        assert_eq!(classify(Some(&cloud)), DeploymentType::Cloud);

        let on_prem = page(r#"<p class="on-prem-label">Customer Managed</p>"#);
        assert_eq!(classify(Some(&on_prem)), DeploymentType::OnPrem);
    }

    #[test]
    fn marker_class_on_other_elements_is_ignored() {
        let doc = page(r#"<span class="cloud-label">Cloud</span><div class="on-prem-label"></div>"#);
        assert_eq!(classify(Some(&doc)), DeploymentType::Unknown(UnknownReason::NoMarker));
    }

    #[test]
    fn unparseable_and_fetch_failure_are_distinct() {
        assert_eq!(classify(None).to_string(), "Analysis Error");
        assert_eq!(DeploymentType::FetchError.to_string(), "Fetch Error");
    }

    #[test]
    fn only_no_marker_is_eligible_for_fallback() {
        assert!(DeploymentType::Unknown(UnknownReason::NoMarker).needs_fallback());
        assert!(!DeploymentType::Unknown(UnknownReason::Unparseable).needs_fallback());
        assert!(!DeploymentType::Cloud.needs_fallback());
        assert!(!DeploymentType::FetchError.needs_fallback());
    }

    #[test]
    fn from_label_accepts_exact_labels_only() {
        for label in FALLBACK_LABELS {
            assert_eq!(DeploymentType::from_label(label).map(DeploymentType::label), Some(label));
        }
        assert_eq!(DeploymentType::from_label("customer managed"), None);
        assert_eq!(DeploymentType::from_label("Tag Not Found"), None);
    }
}
