//! # Quote Vocabulary
//!
//! The closed option sets of the quote forms. Each enum serialises as the
//! wire value the browser form submits (`"webapp"`, `"3months"`, `"25k+"`)
//! and offers a human label for emails and documents.
//!
//! | Enum            | Wire values                                                   |
//! |-----------------|---------------------------------------------------------------|
//! | `ProjectType`   | website, webapp, desktop, mobile, ecommerce, other            |
//! | `Timeline`      | asap, 1month, 3months, flexible                               |
//! | `Budget`        | under5k, 5k-10k, 10k-25k, 25k+                                |
//! | `FormMode`      | selection, guided, technical                                  |
//! | `TechnicalView` | choice, form, download                                        |
//! | `GuidedStep`    | contact, projectType, description, features, timeline, budget, review |

use std::fmt;
use std::str::FromStr;

use quote_core::QuoteError;
use serde::{Deserialize, Serialize};

/// The checklist offered on the guided form's features step.
pub const FEATURE_OPTIONS: &[&str] = &[
    "User accounts/login",
    "Payment processing",
    "Email notifications",
    "File uploads",
    "Search functionality",
    "Admin dashboard",
    "Analytics/reporting",
    "Third-party integrations",
    "Real-time updates",
    "Mobile responsive",
    "Other",
];

/// Kind of software the client wants built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Website,
    Webapp,
    Desktop,
    Mobile,
    Ecommerce,
    Other,
}

impl ProjectType {
    /// Every project type in form order.
    pub fn all() -> &'static [ProjectType] {
        Self::ALL
    }

    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Webapp => "webapp",
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Ecommerce => "ecommerce",
            Self::Other => "other",
        }
    }

    /// Display label used in emails.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::Webapp => "Web Application",
            Self::Desktop => "Desktop Application",
            Self::Mobile => "Mobile Application",
            Self::Ecommerce => "E-Commerce Platform",
            Self::Other => "Other",
        }
    }
}

/// When the client needs the project delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

impl Timeline {
    /// Every timeline in form order.
    pub fn all() -> &'static [Timeline] {
        Self::ALL
    }

    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asap => "asap",
            Self::OneMonth => "1month",
            Self::ThreeMonths => "3months",
            Self::Flexible => "flexible",
        }
    }

    /// Display label used in emails.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Asap => "ASAP",
            Self::OneMonth => "Within 1 month",
            Self::ThreeMonths => "Within 3 months",
            Self::Flexible => "Flexible timeline",
        }
    }
}

/// Budget bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Budget {
    #[serde(rename = "under5k")]
    Under5k,
    #[serde(rename = "5k-10k")]
    From5kTo10k,
    #[serde(rename = "10k-25k")]
    From10kTo25k,
    #[serde(rename = "25k+")]
    Over25k,
}

impl Budget {
    /// Every bracket in ascending order.
    pub fn all() -> &'static [Budget] {
        Self::ALL
    }

    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under5k => "under5k",
            Self::From5kTo10k => "5k-10k",
            Self::From10kTo25k => "10k-25k",
            Self::Over25k => "25k+",
        }
    }

    /// Display label used in emails.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Under5k => "Under $5,000",
            Self::From5kTo10k => "$5,000 - $10,000",
            Self::From10kTo25k => "$10,000 - $25,000",
            Self::Over25k => "$25,000+",
        }
    }
}

/// Which quote flow is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// The mode chooser.
    #[default]
    Selection,
    /// The seven-step guided form.
    Guided,
    /// The single-page technical requirements form.
    Technical,
}

impl FormMode {
    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Guided => "guided",
            Self::Technical => "technical",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Selection => "Choose a form",
            Self::Guided => "Guided Quote",
            Self::Technical => "Technical Requirements",
        }
    }
}

/// Sub-view of the technical flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnicalView {
    /// Fill in online or download the template.
    #[default]
    Choice,
    /// The online form.
    Form,
    /// The downloadable requirements document.
    Download,
}

impl TechnicalView {
    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Choice => "choice",
            Self::Form => "form",
            Self::Download => "download",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Choice => "Choose how to submit",
            Self::Form => "Online form",
            Self::Download => "Download template",
        }
    }
}

/// The pages of the guided form, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuidedStep {
    Contact,
    ProjectType,
    Description,
    Features,
    Timeline,
    Budget,
    Review,
}

impl GuidedStep {
    /// Every step in form order.
    pub fn all() -> &'static [GuidedStep] {
        Self::ALL
    }

    /// The wire value (also the `FormStep` id).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::ProjectType => "projectType",
            Self::Description => "description",
            Self::Features => "features",
            Self::Timeline => "timeline",
            Self::Budget => "budget",
            Self::Review => "review",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::ProjectType => "Project Type",
            Self::Description => "Description",
            Self::Features => "Features",
            Self::Timeline => "Timeline",
            Self::Budget => "Budget",
            Self::Review => "Review",
        }
    }

    /// Zero-based position in the guided flow.
    pub fn index(&self) -> usize {
        Self::all().iter().position(|s| s == self).unwrap_or(0)
    }

    /// The step at `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }
}

// ─── Display / FromStr ───────────────────────────────────────────────

macro_rules! wire_enum {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = QuoteError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let all: &[$ty] = $ty::ALL;
                all.iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| QuoteError::InvalidRecord(format!("unknown {}: {s:?}", $kind)))
            }
        }
    };
}

impl ProjectType {
    const ALL: &'static [ProjectType] = &[
        Self::Website,
        Self::Webapp,
        Self::Desktop,
        Self::Mobile,
        Self::Ecommerce,
        Self::Other,
    ];
}

impl Timeline {
    const ALL: &'static [Timeline] = &[Self::Asap, Self::OneMonth, Self::ThreeMonths, Self::Flexible];
}

impl Budget {
    const ALL: &'static [Budget] = &[
        Self::Under5k,
        Self::From5kTo10k,
        Self::From10kTo25k,
        Self::Over25k,
    ];
}

impl FormMode {
    const ALL: &'static [FormMode] = &[Self::Selection, Self::Guided, Self::Technical];
}

impl TechnicalView {
    const ALL: &'static [TechnicalView] = &[Self::Choice, Self::Form, Self::Download];
}

impl GuidedStep {
    const ALL: &'static [GuidedStep] = &[
        Self::Contact,
        Self::ProjectType,
        Self::Description,
        Self::Features,
        Self::Timeline,
        Self::Budget,
        Self::Review,
    ];
}

wire_enum!(ProjectType, "project type");
wire_enum!(Timeline, "timeline");
wire_enum!(Budget, "budget");
wire_enum!(FormMode, "form mode");
wire_enum!(TechnicalView, "technical view");
wire_enum!(GuidedStep, "guided step");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip() {
        for p in ProjectType::all() {
            assert_eq!(p.as_str().parse::<ProjectType>().unwrap(), *p);
        }
        for t in Timeline::all() {
            assert_eq!(t.to_string().parse::<Timeline>().unwrap(), *t);
        }
        for b in Budget::all() {
            assert_eq!(b.as_str().parse::<Budget>().unwrap(), *b);
        }
        for s in GuidedStep::all() {
            assert_eq!(s.as_str().parse::<GuidedStep>().unwrap(), *s);
        }
    }

    #[test]
    fn serde_matches_wire_value() {
        assert_eq!(serde_json::to_string(&Timeline::ThreeMonths).unwrap(), "\"3months\"");
        assert_eq!(serde_json::to_string(&Budget::Over25k).unwrap(), "\"25k+\"");
        assert_eq!(
            serde_json::to_string(&GuidedStep::ProjectType).unwrap(),
            "\"projectType\""
        );
        assert_eq!(serde_json::to_string(&FormMode::Technical).unwrap(), "\"technical\"");
    }

    #[test]
    fn unknown_value_rejected() {
        let err = "weekly".parse::<Timeline>().unwrap_err();
        assert!(err.to_string().contains("unknown timeline"));
        assert!("Website".parse::<ProjectType>().is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(ProjectType::Webapp.label(), "Web Application");
        assert_eq!(Timeline::OneMonth.label(), "Within 1 month");
        assert_eq!(Budget::From5kTo10k.label(), "$5,000 - $10,000");
    }

    #[test]
    fn guided_step_indexes() {
        assert_eq!(GuidedStep::all().len(), 7);
        assert_eq!(GuidedStep::Features.index(), 3);
        assert_eq!(GuidedStep::from_index(6), Some(GuidedStep::Review));
        assert_eq!(GuidedStep::from_index(7), None);
    }

    #[test]
    fn feature_options_end_with_other() {
        assert_eq!(FEATURE_OPTIONS.len(), 11);
        assert_eq!(FEATURE_OPTIONS.last(), Some(&"Other"));
    }
}
