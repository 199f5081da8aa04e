//! # Document Templates
//!
//! The markdown requirements template offered by the technical flow's
//! download view, and the notification email sent for each accepted
//! request. Every interpolated value is HTML-escaped.

use serde::{Deserialize, Serialize};

use crate::request::{GuidedQuote, QuoteRequest, TechnicalQuote};
use crate::sanitize::escape_html;
use crate::types::{Budget, ProjectType, Timeline};

/// Suggested file name for the downloaded template.
pub const REQUIREMENTS_FILE_NAME: &str = "sunny-stack-technical-requirements.md";

const REQUIREMENTS_DOCUMENT: &str = r#"# Technical Requirements Document
## Sunny Stack Development

**Contact:** Luka Fagundes
**Email:** luka@sunny-stack.com
**Website:** sunny-stack.com

---

## 1. Contact Information

**Full Name:**
_[Your name]_

**Email:**
_[Your email]_

**Company Name:**
_[Your company]_

**Phone Number (Optional):**
_[Your phone]_

---

## 2. Project Overview

**Project Name:**
_[Project name]_

**Project Type:**
- [ ] Website (Marketing site, portfolio, blog)
- [ ] Web Application (Interactive app, SaaS, dashboard)
- [ ] Desktop Application (Windows, Mac, Linux)
- [ ] Mobile Application (iOS, Android, cross-platform)
- [ ] E-Commerce Platform (Online store, marketplace)
- [ ] API/Backend Service
- [ ] Other: _[Specify]_

**Project Description:**
_[Provide a detailed description of your project, its purpose, and main objectives]_

---

## 3. Technical Requirements

**Preferred Technology Stack:**
_[e.g., React, Node.js, PostgreSQL - or leave blank for recommendations]_

**Required Features & Functionality:**
- [ ] User authentication/authorization
- [ ] Payment processing
- [ ] Email notifications
- [ ] File uploads/downloads
- [ ] Search functionality
- [ ] Admin dashboard
- [ ] Analytics/reporting
- [ ] Real-time updates
- [ ] Mobile responsive design
- [ ] Other: _[List additional features]_

---

## 4. Project Logistics

**Timeline:**
- [ ] ASAP (Rush delivery)
- [ ] 1 month
- [ ] 2-3 months
- [ ] 3-6 months
- [ ] Flexible

**Budget Range:**
- [ ] Under $5,000
- [ ] $5,000 - $10,000
- [ ] $10,000 - $25,000
- [ ] $25,000 - $50,000
- [ ] $50,000+

---

## Submission Instructions

Please save this completed document and email it to:
**luka@sunny-stack.com**

Subject Line: **Technical Requirements - [Your Project Name]**

---

*Thank you for choosing Sunny Stack for your development needs!*
"#;

/// The markdown requirements template.
pub fn requirements_document() -> &'static str {
    REQUIREMENTS_DOCUMENT
}

/// A rendered notification email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub html: String,
    pub reply_to: String,
}

/// Render the notification email for a (sanitised) request.
pub fn render_email(request: &QuoteRequest) -> EmailMessage {
    let (subject, html) = match request {
        QuoteRequest::Guided(q) => (
            format!("New Project Request from {}", q.name),
            guided_html(q),
        ),
        QuoteRequest::Technical(q) => (
            format!("Technical Requirements from {}", q.contact_name),
            technical_html(q),
        ),
    };
    EmailMessage {
        subject,
        html,
        reply_to: request.reply_to().to_string(),
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

fn project_type_label(raw: &str) -> String {
    raw.parse::<ProjectType>()
        .map(|p| p.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn timeline_label(raw: &str) -> String {
    raw.parse::<Timeline>()
        .map(|t| t.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn budget_label(raw: &str) -> String {
    raw.parse::<Budget>()
        .map(|b| b.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn guided_html(q: &GuidedQuote) -> String {
    let features: String = q
        .features
        .iter()
        .map(|f| format!("<li>{}</li>", escape_html(f)))
        .collect();

    format!(
        "<h2>New Project Request (Guided Form)</h2>\n\
         <h3>Contact Information</h3>\n\
         <p><strong>Name:</strong> {name}</p>\n\
         <p><strong>Email:</strong> {email}</p>\n\
         <p><strong>Company:</strong> {company}</p>\n\
         <h3>Project Details</h3>\n\
         <p><strong>Project Type:</strong> {project_type}</p>\n\
         <p><strong>Description:</strong></p>\n\
         <p>{description}</p>\n\
         <h3>Features Requested</h3>\n\
         <ul>{features}</ul>\n\
         <h3>Project Logistics</h3>\n\
         <p><strong>Timeline:</strong> {timeline}</p>\n\
         <p><strong>Budget:</strong> {budget}</p>\n\
         <hr>\n\
         <p><em>This request was submitted via the guided form on sunny-stack.com</em></p>\n",
        name = escape_html(&q.name),
        email = escape_html(&q.email),
        company = escape_html(or_default(&q.company, "Not provided")),
        project_type = escape_html(&project_type_label(&q.project_type)),
        description = escape_html(&q.project_description),
        features = features,
        timeline = escape_html(&timeline_label(&q.timeline)),
        budget = escape_html(&budget_label(&q.budget)),
    )
}

fn technical_html(q: &TechnicalQuote) -> String {
    format!(
        "<h2>Technical Requirements Submission</h2>\n\
         <h3>Contact Information</h3>\n\
         <p><strong>Name:</strong> {name}</p>\n\
         <p><strong>Email:</strong> {email}</p>\n\
         <p><strong>Company:</strong> {company}</p>\n\
         <p><strong>Phone:</strong> {phone}</p>\n\
         <h3>Project Overview</h3>\n\
         <p><strong>Project Name:</strong> {project_name}</p>\n\
         <p><strong>Project Type:</strong> {project_type}</p>\n\
         <p><strong>Description:</strong></p>\n\
         <p>{description}</p>\n\
         <p><strong>Target Audience:</strong> {audience}</p>\n\
         <h3>Technical Requirements</h3>\n\
         <p><strong>Tech Stack:</strong> {stack}</p>\n\
         <p><strong>Features &amp; Functionality:</strong></p>\n\
         <p>{features}</p>\n\
         <p><strong>Integrations:</strong></p>\n\
         <p>{integrations}</p>\n\
         <p><strong>Hosting Preference:</strong> {hosting}</p>\n\
         <h3>Project Logistics</h3>\n\
         <p><strong>Timeline:</strong> {timeline}</p>\n\
         <p><strong>Budget Range:</strong> {budget}</p>\n\
         <p><strong>Design Status:</strong> {design}</p>\n\
         <h3>Additional Notes</h3>\n\
         <p>{notes}</p>\n\
         <hr>\n\
         <p><em>This request was submitted via the technical form on sunny-stack.com</em></p>\n",
        name = escape_html(&q.contact_name),
        email = escape_html(&q.contact_email),
        company = escape_html(or_default(&q.company_name, "Not provided")),
        phone = escape_html(or_default(&q.phone, "Not provided")),
        project_name = escape_html(&q.project_name),
        project_type = escape_html(&project_type_label(&q.project_type)),
        description = escape_html(&q.project_description),
        audience = escape_html(or_default(&q.target_audience, "Not specified")),
        stack = escape_html(or_default(&q.tech_stack, "No preference")),
        features = escape_html(&q.features),
        integrations = escape_html(or_default(&q.integrations, "None specified")),
        hosting = escape_html(or_default(&q.hosting_preference, "Not specified")),
        timeline = escape_html(&timeline_label(&q.timeline)),
        budget = escape_html(&budget_label(&q.budget)),
        design = escape_html(or_default(&q.design_status, "Not specified")),
        notes = escape_html(or_default(&q.additional_notes, "None")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirements_document_mentions_contact() {
        let doc = requirements_document();
        assert!(doc.starts_with("# Technical Requirements Document"));
        assert!(doc.contains("**luka@sunny-stack.com**"));
        assert!(doc.contains("**Phone Number (Optional):**"));
        assert!(doc.contains("- [ ] $25,000 - $50,000"));
    }

    #[test]
    fn guided_email() {
        let request = QuoteRequest::Guided(GuidedQuote {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            project_type: "ecommerce".into(),
            project_description: "Sell <handmade> mugs".into(),
            features: vec!["Payment processing".into(), "Other: Gift wrap".into()],
            timeline: "asap".into(),
            budget: "under5k".into(),
            ..Default::default()
        });
        let email = render_email(&request);
        assert_eq!(email.subject, "New Project Request from Alice");
        assert_eq!(email.reply_to, "alice@example.com");
        assert!(email.html.contains("<strong>Company:</strong> Not provided"));
        assert!(email.html.contains("E-Commerce Platform"));
        assert!(email.html.contains("Sell &lt;handmade&gt; mugs"));
        assert!(email.html.contains("<li>Other: Gift wrap</li>"));
        assert!(email.html.contains("<strong>Budget:</strong> Under $5,000"));
    }

    #[test]
    fn technical_email_defaults() {
        let request = QuoteRequest::Technical(TechnicalQuote {
            contact_name: "Bob".into(),
            contact_email: "bob@example.com".into(),
            timeline: "sometime".into(),
            ..Default::default()
        });
        let email = render_email(&request);
        assert_eq!(email.subject, "Technical Requirements from Bob");
        assert!(email.html.contains("<strong>Target Audience:</strong> Not specified"));
        assert!(email.html.contains("<strong>Tech Stack:</strong> No preference"));
        assert!(email.html.contains("<strong>Phone:</strong> Not provided"));
        assert!(email.html.contains("<p>None specified</p>"));
        assert!(email.html.contains("<p>None</p>"));
        assert!(email.html.contains("<strong>Timeline:</strong> sometime"));
    }
}
