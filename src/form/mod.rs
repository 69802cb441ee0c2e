pub mod utm_url;

pub use utm_url::{build_utm_url, UtmParams, UtmUrlError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::{suggest_identifier, Assignment};
use crate::models::{Department, NewUtmRecord, SourceType};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error(transparent)]
    UtmUrl(#[from] UtmUrlError),
}

/// State of one department's link form. Each form instance owns its value;
/// edits go through [`UtmForm::reduce`] and produce a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtmForm {
    #[serde(default)]
    pub department: Department,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub campaign: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_type: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub term: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetUrl(String),
    /// A campaign belongs to a client, so changing client clears the campaign.
    SetClient(String),
    SetCampaign(String),
    /// Source types are per source; changing source clears the type and tag.
    SetSource(String),
    SetSourceType(String),
    SetIdentifier(String),
    SetTerm(Option<String>),
    Reset,
}

impl UtmForm {
    pub fn new(department: Department) -> Self {
        Self {
            department,
            ..Self::default()
        }
    }

    pub fn reduce(self, action: FormAction) -> Self {
        match action {
            FormAction::SetUrl(url) => Self { url, ..self },
            FormAction::SetClient(client) if client == self.client => self,
            FormAction::SetClient(client) => Self {
                client,
                campaign: String::new(),
                ..self
            },
            FormAction::SetCampaign(campaign) => Self { campaign, ..self },
            FormAction::SetSource(source) if source == self.source => self,
            FormAction::SetSource(source) => Self {
                source,
                source_type: String::new(),
                identifier: String::new(),
                ..self
            },
            FormAction::SetSourceType(source_type) => Self { source_type, ..self },
            FormAction::SetIdentifier(identifier) => Self { identifier, ..self },
            FormAction::SetTerm(term) => Self { term, ..self },
            FormAction::Reset => Self::new(self.department),
        }
    }

    /// Pre-fill the identifier from existing links. A user-entered identifier
    /// is left alone.
    pub fn with_suggested_identifier<'a, A, I>(self, source_type: &SourceType, assignments: I) -> Self
    where
        A: Assignment + 'a,
        I: IntoIterator<Item = &'a A>,
    {
        if !self.identifier.trim().is_empty() {
            return self;
        }
        match suggest_identifier(&self.source, source_type, assignments) {
            Some(identifier) => self.reduce(FormAction::SetIdentifier(identifier)),
            None => self,
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let required = [
            ("url", &self.url),
            ("client", &self.client),
            ("campaign", &self.campaign),
            ("source", &self.source),
            ("sourceType", &self.source_type),
            ("identifier", &self.identifier),
        ];

        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    pub fn utm_params(&self) -> UtmParams {
        UtmParams {
            source: self.source.clone(),
            medium: self.source_type.clone(),
            campaign: self.campaign.clone(),
            content: self.identifier.clone(),
            term: self.term.clone(),
        }
    }

    pub fn utm_url(&self) -> Result<String, FormError> {
        Ok(build_utm_url(&self.url, &self.utm_params())?)
    }

    /// Validate and turn the form into the record handed to the repository.
    pub fn into_new_record(self) -> Result<NewUtmRecord, FormError> {
        self.validate()?;
        let utm_url = self.utm_url()?;

        Ok(NewUtmRecord {
            url: self.url.trim().to_string(),
            client: self.client,
            campaign: self.campaign,
            source: self.source,
            source_type: self.source_type,
            identifier: self.identifier,
            utm_url,
            department: self.department,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UtmRecord;

    fn filled() -> UtmForm {
        [
            FormAction::SetUrl("https://shop.example/landing".to_string()),
            FormAction::SetClient("acme".to_string()),
            FormAction::SetCampaign("spring".to_string()),
            FormAction::SetSource("instagram".to_string()),
            FormAction::SetSourceType("Paid Social".to_string()),
            FormAction::SetIdentifier("I3PS1".to_string()),
        ]
        .into_iter()
        .fold(UtmForm::new(Department::Social), UtmForm::reduce)
    }

    #[test]
    fn changing_client_clears_campaign() {
        let form = filled().reduce(FormAction::SetClient("globex".to_string()));
        assert_eq!(form.client, "globex");
        assert_eq!(form.campaign, "");
        assert_eq!(form.source, "instagram");
    }

    #[test]
    fn changing_source_clears_type_and_identifier() {
        let form = filled().reduce(FormAction::SetSource("facebook".to_string()));
        assert_eq!(form.source_type, "");
        assert_eq!(form.identifier, "");

        let same = filled().reduce(FormAction::SetSource("instagram".to_string()));
        assert_eq!(same, filled());
    }

    #[test]
    fn reset_keeps_department() {
        let form = filled().reduce(FormAction::Reset);
        assert_eq!(form, UtmForm::new(Department::Social));
    }

    #[test]
    fn validation_lists_missing_fields() {
        let form = UtmForm::new(Department::Sales).reduce(FormAction::SetUrl("https://a.example".to_string()));
        assert_eq!(
            form.validate(),
            Err(FormError::MissingFields(vec![
                "client",
                "campaign",
                "source",
                "sourceType",
                "identifier"
            ]))
        );
    }

    #[test]
    fn into_new_record_builds_tagged_url() {
        let record = filled().into_new_record().unwrap();
        assert_eq!(record.department, Department::Social);
        assert_eq!(
            record.utm_url,
            "https://shop.example/landing?utm_source=instagram&utm_medium=Paid+Social&utm_campaign=spring&utm_content=I3PS1"
        );
    }

    #[test]
    fn suggestion_fills_only_empty_identifier() {
        let paid_social = SourceType {
            source_type_id: "ST1".to_string(),
            name: "Paid Social".to_string(),
            abbr: "PS".to_string(),
            source: "instagram".to_string(),
        };
        let existing: Vec<UtmRecord> = Vec::new();

        let blank = filled().reduce(FormAction::SetIdentifier(String::new()));
        let suggested = blank.with_suggested_identifier(&paid_social, &existing);
        assert_eq!(suggested.identifier, "I1PS1");

        let kept = filled().with_suggested_identifier(&paid_social, &existing);
        assert_eq!(kept.identifier, "I3PS1");
    }
}
