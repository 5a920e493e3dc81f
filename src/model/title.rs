//! Title-page data.

use chrono::Datelike;

use super::locale::Locale;
use crate::error::{Error, Result};

/// Visual style selected by the user. Only changes the document-type label
/// on the default title page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DocumentStyle {
    #[default]
    Essay,
    Report,
    Coursework,
    Research,
}

/// Named title-page values as entered by the user. Blank means "use default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TitleFields {
    pub organization: String,
    pub department: String,
    pub discipline: String,
    pub title: String,
    pub author: String,
    pub group: String,
    pub supervisor: String,
    pub city: String,
    pub year: String,
}

/// Title fields with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTitle {
    pub organization: String,
    pub department: String,
    pub discipline: String,
    pub title: String,
    pub author: String,
    pub group: String,
    pub supervisor: String,
    pub city: String,
    pub year: String,
}

impl TitleFields {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    pub fn with_supervisor(mut self, supervisor: impl Into<String>) -> Self {
        self.supervisor = supervisor.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// Reject the export if a required field is blank.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::MissingField { field: "title" });
        }
        Ok(())
    }

    /// Apply the documented defaults for every blank field.
    ///
    /// Department, discipline and group have no default and stay empty.
    pub fn resolve(&self, locale: Locale) -> ResolvedTitle {
        fn or_default(value: &str, default: impl FnOnce() -> String) -> String {
            let value = value.trim();
            if value.is_empty() {
                default()
            } else {
                value.to_string()
            }
        }

        ResolvedTitle {
            organization: or_default(&self.organization, || {
                locale.default_organization().to_string()
            }),
            department: self.department.trim().to_string(),
            discipline: self.discipline.trim().to_string(),
            title: self.title.trim().to_string(),
            author: or_default(&self.author, || locale.default_author().to_string()),
            group: self.group.trim().to_string(),
            supervisor: or_default(&self.supervisor, || {
                locale.default_supervisor().to_string()
            }),
            city: or_default(&self.city, || locale.default_city().to_string()),
            year: or_default(&self.year, || chrono::Local::now().year().to_string()),
        }
    }
}

impl ResolvedTitle {
    /// Placeholder name and value pairs for template substitution.
    pub fn placeholders(&self) -> [(&'static str, &str); 9] {
        [
            ("ORGANIZATION", self.organization.as_str()),
            ("DEPARTMENT", self.department.as_str()),
            ("DISCIPLINE", self.discipline.as_str()),
            ("TITLE", self.title.as_str()),
            ("AUTHOR", self.author.as_str()),
            ("GROUP", self.group.as_str()),
            ("SUPERVISOR", self.supervisor.as_str()),
            ("CITY", self.city.as_str()),
            ("YEAR", self.year.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_title() {
        assert!(TitleFields::new("Essay").validate().is_ok());
        let err = TitleFields::new("   ").validate().unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "title" }));
    }

    #[test]
    fn test_resolve_defaults() {
        let fields = TitleFields::new(" Climate ").with_year("2024");
        let resolved = fields.resolve(Locale::Ru);
        assert_eq!(resolved.title, "Climate");
        assert_eq!(resolved.author, "Студент");
        assert_eq!(resolved.city, "Москва");
        assert_eq!(resolved.year, "2024");
        assert!(resolved.department.is_empty());
    }

    #[test]
    fn test_resolve_current_year() {
        let resolved = TitleFields::new("T").resolve(Locale::En);
        let year: i32 = resolved.year.parse().unwrap();
        assert!(year >= 2024);
    }
}
