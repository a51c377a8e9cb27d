//! Template source backed by a map of template texts.

use std::collections::HashMap;

use crate::survey::{
    domain::{IssueTemplate, LanguageCode},
    ports::{TemplateError, TemplateSource},
};

/// Template source holding template text in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateSource {
    templates: HashMap<LanguageCode, String>,
}

impl InMemoryTemplateSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the template for `language`.
    #[must_use]
    pub fn with_template(mut self, language: LanguageCode, source: impl Into<String>) -> Self {
        self.templates.insert(language, source.into());
        self
    }
}

impl TemplateSource for InMemoryTemplateSource {
    fn load(&self, language: LanguageCode) -> Result<IssueTemplate, TemplateError> {
        self.templates
            .get(&language)
            .map(|source| IssueTemplate::new(language, source.clone()))
            .ok_or_else(|| TemplateError::NotFound {
                language,
                file_name: IssueTemplate::file_name(language),
            })
    }
}
