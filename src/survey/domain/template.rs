//! Localized survey issue templates and their rendering rules.

use super::{LanguageCode, PullRequestNumber};

/// Literal token replaced by the pull request reference.
pub const PR_PLACEHOLDER: &str = "XXX";

/// Title prefix identifying survey issues opened by the bot.
pub const SURVEY_TITLE_PREFIX: &str = "Copilot Usage - PR#";

/// Raw markdown template for one survey language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTemplate {
    language: LanguageCode,
    source: String,
}

impl IssueTemplate {
    /// Wraps template source text loaded for `language`.
    #[must_use]
    pub fn new(language: LanguageCode, source: impl Into<String>) -> Self {
        Self {
            language,
            source: source.into(),
        }
    }

    /// Returns the file name a template for `language` is stored under.
    #[must_use]
    pub fn file_name(language: LanguageCode) -> String {
        format!("copilot-usage-{}.md", language.as_str())
    }

    /// Returns the template language.
    #[must_use]
    pub const fn language(&self) -> LanguageCode {
        self.language
    }

    /// Returns the unrendered template text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders the issue body for `pr_number`.
    ///
    /// Every [`PR_PLACEHOLDER`] becomes `#<pr_number>`; the result is then
    /// dedented so templates may be authored with indentation.
    #[must_use]
    pub fn render(&self, pr_number: PullRequestNumber) -> String {
        let substituted = self.source.replace(PR_PLACEHOLDER, &pr_number.reference());
        dedent(&substituted)
    }
}

/// Removes the indentation shared by all non-blank lines and trims leading
/// and trailing blank lines.
#[must_use]
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let is_blank = |line: &&str| line.trim().is_empty();
    let (Some(first), Some(last)) = (
        lines.iter().position(|line| !is_blank(line)),
        lines.iter().rposition(|line| !is_blank(line)),
    ) else {
        return String::new();
    };

    let common_indent = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let dedented: Vec<&str> = lines
        .iter()
        .skip(first)
        .take(last - first + 1)
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                strip_indent(line, common_indent)
            }
        })
        .collect();
    dedented.join("\n")
}

fn strip_indent(line: &str, width: usize) -> &str {
    let mut remaining = line;
    for _ in 0..width {
        match remaining.strip_prefix([' ', '\t']) {
            Some(rest) => remaining = rest,
            None => break,
        }
    }
    remaining
}

/// Title of the survey issue for a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyTitle;

impl SurveyTitle {
    /// Builds the title for the survey about `pr_number`.
    #[must_use]
    pub fn for_pull_request(pr_number: PullRequestNumber) -> String {
        format!("{SURVEY_TITLE_PREFIX}{pr_number}")
    }

    /// Returns `true` when `title` marks an issue opened by the bot.
    #[must_use]
    pub fn matches(title: &str) -> bool {
        title.starts_with(SURVEY_TITLE_PREFIX)
    }
}
