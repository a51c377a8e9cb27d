//! Parsing of survey answers from the survey issue body.
//!
//! Survey issues are plain markdown checklists. Users answer by ticking
//! options (`[x]`), optionally followed by a comment explaining why the
//! assistant was not used. Parsing is pure; deciding what to persist and
//! whether to close the issue is left to the orchestration service, which
//! reads the decisions exposed here.

use super::MalformedSurveyBodyError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Tokens marking an affirmative answer in any survey language.
///
/// `Si` also matches `Sim`; both are kept so each template's wording is
/// listed explicitly.
const AFFIRMATIVE_TOKENS: [&str; 4] = ["Sim", "Si", "Yes", "Oui"];

/// Tokens marking a negative answer in any survey language.
const NEGATIVE_TOKENS: [&str; 3] = ["Não", "No", "Non"];

/// Separator used when storing several selected percentage buckets.
const PERCENTAGE_SEPARATOR: &str = ",";

#[expect(
    clippy::expect_used,
    reason = "pattern is a literal covered by parser tests"
)]
static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid number pattern"));

#[expect(
    clippy::expect_used,
    reason = "pattern is a literal covered by parser tests"
)]
static CHECKED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[xX]\]").expect("valid checkbox pattern"));

/// Percentage buckets ticked by the user, in body order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsagePercentage(Vec<String>);

impl UsagePercentage {
    /// Creates a bucket list, returning `None` when it would be empty.
    #[must_use]
    pub fn new(buckets: Vec<String>) -> Option<Self> {
        (!buckets.is_empty()).then_some(Self(buckets))
    }

    /// Returns the selected bucket labels.
    #[must_use]
    pub fn buckets(&self) -> &[String] {
        &self.0
    }

    /// Serializes the buckets into the single stored column value.
    #[must_use]
    pub fn to_storage(&self) -> String {
        self.0.join(PERCENTAGE_SEPARATOR)
    }

    /// Restores buckets from a stored column value.
    #[must_use]
    pub fn from_storage(value: &str) -> Option<Self> {
        Self::new(
            value
                .split(PERCENTAGE_SEPARATOR)
                .map(str::trim)
                .filter(|bucket| !bucket.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

impl fmt::Display for UsagePercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_storage())
    }
}

/// Answer extracted from a survey issue body and the triggering comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyResponse {
    pr_number: u64,
    checked_options: Vec<String>,
    assistant_used: bool,
    explicit_negative: bool,
    usage_percentage: Option<UsagePercentage>,
    non_use_reason: Option<String>,
}

impl SurveyResponse {
    /// Parses the survey body together with the comment that triggered the
    /// event, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSurveyBodyError::MissingPullRequestNumber`] when no
    /// digits appear in the body, and
    /// [`MalformedSurveyBodyError::NoCheckedOptions`] when no option is
    /// ticked.
    pub fn parse(
        body: &str,
        latest_comment: Option<&str>,
    ) -> Result<Self, MalformedSurveyBodyError> {
        let pr_number = FIRST_NUMBER
            .find(body)
            .and_then(|found| found.as_str().parse::<u64>().ok())
            .ok_or(MalformedSurveyBodyError::MissingPullRequestNumber)?;

        let checked_options: Vec<String> = body.lines().flat_map(checked_segments).collect();
        if checked_options.is_empty() {
            return Err(MalformedSurveyBodyError::NoCheckedOptions { pr_number });
        }

        let assistant_used = contains_any(&checked_options, &AFFIRMATIVE_TOKENS);
        let (usage_percentage, explicit_negative) = if assistant_used {
            (selected_percentages(&checked_options), false)
        } else {
            (None, contains_any(&checked_options, &NEGATIVE_TOKENS))
        };

        Ok(Self {
            pr_number,
            checked_options,
            assistant_used,
            explicit_negative,
            usage_percentage,
            non_use_reason: latest_comment.map(str::to_owned),
        })
    }

    /// Returns the pull request number referenced by the survey.
    #[must_use]
    pub const fn pr_number(&self) -> u64 {
        self.pr_number
    }

    /// Returns the raw checked lines, markers included.
    #[must_use]
    pub fn checked_options(&self) -> &[String] {
        &self.checked_options
    }

    /// Returns `true` when an affirmative option is ticked.
    #[must_use]
    pub const fn assistant_used(&self) -> bool {
        self.assistant_used
    }

    /// Returns `true` when no affirmative but a negative option is ticked.
    #[must_use]
    pub const fn explicit_negative(&self) -> bool {
        self.explicit_negative
    }

    /// Returns the selected percentage buckets for affirmative answers.
    #[must_use]
    pub const fn usage_percentage(&self) -> Option<&UsagePercentage> {
        self.usage_percentage.as_ref()
    }

    /// Returns the triggering comment, if any.
    #[must_use]
    pub fn non_use_reason(&self) -> Option<&str> {
        self.non_use_reason.as_deref()
    }

    /// Returns `true` when the answer warrants writing the survey record.
    #[must_use]
    pub const fn should_persist(&self) -> bool {
        self.non_use_reason.is_some() || self.assistant_used || self.explicit_negative
    }

    /// Returns `true` when the answer is final and the issue can be closed.
    ///
    /// Affirmative answers need a percentage bucket; negative answers need a
    /// comment giving the reason.
    #[must_use]
    pub const fn should_close(&self) -> bool {
        if self.assistant_used {
            self.usage_percentage.is_some()
        } else {
            self.explicit_negative && self.non_use_reason.is_some()
        }
    }
}

/// Splits a line into its checked options.
///
/// Each option runs from its marker to the next marker or the end of the
/// line, so several answers ticked on one line stay separate.
fn checked_segments(line: &str) -> Vec<String> {
    let starts: Vec<usize> = CHECKED_MARKER
        .find_iter(line)
        .map(|found| found.start())
        .collect();
    let ends = starts
        .iter()
        .skip(1)
        .copied()
        .chain(std::iter::once(line.len()));
    starts
        .iter()
        .zip(ends)
        .filter_map(|(&start, end)| line.get(start..end))
        .map(|segment| segment.trim_end().to_owned())
        .collect()
}

fn contains_any(lines: &[String], tokens: &[&str]) -> bool {
    lines
        .iter()
        .any(|line| tokens.iter().any(|token| line.contains(token)))
}

fn selected_percentages(lines: &[String]) -> Option<UsagePercentage> {
    UsagePercentage::new(
        lines
            .iter()
            .filter(|line| line.contains('%'))
            .map(|line| strip_marker(line).to_owned())
            .collect(),
    )
}

fn strip_marker(line: &str) -> &str {
    line.strip_prefix("[x]")
        .or_else(|| line.strip_prefix("[X]"))
        .unwrap_or(line)
        .trim()
}
