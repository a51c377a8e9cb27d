//! Tests for template rendering and indentation normalisation.

use crate::survey::domain::{IssueTemplate, LanguageCode, PullRequestNumber, dedent};
use rstest::rstest;

fn pr(number: u64) -> PullRequestNumber {
    PullRequestNumber::new(number).expect("valid pull request number")
}

#[rstest]
fn every_placeholder_is_replaced() {
    let template = IssueTemplate::new(
        LanguageCode::En,
        "Survey for XXX\n\n- [ ] Yes, XXX used Copilot\n- [ ] No",
    );

    let rendered = template.render(pr(42));

    assert_eq!(
        rendered,
        "Survey for #42\n\n- [ ] Yes, #42 used Copilot\n- [ ] No"
    );
    assert!(!rendered.contains("XXX"));
}

#[rstest]
fn placeholder_free_template_only_loses_indentation() {
    let template = IssueTemplate::new(LanguageCode::Fr, "    Merci\n      - [ ] Oui\n    Fin\n");

    assert_eq!(template.render(pr(42)), "Merci\n  - [ ] Oui\nFin");
}

#[rstest]
fn dedent_trims_surrounding_blank_lines() {
    let text = "\n   \n\tHeading\n\n\tBody\n  \n";

    assert_eq!(dedent(text), "Heading\n\nBody");
}

#[rstest]
fn dedent_keeps_unindented_text() {
    assert_eq!(dedent("# Title\n\n- [ ] Sim"), "# Title\n\n- [ ] Sim");
}

#[rstest]
fn dedent_of_blank_text_is_empty() {
    assert_eq!(dedent(" \n\t\n"), "");
}

#[rstest]
#[case(LanguageCode::En, "copilot-usage-en.md")]
#[case(LanguageCode::Es, "copilot-usage-es.md")]
#[case(LanguageCode::Pt, "copilot-usage-pt.md")]
#[case(LanguageCode::Fr, "copilot-usage-fr.md")]
fn template_file_names_follow_language(#[case] language: LanguageCode, #[case] expected: &str) {
    assert_eq!(IssueTemplate::file_name(language), expected);
}
