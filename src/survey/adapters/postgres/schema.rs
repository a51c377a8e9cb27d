//! Diesel schema for survey result persistence.

diesel::table! {
    /// One row per survey issue.
    survey_results (issue_id) {
        /// Platform-assigned survey issue identifier.
        issue_id -> Int8,
        /// Enterprise owning the repository.
        #[max_length = 255]
        enterprise_name -> Nullable<Varchar>,
        /// Repository owner login.
        #[max_length = 255]
        owner_login -> Varchar,
        /// Repository name.
        #[max_length = 255]
        repo_name -> Varchar,
        /// Survey issue number.
        issue_number -> Int8,
        /// Surveyed pull request number.
        pr_number -> Int8,
        /// Survey assignee login.
        #[max_length = 255]
        assignee_login -> Nullable<Varchar>,
        /// Whether the assistant was used.
        assistant_used -> Nullable<Bool>,
        /// Comma-joined usage buckets.
        usage_percentage -> Nullable<Text>,
        /// Reason given for not using the assistant.
        non_use_reason -> Nullable<Text>,
        /// Survey issue creation timestamp.
        created_at -> Timestamptz,
        /// Timestamp of the latest recorded answer.
        updated_at -> Timestamptz,
    }
}
