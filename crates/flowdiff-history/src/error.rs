use flowdiff_types::VersionId;

/// Errors from version history and comparison operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// No version with the given id exists in the source.
    #[error("version not found: {0}")]
    VersionNotFound(VersionId),

    /// A version with this id was already recorded.
    #[error("version already exists: {0}")]
    DuplicateVersion(VersionId),

    /// The two versions belong to different workflows and cannot be diffed.
    #[error("versions belong to different workflows: {base} vs {compare}")]
    WorkflowMismatch { base: String, compare: String },

    /// A definition could not be prepared for diffing.
    #[error("diff error: {0}")]
    Diff(#[from] flowdiff_diff::DiffError),
}

/// Result alias for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: &HistoryError) -> String {
        match err {
            HistoryError::VersionNotFound(_)
            | HistoryError::DuplicateVersion(_)
            | HistoryError::WorkflowMismatch { .. }
            | HistoryError::Diff(_) => err.to_string(),
        }
    }

    #[test]
    fn messages_name_the_failure() {
        let id = VersionId::new();
        assert!(message(&HistoryError::VersionNotFound(id.clone())).contains(&id.to_string()));
        assert!(message(&HistoryError::DuplicateVersion(id)).starts_with("version already exists"));

        let mismatch = HistoryError::WorkflowMismatch {
            base: "wf-a".into(),
            compare: "wf-b".into(),
        };
        assert_eq!(
            message(&mismatch),
            "versions belong to different workflows: wf-a vs wf-b"
        );
    }
}
