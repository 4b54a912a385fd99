/// Run state of one verification session.
///
/// Moves forward only (`Idle -> Submitting -> Completed`); the single way
/// back is an explicit reset from `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Completed,
}

impl SubmissionState {
    pub fn is_submitting(self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}

/// Which slot a piece of captured media occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Selfie,
    Document,
}

impl MediaKind {
    /// Multipart field name expected by the verification service. Also used
    /// as the file stem of the uploaded name (`selfie.jpg`).
    pub fn field_name(self) -> &'static str {
        match self {
            MediaKind::Selfie => "selfie",
            MediaKind::Document => "document",
        }
    }
}
