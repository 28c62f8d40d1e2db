/// Session-wide knobs the front end hands to the interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSettings {
    /// Problem name used when the user accepts export without naming one.
    pub user_name: String,
    /// Publish `MPD_*` model theories to the store before exporting.
    pub publish_model_theories: bool,
}

impl InterviewSettings {
    #[must_use]
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            publish_model_theories: false,
        }
    }
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self::new("user")
    }
}
