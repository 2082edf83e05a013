/// The user's verdict on a reviewed task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Remembered: push the next review further out
    Good,
    /// Forgotten: back to the first ladder step
    Bad,
    /// Drop the task for good
    Delete,
}

impl Outcome {
    /// Parse the prompt answer ("g", "b", "d")
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "g" | "good" => Some(Self::Good),
            "b" | "bad" => Some(Self::Bad),
            "d" | "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
            Self::Delete => "delete",
        }
    }
}

/// What applying an outcome asks of the owning collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The task was rescheduled in place
    Updated,
    /// The task must be removed
    Remove,
}
