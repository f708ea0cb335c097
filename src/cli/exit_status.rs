use std::process::ExitCode;

/// Process exit status, so CI can tell findings apart from failures.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every checked translation follows the glossary.
    Success,
    /// At least one correction was suggested.
    Failure,
    /// The run aborted: bad config, glossary or flagged state.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}
