pub mod generate;
pub mod helpers;
pub mod purge;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

/// Tally of one `generate` batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub requested: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Tally of one `purge` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PurgeReport {
    pub deleted: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub generated: Option<GenerateReport>,
    pub purged: Option<PurgeReport>,
    pub cancelled: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_generated(mut self, report: GenerateReport) -> Self {
        self.generated = Some(report);
        self
    }

    pub fn with_purged(mut self, report: PurgeReport) -> Self {
        self.purged = Some(report);
        self
    }

    pub fn cancelled() -> Self {
        let mut result = Self {
            cancelled: true,
            ..Self::default()
        };
        result.add_message(CmdMessage::info("Operation cancelled."));
        result
    }
}
