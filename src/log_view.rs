use chrono::Local;

const MAX_ENTRIES: usize = 200;

/// Bounded activity log shown in the side pane. Entries are also forwarded
/// to the file logger.
#[derive(Debug)]
pub struct LogView {
    pub entries: Vec<String>,
}

impl LogView {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: String) {
        log::debug!("{}", entry);
        let stamped = format!("{} {}", Local::now().format("%H:%M:%S"), entry);
        self.entries.push(stamped);
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::new()
    }
}
