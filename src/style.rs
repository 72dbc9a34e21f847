use crossterm::style::Stylize;

/// How a message is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
    Heading,
}

/// Colors menu output when writing to a terminal
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn paint(&self, kind: MessageKind, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match kind {
            MessageKind::Info => text.to_string(),
            MessageKind::Success => text.green().to_string(),
            MessageKind::Error => text.red().bold().to_string(),
            MessageKind::Heading => text.cyan().bold().to_string(),
        }
    }
}
