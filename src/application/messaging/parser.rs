//! Message parser - Parses raw messages into structured messages

use crate::domain::entities::{Content, Message, MessageType, User};

/// Parses incoming text into structured Message objects
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: impl Into<String>, sender: Option<User>) -> Message {
        let text = text.into();
        let chat_id = chat_id.into();

        // Check if it's a command (custom prefix, or / which most platforms use)
        if text.starts_with(&self.command_prefix) || text.starts_with('/') {
            return self.parse_command(chat_id, text, sender);
        }

        // Regular text message
        Message::new(chat_id, Content::Text(text))
            .with_message_type(MessageType::Text)
            .with_sender_opt(sender)
    }

    fn parse_command(&self, chat_id: String, text: String, sender: Option<User>) -> Message {
        let cmd_text = if text.starts_with(&self.command_prefix) {
            text.trim_start_matches(&self.command_prefix)
        } else {
            text.trim_start_matches('/')
        };

        // Split command and arguments
        let parts: Vec<&str> = cmd_text.split_whitespace().collect();
        let name = parts.first().unwrap_or(&"").to_string();
        let args: Vec<String> = parts
            .get(1..)
            .map(|rest| rest.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default();

        Message::new(chat_id, Content::Command { name, args })
            .with_message_type(MessageType::Command)
            .with_sender_opt(sender)
    }
}

impl Message {
    /// Helper to set sender as Option
    pub fn with_sender_opt(mut self, user: Option<User>) -> Self {
        if let Some(u) = user {
            self.sender = Some(u);
        }
        self
    }

    /// Helper for MessageType
    pub fn with_message_type(mut self, mt: MessageType) -> Self {
        self.message_type = mt;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefixed_command_with_args() {
        let parser = MessageParser::new(".");
        let msg = parser.parse("chat", ".deposit 30", Some(User::new(42)));
        match msg.content {
            Content::Command { name, args } => {
                assert_eq!(name, "deposit");
                assert_eq!(args, vec!["30".to_string()]);
            }
            other => panic!("expected command, got {:?}", other),
        }
        assert_eq!(msg.sender.unwrap().id, 42);
    }

    #[test]
    fn slash_prefix_also_accepted() {
        let parser = MessageParser::new(".");
        let msg = parser.parse("chat", "/balance", None);
        assert!(msg.content.is_command());
    }

    #[test]
    fn plain_text_stays_text() {
        let parser = MessageParser::new(".");
        let msg = parser.parse("chat", "hello there", None);
        assert_eq!(msg.content.text(), Some("hello there"));
        assert_eq!(msg.message_type, MessageType::Text);
    }
}
