use crate::application::errors::CommandError;
use crate::domain::entities::{Command, CommandRegistry, Content, Message};

/// Service for managing and executing commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
    owner_id: Option<i64>,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
            owner_id: None,
        }
    }

    /// Set the owner id used to gate commands carrying the "owner" permission.
    pub fn with_owner(mut self, owner_id: Option<i64>) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        // Help command
        self.register(
            Command::new("help")
                .with_description("Show help message")
                .with_usage("help [command]")
                .with_handler(|_msg| async {
                    Ok("Commands: help, version, ping, coinflip, random, balance, deposit, withdraw, setmoney".to_string())
                }),
        );

        // Version command
        self.register(
            Command::new("version")
                .with_description("Show bot version")
                .with_handler(|_msg| async {
                    Ok(format!("vault-bot v{}", env!("CARGO_PKG_VERSION")))
                }),
        );
    }

    pub async fn handle(&self, message: &Message) -> Result<Option<String>, CommandError> {
        let Content::Command { name, args: _ } = &message.content else {
            return Ok(None);
        };

        // Find command (without prefix)
        let cmd = self
            .registry
            .find(name)
            .ok_or_else(|| CommandError::NotFound(name.clone()))?;

        if cmd.requires("owner") {
            let sender_id = message.sender.as_ref().map(|u| u.id);
            if sender_id.is_none() || sender_id != self.owner_id {
                return Err(CommandError::PermissionDenied);
            }
        }

        // Execute handler
        if let Some(handler) = &cmd.handler {
            Ok(Some(handler(message.clone()).await?))
        } else {
            Ok(Some(format!("Command {} not implemented", cmd.name)))
        }
    }

    pub fn get_help(&self, command: Option<&str>) -> String {
        if let Some(name) = command {
            if let Some(cmd) = self.registry.get(name) {
                let mut help = format!(
                    "{}{} - {}",
                    self.prefix,
                    cmd.name,
                    cmd.description.as_deref().unwrap_or("No description")
                );
                if let Some(usage) = &cmd.usage {
                    help.push_str(&format!("\nUsage: {}{}", self.prefix, usage));
                }
                return help;
            }
            return format!("Command {}{} not found", self.prefix, name);
        }

        // List all commands
        let mut help = "Available commands:\n".to_string();
        for cmd in self.registry.all() {
            help.push_str(&format!(
                "  {}{} - {}\n",
                self.prefix,
                cmd.name,
                cmd.description.as_deref().unwrap_or("")
            ));
        }
        help
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
