//! Messaging - parsing raw chat input into structured messages

pub mod parser;

pub use parser::MessageParser;
