pub mod chat;
pub mod message;

pub use chat::ChatWidget;
pub use message::MessageContent;
