mod manager;
mod timefmt;
mod transcript;

pub use manager::ConversationManager;
pub use timefmt::relative_time;
pub use transcript::ChatMessage;
