//! SeaORM entity models
//!
//! Database entities for DocForge

mod chat_history;
mod document;

pub use document::{
    Entity as DocumentEntity,
    Model as Document,
    ActiveModel as DocumentActiveModel,
    Column as DocumentColumn,
};

pub use chat_history::{
    Entity as ChatHistoryEntity,
    Model as QaExchange,
    ActiveModel as ChatHistoryActiveModel,
    Column as ChatHistoryColumn,
};
