#![doc = include_str!("../README.md")]

pub mod book;
pub mod chatbot;
pub mod client;
pub mod community;
pub mod envelope;
pub mod error;
pub mod guard;
pub mod mypage;
pub mod optimistic;
pub mod review;
pub mod session;
pub mod types;
pub mod validate;

// Re-exports for convenient access
pub use client::{ApiClient, ApiConfig, LoginCredentials, Registration, TokenPair};
pub use error::Error;
pub use guard::{SubmitGuard, SubmitPermit};
pub use optimistic::Snapshot;
pub use session::{MemoryTokenStore, Session, TokenStore};
pub use types::{CartId, CommentId, PostId, QuestionId, ReviewId, ScrapId};
pub use validate::is_iso_date;
