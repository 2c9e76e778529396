//! Backend plumbing: error taxonomy, wire payloads, the capability trait,
//! and the HTTP client implementing it.

mod client;
mod error;
mod service;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use service::WordService;
pub use types::{
    FeedbackPayload, HintPayload, LevelPayload, LogGameBody, PlacementSubmitBody, UseHintBody,
    WordPayload,
};
