// src/ai/mod.rs
//! Generative-text integration: prose rewrites and the keyword critique

pub mod critique;
pub mod gemini;
pub mod prompts;

pub use critique::CritiqueClient;
pub use gemini::{GeminiClient, GeminiConfig, TextGenerator};
