// src/types/mod.rs
//! Résumé document model and critique value types

pub mod critique;
pub mod resume;

pub use critique::CritiqueResult;
pub use resume::{
    present, Education, Experience, PersonalInfo, Project, ResumeDocument, SectionKey,
    SectionTitles, SkillCategory, SocialLink, PRESENT_LABEL,
};
