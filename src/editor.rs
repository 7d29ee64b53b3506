// src/editor.rs
//! Field-level edits producing a new document from an old one

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{
    Education, Experience, Project, ResumeDocument, SectionKey, SkillCategory, SocialLink,
    PRESENT_LABEL,
};

// ===== Id Minting =====

/// Mints list-entry ids from the current time in milliseconds.
/// Never hands out the same id twice, even within one millisecond.
#[derive(Debug, Default)]
pub struct IdMinter {
    last: i64,
}

impl IdMinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts above every numeric id already in the document, so a clock that
    /// went backwards since the document was saved cannot repeat one
    pub fn after(doc: &ResumeDocument) -> Self {
        let ids = doc
            .experience
            .iter()
            .map(|e| &e.id)
            .chain(doc.education.iter().map(|e| &e.id))
            .chain(doc.projects.iter().map(|p| &p.id))
            .chain(doc.skills.iter().map(|c| &c.id));
        let last = ids
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    pub fn mint(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let next = if now > self.last { now } else { self.last + 1 };
        self.last = next;
        next.to_string()
    }
}

/// Splits skill/technology input on ASCII or full-width commas
pub fn split_delimited(text: &str) -> Vec<String> {
    text.split([',', '，'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

// ===== Edit Shapes =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Title,
    Email,
    Phone,
    Location,
    BirthDate,
    YearsOfExperience,
    Degree,
    Github,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SocialField {
    Platform,
    Url,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ExperienceField {
    Company(String),
    Position(String),
    StartDate(String),
    /// Ignored while the entry is marked current
    EndDate(String),
    Current(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ProjectField {
    Name(String),
    Description(String),
    /// Raw comma-delimited input
    Technologies(String),
    Link(String),
    Github(String),
    Company(String),
    TeamSize(String),
    Content(String),
    Difficulties(String),
    Achievements(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    School,
    Degree,
    Field,
    StartDate,
    EndDate,
}

/// One user action against the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Edit {
    SetPersonal { field: PersonalField, value: String },
    SetSectionTitle { section: SectionKey, value: String },
    SetSelfEvaluation { value: String },

    AddSocial,
    SetSocial { index: usize, field: SocialField, value: String },
    RemoveSocial { index: usize },

    AddSkillCategory,
    SetSkillCategoryName { id: String, value: String },
    SetSkills { id: String, text: String },
    RemoveSkillCategory { id: String },

    AddExperience,
    SetExperience { id: String, change: ExperienceField },
    RemoveExperience { id: String },
    AddHighlight { experience_id: String },
    SetHighlight { experience_id: String, index: usize, value: String },
    RemoveHighlight { experience_id: String, index: usize },

    AddProject,
    SetProject { id: String, change: ProjectField },
    RemoveProject { id: String },

    AddEducation,
    SetEducation { id: String, field: EducationField, value: String },
    RemoveEducation { id: String },
}

impl Edit {
    /// Short name used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Edit::SetPersonal { .. } => "setPersonal",
            Edit::SetSectionTitle { .. } => "setSectionTitle",
            Edit::SetSelfEvaluation { .. } => "setSelfEvaluation",
            Edit::AddSocial => "addSocial",
            Edit::SetSocial { .. } => "setSocial",
            Edit::RemoveSocial { .. } => "removeSocial",
            Edit::AddSkillCategory => "addSkillCategory",
            Edit::SetSkillCategoryName { .. } => "setSkillCategoryName",
            Edit::SetSkills { .. } => "setSkills",
            Edit::RemoveSkillCategory { .. } => "removeSkillCategory",
            Edit::AddExperience => "addExperience",
            Edit::SetExperience { .. } => "setExperience",
            Edit::RemoveExperience { .. } => "removeExperience",
            Edit::AddHighlight { .. } => "addHighlight",
            Edit::SetHighlight { .. } => "setHighlight",
            Edit::RemoveHighlight { .. } => "removeHighlight",
            Edit::AddProject => "addProject",
            Edit::SetProject { .. } => "setProject",
            Edit::RemoveProject { .. } => "removeProject",
            Edit::AddEducation => "addEducation",
            Edit::SetEducation { .. } => "setEducation",
            Edit::RemoveEducation { .. } => "removeEducation",
        }
    }
}

// ===== Placeholder Entries =====

fn new_experience(id: String) -> Experience {
    Experience {
        id,
        company: "新公司名称".to_string(),
        position: "职位名称".to_string(),
        start_date: "2023.01".to_string(),
        end_date: PRESENT_LABEL.to_string(),
        current: true,
        highlights: vec!["负责核心业务模块的开发与维护。".to_string()],
    }
}

fn new_project(id: String) -> Project {
    Project {
        id,
        name: "新项目名称".to_string(),
        description: "项目简述...".to_string(),
        technologies: vec!["React".to_string(), "TypeScript".to_string()],
        ..Default::default()
    }
}

fn new_education(id: String) -> Education {
    Education {
        id,
        school: "学校名称".to_string(),
        degree: "本科".to_string(),
        field: "专业名称".to_string(),
        start_date: "2015.09".to_string(),
        end_date: "2019.06".to_string(),
    }
}

fn new_skill_category(id: String) -> SkillCategory {
    SkillCategory {
        id,
        name: "新技能分类".to_string(),
        skills: Vec::new(),
    }
}

// ===== List Helpers =====

trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(Experience, Project, Education, SkillCategory);

fn update_by_id<T: Identified>(list: &mut [T], id: &str, update: impl FnOnce(&mut T)) {
    match list.iter_mut().find(|item| item.id() == id) {
        Some(item) => update(item),
        None => debug!("No entry with id {}, edit ignored", id),
    }
}

fn remove_by_id<T: Identified>(list: &mut Vec<T>, id: &str) {
    list.retain(|item| item.id() != id);
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// ===== Apply =====

/// Returns a new document with exactly the targeted path replaced.
/// Unknown ids and out-of-range indexes leave the document unchanged.
pub fn apply(doc: &ResumeDocument, edit: Edit, ids: &mut IdMinter) -> ResumeDocument {
    let mut next = doc.clone();
    debug!("Applying edit: {}", edit.label());

    match edit {
        Edit::SetPersonal { field, value } => {
            let info = &mut next.personal_info;
            let slot = match field {
                PersonalField::FullName => &mut info.full_name,
                PersonalField::Title => &mut info.title,
                PersonalField::Email => &mut info.email,
                PersonalField::Phone => &mut info.phone,
                PersonalField::Location => &mut info.location,
                PersonalField::BirthDate => &mut info.birth_date,
                PersonalField::YearsOfExperience => &mut info.years_of_experience,
                PersonalField::Degree => &mut info.degree,
                PersonalField::Github => &mut info.github,
                PersonalField::Summary => &mut info.summary,
            };
            *slot = value;
        }
        Edit::SetSectionTitle { section, value } => {
            *next.section_titles.slot_mut(section) = value;
        }
        Edit::SetSelfEvaluation { value } => next.self_evaluation = value,

        Edit::AddSocial => next.personal_info.socials.push(SocialLink::default()),
        Edit::SetSocial {
            index,
            field,
            value,
        } => {
            if let Some(link) = next.personal_info.socials.get_mut(index) {
                match field {
                    SocialField::Platform => link.platform = value,
                    SocialField::Url => link.url = value,
                }
            }
        }
        Edit::RemoveSocial { index } => {
            if index < next.personal_info.socials.len() {
                next.personal_info.socials.remove(index);
            }
        }

        Edit::AddSkillCategory => next.skills.push(new_skill_category(ids.mint())),
        Edit::SetSkillCategoryName { id, value } => {
            update_by_id(&mut next.skills, &id, |category| category.name = value)
        }
        Edit::SetSkills { id, text } => {
            update_by_id(&mut next.skills, &id, |category| {
                category.skills = split_delimited(&text)
            })
        }
        Edit::RemoveSkillCategory { id } => remove_by_id(&mut next.skills, &id),

        Edit::AddExperience => next.experience.insert(0, new_experience(ids.mint())),
        Edit::SetExperience { id, change } => {
            update_by_id(&mut next.experience, &id, |exp| match change {
                ExperienceField::Company(value) => exp.company = value,
                ExperienceField::Position(value) => exp.position = value,
                ExperienceField::StartDate(value) => exp.start_date = value,
                ExperienceField::EndDate(value) => {
                    if exp.current {
                        debug!("End date of current experience {} is locked", exp.id);
                    } else {
                        exp.end_date = value;
                    }
                }
                ExperienceField::Current(value) => exp.current = value,
            })
        }
        Edit::RemoveExperience { id } => remove_by_id(&mut next.experience, &id),
        Edit::AddHighlight { experience_id } => {
            update_by_id(&mut next.experience, &experience_id, |exp| {
                exp.highlights.push(String::new())
            })
        }
        Edit::SetHighlight {
            experience_id,
            index,
            value,
        } => update_by_id(&mut next.experience, &experience_id, |exp| {
            if let Some(highlight) = exp.highlights.get_mut(index) {
                *highlight = value;
            }
        }),
        Edit::RemoveHighlight {
            experience_id,
            index,
        } => update_by_id(&mut next.experience, &experience_id, |exp| {
            if index < exp.highlights.len() {
                exp.highlights.remove(index);
            }
        }),

        Edit::AddProject => next.projects.insert(0, new_project(ids.mint())),
        Edit::SetProject { id, change } => {
            update_by_id(&mut next.projects, &id, |project| match change {
                ProjectField::Name(value) => project.name = value,
                ProjectField::Description(value) => project.description = value,
                ProjectField::Technologies(text) => project.technologies = split_delimited(&text),
                ProjectField::Link(value) => project.link = optional(value),
                ProjectField::Github(value) => project.github = optional(value),
                ProjectField::Company(value) => project.company = optional(value),
                ProjectField::TeamSize(value) => project.team_size = optional(value),
                ProjectField::Content(value) => project.content = optional(value),
                ProjectField::Difficulties(value) => project.difficulties = optional(value),
                ProjectField::Achievements(value) => project.achievements = optional(value),
            })
        }
        Edit::RemoveProject { id } => remove_by_id(&mut next.projects, &id),

        Edit::AddEducation => next.education.push(new_education(ids.mint())),
        Edit::SetEducation { id, field, value } => {
            update_by_id(&mut next.education, &id, |edu| {
                let slot = match field {
                    EducationField::School => &mut edu.school,
                    EducationField::Degree => &mut edu.degree,
                    EducationField::Field => &mut edu.field,
                    EducationField::StartDate => &mut edu.start_date,
                    EducationField::EndDate => &mut edu.end_date,
                };
                *slot = value;
            })
        }
        Edit::RemoveEducation { id } => remove_by_id(&mut next.education, &id),
    }

    next
}
