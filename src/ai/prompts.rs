// src/ai/prompts.rs
//! Prompt text and the document flatteners feeding it

use crate::types::ResumeDocument;

pub fn summary_prompt(current: &str, job_title: &str, skills: &[String]) -> String {
    format!(
        r#"你是一位精通前端技术招聘的资深面试官。
请重写以下个人总结，使其更具影响力、简洁（不超过4句话），并针对{}职位包含高价值关键词。

重要：必须使用中文输出。

当前总结: "{}"
核心技能: {}

仅返回重写后的总结文本，不要包含引号或其他说明。"#,
        job_title,
        current,
        skills.join(", ")
    )
}

pub fn bullet_prompt(bullet: &str) -> String {
    format!(
        r#"作为前端技术专家，请优化以下简历工作经历的描述。
要求：使用强有力的动词，尽可能量化成果（如提升了xx%性能），体现专业性。

重要：必须使用中文输出。

原始描述: "{}"

仅返回优化后的描述文本，不要包含引号。"#,
        bullet
    )
}

pub fn critique_prompt(doc: &ResumeDocument) -> String {
    format!(
        r#"你是一位资深的招聘顾问，熟悉简历筛选系统（ATS）的关键词匹配规则。
请针对{}职位评估以下简历内容，给出 0-100 的整数评分，列出缺失的关键技能或关键词，并给出具体的改进建议。

重要：必须使用中文输出。

技能: {}

工作经历:
{}

个人总结: {}

请以 JSON 返回，包含 score、missingKeywords 与 suggestions 三个字段。"#,
        doc.personal_info.title,
        flatten_skills(doc),
        flatten_experience(doc),
        doc.personal_info.summary
    )
}

/// All skills across categories as one comma-joined line
pub fn flatten_skills(doc: &ResumeDocument) -> String {
    doc.all_skills().join(", ")
}

/// One line per experience: `position at company: h1. h2.`
pub fn flatten_experience(doc: &ResumeDocument) -> String {
    doc.experience
        .iter()
        .map(|exp| {
            let highlights = exp
                .highlights
                .iter()
                .map(|h| format!("{}.", h.trim().trim_end_matches(['.', '。'])))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{} at {}: {}", exp.position, exp.company, highlights)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
