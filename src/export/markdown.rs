// src/export/markdown.rs
//! Markdown export, also the input of the Word exporter

use crate::types::{present, ResumeDocument};

pub fn generate_markdown(doc: &ResumeDocument) -> String {
    let info = &doc.personal_info;
    let titles = &doc.section_titles;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", info.full_name));
    md.push_str(&format!("**{}**\n\n", info.title));

    // Basic info line
    let labeled = |label: &str, value: &str| {
        if value.is_empty() {
            String::new()
        } else {
            format!("{}: {}", label, value)
        }
    };
    let infos: Vec<String> = vec![
        info.phone.clone(),
        info.email.clone(),
        info.location.clone(),
        labeled("出生年月", &info.birth_date),
        labeled("经验", &info.years_of_experience),
        labeled("学历", &info.degree),
        labeled("GitHub", &info.github),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();
    md.push_str(&infos.join(" | "));
    md.push_str("\n\n");

    for social in &info.socials {
        md.push_str(&format!("[{}]({}) ", social.platform, social.url));
    }
    if !info.socials.is_empty() {
        md.push_str("\n\n");
    }

    md.push_str(&format!("## {}\n\n{}\n\n", titles.summary, info.summary));

    md.push_str(&format!("## {}\n\n", titles.skills));
    for category in &doc.skills {
        md.push_str(&format!(
            "- **{}**: {}\n",
            category.name,
            category.skills.join(", ")
        ));
    }
    md.push('\n');

    md.push_str(&format!("## {}\n\n", titles.experience));
    for exp in &doc.experience {
        md.push_str(&format!("### {} | {}\n", exp.company, exp.position));
        md.push_str(&format!("*{} - {}*\n\n", exp.start_date, exp.end_label()));
        for highlight in &exp.highlights {
            md.push_str(&format!("- {}\n", highlight));
        }
        md.push('\n');
    }

    md.push_str(&format!("## {}\n\n", titles.projects));
    for project in &doc.projects {
        match present(&project.company) {
            Some(company) => md.push_str(&format!("### {} @ {}\n", project.name, company)),
            None => md.push_str(&format!("### {}\n", project.name)),
        }
        md.push_str(&format!("*技术栈: {}*\n\n", project.technologies.join(", ")));
        md.push_str(&format!("{}\n\n", project.description));

        let details = [
            ("团队规模", &project.team_size),
            ("负责内容", &project.content),
            ("项目难点", &project.difficulties),
            ("工作成果", &project.achievements),
        ];
        for (label, value) in details {
            if let Some(value) = present(value) {
                md.push_str(&format!("- **{}**: {}\n", label, value));
            }
        }

        md.push('\n');
        if let Some(link) = present(&project.link) {
            md.push_str(&format!("在线演示: {}\n", link));
        }
        if let Some(github) = present(&project.github) {
            md.push_str(&format!("项目源码: {}\n", github));
        }
        md.push('\n');
    }

    md.push_str(&format!("## {}\n\n", titles.education));
    for edu in &doc.education {
        md.push_str(&format!("### {}\n", edu.school));
        md.push_str(&format!(
            "{} | {} | {} - {}\n\n",
            edu.degree, edu.field, edu.start_date, edu.end_date
        ));
    }

    if !doc.self_evaluation.is_empty() {
        md.push_str(&format!(
            "## {}\n\n{}\n\n",
            titles.self_evaluation, doc.self_evaluation
        ));
    }

    md
}
