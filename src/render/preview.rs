// src/render/preview.rs
//! Print-ready HTML rendering of the document, also the input of the PDF exporter

use crate::pagination::PreviewLayout;
use crate::render::{escape_html, strip_scheme};
use crate::types::{present, Experience, Project, ResumeDocument, SectionKey};

/// Id of the container element handed to the PDF converter
pub const PREVIEW_ELEMENT_ID: &str = "resume-preview";

const PREVIEW_STYLES: &str = r#"
body { margin: 0; background: #f3f4f6; }
.preview-frame { position: relative; width: 210mm; margin: 0 auto; transform-origin: top; }
.page-guides { position: absolute; inset: 0; pointer-events: none; z-index: 0; }
#resume-preview { position: relative; z-index: 1; background: #fff; font-family: "Microsoft YaHei", "Inter", sans-serif; color: #1e293b; }
.content { padding: 40px; line-height: 1.625; }
header { display: flex; justify-content: space-between; align-items: flex-start; border-bottom: 1px solid #cbd5e1; padding-bottom: 24px; margin-bottom: 8px; }
header h1 { font-size: 36px; font-weight: 800; margin: 0 0 8px; color: #0f172a; }
.job-title { font-size: 20px; color: #1e40af; margin: 0 0 12px; }
.facts { display: flex; flex-wrap: wrap; gap: 16px; font-size: 14px; color: #475569; }
.contacts { font-size: 14px; min-width: 200px; display: flex; flex-direction: column; gap: 8px; }
.contacts a { color: inherit; text-decoration: none; }
h2 { font-size: 18px; font-weight: 700; border-bottom: 2px solid #1e293b; margin: 20px 0 12px; padding-bottom: 4px; }
h3 { font-size: 16px; font-weight: 700; margin: 0; }
.row { display: flex; justify-content: space-between; align-items: baseline; }
.muted { font-size: 14px; color: #64748b; }
.skill { display: flex; font-size: 14px; margin-bottom: 10px; }
.skill-name { width: 96px; font-weight: 700; flex-shrink: 0; }
.skill-list { flex: 1; border-left: 1px solid #e2e8f0; padding-left: 12px; color: #334155; }
.entry { margin-bottom: 24px; }
.position { font-size: 14px; font-weight: 700; color: #334155; margin-bottom: 8px; }
ul { margin: 0; padding-left: 16px; }
li { font-size: 14px; color: #334155; margin-bottom: 4px; }
.details { background: #f8fafc; border: 1px solid #f1f5f9; padding: 12px; font-size: 14px; }
.details div { margin-bottom: 8px; }
.details b { color: #334155; }
.prose { font-size: 14px; line-height: 1.75; text-align: justify; white-space: pre-wrap; }
.break-inside-avoid { break-inside: avoid; page-break-inside: avoid; }
"#;

/// Full standalone page: stylesheet, scaled frame, page guides and the container
pub fn render_page(doc: &ResumeDocument, layout: PreviewLayout) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} 简历</title>\n",
        escape_html(&doc.personal_info.full_name)
    ));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", PREVIEW_STYLES));
    html.push_str(&format!(
        "<div class=\"preview-frame\" style=\"transform: scale({}); margin-bottom: {}mm;\">\n",
        layout.scale,
        layout.margin_bottom_mm()
    ));
    html.push_str(&format!(
        "<div class=\"page-guides\" style=\"{}\"></div>\n",
        layout.guideline_css()
    ));
    html.push_str(&render_container(doc, layout.pages));
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Print page for the PDF converter: stylesheet plus the container only
pub fn render_print_page(doc: &ResumeDocument) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n<meta charset=\"utf-8\">\n<style>{}\nbody {{ background: #fff; }}\n#{} {{ width: 210mm; }}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        PREVIEW_STYLES,
        PREVIEW_ELEMENT_ID,
        render_container(doc, 1)
    )
}

/// The designated container element holding the rendered document
pub fn render_container(doc: &ResumeDocument, pages: u32) -> String {
    let min_height = PreviewLayout::new(pages, 1.0).min_height_mm();
    let mut html = format!(
        "<div id=\"{}\" style=\"min-height: {}mm;\">\n<div class=\"content\">\n",
        PREVIEW_ELEMENT_ID, min_height
    );

    html.push_str(&render_header(doc));

    let titles = &doc.section_titles;
    for key in SectionKey::ALL {
        let title = escape_html(titles.get(key));
        let section = match key {
            SectionKey::Summary if !doc.personal_info.summary.is_empty() => Some(format!(
                "<section class=\"break-inside-avoid\">\n<h2>{}</h2>\n<p class=\"prose\">{}</p>\n</section>\n",
                title,
                escape_html(&doc.personal_info.summary)
            )),
            SectionKey::Skills if !doc.skills.is_empty() => {
                let mut body = format!("<section class=\"break-inside-avoid\">\n<h2>{}</h2>\n", title);
                for category in &doc.skills {
                    body.push_str(&format!(
                        "<div class=\"skill\"><div class=\"skill-name\">{}</div><div class=\"skill-list\">{}</div></div>\n",
                        escape_html(&category.name),
                        escape_html(&category.skills.join("、"))
                    ));
                }
                body.push_str("</section>\n");
                Some(body)
            }
            SectionKey::Experience if !doc.experience.is_empty() => {
                let mut body = format!("<section>\n<h2>{}</h2>\n", title);
                for exp in &doc.experience {
                    body.push_str(&render_experience(exp));
                }
                body.push_str("</section>\n");
                Some(body)
            }
            SectionKey::Projects if !doc.projects.is_empty() => {
                let mut body = format!("<section>\n<h2>{}</h2>\n", title);
                for project in &doc.projects {
                    body.push_str(&render_project(project));
                }
                body.push_str("</section>\n");
                Some(body)
            }
            SectionKey::Education if !doc.education.is_empty() => {
                let mut body = format!("<section class=\"break-inside-avoid\">\n<h2>{}</h2>\n", title);
                for edu in &doc.education {
                    body.push_str(&format!(
                        "<div class=\"row break-inside-avoid\"><div><h3>{}</h3> <span class=\"muted\">{}</span> <span class=\"muted\">{}</span></div><span class=\"muted\">{} - {}</span></div>\n",
                        escape_html(&edu.school),
                        escape_html(&edu.field),
                        escape_html(&edu.degree),
                        escape_html(&edu.start_date),
                        escape_html(&edu.end_date)
                    ));
                }
                body.push_str("</section>\n");
                Some(body)
            }
            SectionKey::SelfEvaluation if !doc.self_evaluation.is_empty() => Some(format!(
                "<section class=\"break-inside-avoid\">\n<h2>{}</h2>\n<p class=\"prose\">{}</p>\n</section>\n",
                title,
                escape_html(&doc.self_evaluation)
            )),
            _ => None,
        };

        if let Some(section) = section {
            html.push_str(&section);
        }
    }

    html.push_str("</div>\n</div>\n");
    html
}

fn render_header(doc: &ResumeDocument) -> String {
    let info = &doc.personal_info;
    let mut html = String::from("<header>\n<div>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&info.full_name)));
    html.push_str(&format!(
        "<p class=\"job-title\">{}</p>\n",
        escape_html(&info.title)
    ));

    let mut facts = Vec::new();
    if !info.years_of_experience.is_empty() {
        facts.push(format!("{}经验", escape_html(&info.years_of_experience)));
    }
    for value in [&info.degree, &info.birth_date, &info.location] {
        if !value.is_empty() {
            facts.push(escape_html(value));
        }
    }
    html.push_str("<div class=\"facts\">");
    for fact in facts {
        html.push_str(&format!("<span>{}</span>", fact));
    }
    html.push_str("</div>\n</div>\n<div class=\"contacts\">\n");

    if !info.phone.is_empty() {
        html.push_str(&format!("<div>{}</div>\n", escape_html(&info.phone)));
    }
    if !info.email.is_empty() {
        html.push_str(&format!("<div>{}</div>\n", escape_html(&info.email)));
    }
    if !info.github.is_empty() {
        let bare = escape_html(strip_scheme(&info.github));
        html.push_str(&format!(
            "<div><a href=\"https://{}\">{}</a></div>\n",
            bare, bare
        ));
    }
    for social in &info.socials {
        html.push_str(&format!(
            "<div><a href=\"{}\">{}</a></div>\n",
            escape_html(&social.url),
            escape_html(strip_scheme(&social.url))
        ));
    }

    html.push_str("</div>\n</header>\n");
    html
}

fn render_experience(exp: &Experience) -> String {
    let mut html = String::from("<div class=\"entry break-inside-avoid\">\n");
    html.push_str(&format!(
        "<div class=\"row\"><h3>{}</h3><span class=\"muted\">{} – {}</span></div>\n",
        escape_html(&exp.company),
        escape_html(&exp.start_date),
        escape_html(exp.end_label())
    ));
    html.push_str(&format!(
        "<div class=\"position\">{}</div>\n<ul>\n",
        escape_html(&exp.position)
    ));
    for highlight in &exp.highlights {
        html.push_str(&format!("<li>{}</li>\n", escape_html(highlight)));
    }
    html.push_str("</ul>\n</div>\n");
    html
}

fn render_project(project: &Project) -> String {
    let mut html = String::from("<div class=\"entry break-inside-avoid\">\n<div class=\"row\"><div>");
    html.push_str(&format!("<h3>{}</h3>", escape_html(&project.name)));
    if let Some(company) = present(&project.company) {
        html.push_str(&format!(" <span class=\"muted\">@{}</span>", escape_html(company)));
    }
    html.push_str("</div>");
    if let Some(link) = present(&project.link) {
        html.push_str(&format!("<span class=\"muted\">{}</span>", escape_html(link)));
    }
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<div class=\"prose\">{}</div>\n<div class=\"details\">\n",
        escape_html(&project.description)
    ));

    if !project.technologies.is_empty() {
        html.push_str(&format!(
            "<div><b>技术栈:</b> {}</div>\n",
            escape_html(&project.technologies.join(", "))
        ));
    }
    let details = [
        ("团队规模", &project.team_size),
        ("负责内容", &project.content),
        ("项目难点", &project.difficulties),
        ("工作成果", &project.achievements),
    ];
    for (label, value) in details {
        if let Some(value) = present(value) {
            html.push_str(&format!("<div><b>{}:</b> {}</div>\n", label, escape_html(value)));
        }
    }

    html.push_str("</div>\n</div>\n");
    html
}
