// src/export/word.rs
//! Word-compatible HTML built by textual substitution on the Markdown export.
//! Best effort: literal `*` or `#` in user text can be misread as markup.

use regex::Regex;
use std::sync::OnceLock;

use crate::export::markdown::generate_markdown;
use crate::types::ResumeDocument;

struct Rules {
    h1: Regex,
    h2: Regex,
    h3: Regex,
    bold: Regex,
    italic: Regex,
    bullet: Regex,
}

fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| Rules {
        h1: Regex::new(r"(?m)^# (.*)$").expect("valid h1 pattern"),
        h2: Regex::new(r"(?m)^## (.*)$").expect("valid h2 pattern"),
        h3: Regex::new(r"(?m)^### (.*)$").expect("valid h3 pattern"),
        bold: Regex::new(r"\*\*(.+?)\*\*").expect("valid bold pattern"),
        italic: Regex::new(r"\*([^*\n]+?)\*").expect("valid italic pattern"),
        bullet: Regex::new(r"(?m)^- (.*)$").expect("valid bullet pattern"),
    })
}

/// Convert Markdown produced by `generate_markdown` into inline-styled HTML
pub fn markdown_to_word_body(md: &str) -> String {
    let rules = rules();

    let content = rules.h1.replace_all(
        md,
        r#"<h1 style="font-size: 24pt; color: #333; text-align: center; margin-bottom: 10px;">$1</h1>"#,
    );
    let content = rules.h2.replace_all(
        &content,
        r#"<h2 style="font-size: 14pt; color: #2563eb; margin-top: 20px; border-bottom: 1px solid #ccc; padding-bottom: 4px;">$1</h2>"#,
    );
    let content = rules.h3.replace_all(
        &content,
        r#"<h3 style="font-size: 11pt; font-weight: bold; margin-top: 15px; color: #333; background-color: #f8f9fa; padding: 4px;">$1</h3>"#,
    );
    let content = rules.bold.replace_all(&content, "<b>$1</b>");
    let content = rules.italic.replace_all(&content, "<i>$1</i>");
    let content = rules.bullet.replace_all(
        &content,
        r#"<li style="margin-bottom: 4px; margin-left: 20px;">$1</li>"#,
    );

    content.replace('\n', "<br />")
}

pub fn generate_word_html(doc: &ResumeDocument) -> String {
    let body = markdown_to_word_body(&generate_markdown(doc));

    format!(
        r#"<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>
<head>
    <meta charset='utf-8'>
    <title>{} 简历</title>
    <style>
        @page {{
            size: 21.0cm 29.7cm;
            margin: 2.0cm 2.0cm 2.0cm 2.0cm;
            mso-page-orientation: portrait;
        }}
        body {{
            font-family: 'Microsoft YaHei', Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            background-color: #fff;
        }}
        div, table {{
            max-width: 100%;
        }}
    </style>
</head>
<body>
    {}
</body>
</html>
"#,
        doc.personal_info.full_name, body
    )
}
