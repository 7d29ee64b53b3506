// src/types/resume.rs
//! Résumé document structures shared by the editor, the renderers and the store

use serde::{Deserialize, Serialize};

/// Shown instead of the stored end date when an experience is current
pub const PRESENT_LABEL: &str = "至今";

// ===== Root Aggregate =====

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub section_titles: SectionTitles,
    pub personal_info: PersonalInfo,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    /// Empty means the section is absent
    pub self_evaluation: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub birth_date: String,
    pub years_of_experience: String,
    pub degree: String,
    pub github: String,
    pub summary: String,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub id: String,
    pub name: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub highlights: Vec<String>,
}

impl Experience {
    /// End of the date range as every renderer must display it
    pub fn end_label(&self) -> &str {
        if self.current {
            PRESENT_LABEL
        } else {
            &self.end_date
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    /// Responsibilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Challenges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulties: Option<String>,
    /// Outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,
}

/// Treats `Some("")` the same as `None`
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
}

// ===== Section Titles =====

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionTitles {
    pub summary: String,
    pub skills: String,
    pub experience: String,
    pub projects: String,
    pub education: String,
    pub self_evaluation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    SelfEvaluation,
}

impl SectionKey {
    /// Display order of the sections
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Summary,
        SectionKey::Skills,
        SectionKey::Experience,
        SectionKey::Projects,
        SectionKey::Education,
        SectionKey::SelfEvaluation,
    ];
}

impl SectionTitles {
    pub fn get(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::Summary => &self.summary,
            SectionKey::Skills => &self.skills,
            SectionKey::Experience => &self.experience,
            SectionKey::Projects => &self.projects,
            SectionKey::Education => &self.education,
            SectionKey::SelfEvaluation => &self.self_evaluation,
        }
    }

    pub fn slot_mut(&mut self, key: SectionKey) -> &mut String {
        match key {
            SectionKey::Summary => &mut self.summary,
            SectionKey::Skills => &mut self.skills,
            SectionKey::Experience => &mut self.experience,
            SectionKey::Projects => &mut self.projects,
            SectionKey::Education => &mut self.education,
            SectionKey::SelfEvaluation => &mut self.self_evaluation,
        }
    }
}

// ===== Document Helpers =====

impl ResumeDocument {
    /// Every skill name across categories, in display order
    pub fn all_skills(&self) -> Vec<String> {
        self.skills
            .iter()
            .flat_map(|category| category.skills.iter().cloned())
            .collect()
    }

    pub fn experience_by_id(&self, id: &str) -> Option<&Experience> {
        self.experience.iter().find(|e| e.id == id)
    }

    /// Demo résumé used when nothing has been saved yet
    pub fn seed() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            section_titles: SectionTitles {
                summary: "个人总结".to_string(),
                skills: "专业技能".to_string(),
                experience: "工作经历".to_string(),
                projects: "项目经历".to_string(),
                education: "教育背景".to_string(),
                self_evaluation: "个人评价".to_string(),
            },
            personal_info: PersonalInfo {
                full_name: "张伟".to_string(),
                title: "高级前端工程师".to_string(),
                email: "zhang.wei@example.com".to_string(),
                phone: "138 0013 8000".to_string(),
                location: "北京".to_string(),
                birth_date: "1995.08".to_string(),
                years_of_experience: "5年".to_string(),
                degree: "本科".to_string(),
                github: "github.com/zhangwei-dev".to_string(),
                summary: "拥有 5 年以上前端开发经验，精通 React 和 Vue 生态系统。擅长构建高性能、可扩展的 Web 应用程序。在微前端架构落地和组件库建设方面有丰富经验。热衷于新技术探索和工程化实践，具备良好的团队领导能力。".to_string(),
                socials: vec![SocialLink {
                    platform: "技术博客".to_string(),
                    url: "https://juejin.cn/user/zhangwei".to_string(),
                }],
            },
            skills: vec![
                SkillCategory {
                    id: "1".to_string(),
                    name: "核心技术".to_string(),
                    skills: strings(&["HTML5", "CSS3", "JavaScript (ES6+)", "TypeScript"]),
                },
                SkillCategory {
                    id: "2".to_string(),
                    name: "前端框架".to_string(),
                    skills: strings(&["React", "Vue.js", "Next.js", "Tailwind CSS", "Element Plus"]),
                },
                SkillCategory {
                    id: "3".to_string(),
                    name: "工程化 & 工具".to_string(),
                    skills: strings(&["Webpack", "Vite", "Git", "Docker", "CI/CD", "Jest"]),
                },
            ],
            experience: vec![
                Experience {
                    id: "1".to_string(),
                    company: "光速科技技术有限公司".to_string(),
                    position: "高级前端工程师".to_string(),
                    start_date: "2021-03".to_string(),
                    end_date: PRESENT_LABEL.to_string(),
                    current: true,
                    highlights: strings(&[
                        "主导公司核心 SaaS 平台的重构工作，利用 Webpack 模块联邦技术落地微前端架构，将大型单体应用拆分为 5 个子应用，提升了 40% 的构建速度。",
                        "设计并开发企业级通用 UI 组件库，覆盖 50+ 常用组件，被内部 10+ 个项目采用，显著提升了研发效率和 UI 一致性。",
                        "负责前端性能优化专项，通过代码分割、资源预加载和长列表优化，将核心页面 LCP 从 2.5s 优化至 1.2s。",
                    ]),
                },
                Experience {
                    id: "2".to_string(),
                    company: "创意互动网络".to_string(),
                    position: "前端开发工程师".to_string(),
                    start_date: "2018-06".to_string(),
                    end_date: "2021-02".to_string(),
                    current: false,
                    highlights: strings(&[
                        "负责多个高流量营销活动页面的开发，使用 Vue.js 和 GSAP 实现复杂的动画交互效果，兼容主流移动端设备。",
                        "配合后端工程师完成 API 接口联调，并使用 TypeScript 重构核心业务逻辑，减少了 30% 的线上运行时错误。",
                        "参与前端规范制定和代码走查，指导初级工程师解决技术难题。",
                    ]),
                },
            ],
            projects: vec![Project {
                id: "1".to_string(),
                name: "电商数据可视化大屏".to_string(),
                description: "为电商大促活动开发的实时数据监控大屏，支持千万级数据量的实时渲染和交互。".to_string(),
                technologies: strings(&["Vue 3", "ECharts", "WebSocket", "Node.js"]),
                link: Some("https://demo-datav.com".to_string()),
                github: Some("https://github.com/zhangwei/datav".to_string()),
                company: Some("光速科技".to_string()),
                team_size: Some("5人".to_string()),
                content: Some("负责大屏核心渲染引擎的开发，设计组件通信机制。".to_string()),
                difficulties: Some("在大数据量下 ECharts 渲染卡顿，内存泄漏问题严重。".to_string()),
                achievements: Some("通过 Canvas 层级优化和数据采样算法，将渲染帧率稳定在 60fps，内存占用降低 40%。".to_string()),
            }],
            education: vec![Education {
                id: "1".to_string(),
                school: "北京理工大学".to_string(),
                degree: "学士".to_string(),
                field: "计算机科学与技术".to_string(),
                start_date: "2014.09".to_string(),
                end_date: "2018.06".to_string(),
            }],
            self_evaluation: "性格开朗，善于沟通，具有良好的团队合作精神。热爱技术，对新事物保持好奇心，有较强的自驱力和学习能力。".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_document_saved_by_web_app() {
        let json = r#"{
            "sectionTitles": {"summary": "总结", "skills": "技能", "experience": "经历",
                              "projects": "项目", "education": "教育", "selfEvaluation": "评价"},
            "personalInfo": {"fullName": "李雷", "email": "", "phone": "", "location": "",
                             "title": "工程师", "birthDate": "", "yearsOfExperience": "3年",
                             "degree": "", "github": "", "summary": "", "socials": []},
            "skills": [],
            "experience": [{"id": "9", "company": "A", "position": "B", "startDate": "2020",
                            "endDate": "2021", "current": false, "highlights": ["x"]}],
            "projects": [{"id": "p", "name": "N", "description": "D", "technologies": ["Rust"],
                          "teamSize": "3人"}],
            "education": []
        }"#;

        let doc: ResumeDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.personal_info.full_name, "李雷");
        assert_eq!(doc.personal_info.years_of_experience, "3年");
        assert_eq!(doc.section_titles.self_evaluation, "评价");
        assert_eq!(doc.projects[0].team_size.as_deref(), Some("3人"));
        assert_eq!(doc.projects[0].link, None);
        // missing selfEvaluation key means absent
        assert!(doc.self_evaluation.is_empty());
    }

    #[test]
    fn test_optional_project_fields_are_omitted() {
        let project = Project {
            id: "1".to_string(),
            name: "n".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("teamSize").is_none());
        assert!(value.get("technologies").is_some());
    }

    #[test]
    fn test_current_experience_shows_present_label() {
        let mut exp = Experience {
            end_date: "2099-01".to_string(),
            current: true,
            ..Default::default()
        };
        assert_eq!(exp.end_label(), PRESENT_LABEL);
        exp.current = false;
        assert_eq!(exp.end_label(), "2099-01");
    }

    #[test]
    fn test_section_titles_slots() {
        let mut titles = ResumeDocument::seed().section_titles;
        *titles.slot_mut(SectionKey::Projects) = "Projects".to_string();
        assert_eq!(titles.get(SectionKey::Projects), "Projects");
        assert_eq!(titles.get(SectionKey::Skills), "专业技能");
    }

    #[test]
    fn test_all_skills_flattens_in_order() {
        let skills = ResumeDocument::seed().all_skills();
        assert_eq!(skills.first().map(String::as_str), Some("HTML5"));
        assert_eq!(skills.last().map(String::as_str), Some("Jest"));
        assert_eq!(skills.len(), 15);
    }

    #[test]
    fn test_present_treats_empty_as_absent() {
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some("x".to_string())), Some("x"));
    }
}
