//! 생성 결과를 콘솔/문서용 Markdown으로 렌더링하는 모듈.

use std::fmt::Write as _;

use crate::domain::generation::AiResponse;
use crate::domain::options::{ApiWorkload, ProviderKind};

/// 응답 섹션을 화면 탭 순서(매치 → CV → 커버레터 → Q&A → 업계 동향)대로 이어 붙인다.
/// 워크로드에서 제외된 섹션은 출력하지 않는다.
pub fn render_response_markdown(
    response: &AiResponse,
    provider: ProviderKind,
    workload: ApiWorkload,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# CV Spruce Result\n");
    let _ = writeln!(out, "- {}", provider.full_label());
    let _ = writeln!(out, "- Workload: {}\n", workload.label());

    let _ = writeln!(out, "## Match: {}%\n", response.match_percentage);
    push_bullets(&mut out, "Matching Highlights", &response.matching_highlights);
    push_bullets(&mut out, "Missing Skills", &response.missing_skills);

    let _ = writeln!(out, "## Tailored CV\n");
    let _ = writeln!(out, "{}\n", response.tailored_cv.trim());

    if let Some(letter) = &response.cover_letter {
        let _ = writeln!(out, "## Cover Letter\n");
        let _ = writeln!(out, "{}\n", letter.trim());
    }

    if let Some(qna) = &response.interview_qna {
        let _ = writeln!(out, "## Interview Q&A\n");
        for (index, item) in qna.iter().enumerate() {
            let _ = writeln!(out, "### {}. {}\n", index + 1, item.question.trim());
            let _ = writeln!(out, "{}\n", item.answer.trim());
        }
    }

    if let Some(updates) = &response.industry_updates {
        let _ = writeln!(out, "## Industry Updates\n");
        for update in updates {
            match update.source.as_deref().filter(|s| !s.trim().is_empty()) {
                Some(source) => {
                    let _ = writeln!(out, "- {} ({})", update.update.trim(), source.trim());
                }
                None => {
                    let _ = writeln!(out, "- {}", update.update.trim());
                }
            }
        }
        out.push('\n');
    }

    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

fn push_bullets(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "### {title}\n");
    if items.is_empty() {
        let _ = writeln!(out, "- None\n");
        return;
    }
    for item in items {
        let _ = writeln!(out, "- {}", item.trim());
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::{IndustryUpdate, InterviewQna};

    fn minimal() -> AiResponse {
        AiResponse {
            match_percentage: 72,
            matching_highlights: vec!["Rust".to_string()],
            missing_skills: Vec::new(),
            tailored_cv: "Jane Doe\n".to_string(),
            cover_letter: None,
            interview_qna: None,
            industry_updates: None,
        }
    }

    #[test]
    fn minimal_response_renders_only_base_sections() {
        let out = render_response_markdown(&minimal(), ProviderKind::Gemini, ApiWorkload::Minimal);

        assert!(out.contains("## Match: 72%"));
        assert!(out.contains("### Missing Skills\n\n- None"));
        assert!(out.contains("## Tailored CV\n\nJane Doe"));
        assert!(!out.contains("Cover Letter"));
        assert!(!out.contains("Interview Q&A"));
        assert!(out.ends_with("Jane Doe\n"));
    }

    #[test]
    fn full_response_numbers_questions_and_cites_sources() {
        let response = AiResponse {
            cover_letter: Some("Dear team".to_string()),
            interview_qna: Some(vec![InterviewQna {
                question: "Why Rust?".to_string(),
                answer: "Safety.".to_string(),
            }]),
            industry_updates: Some(vec![
                IndustryUpdate {
                    update: "Edition 2024 shipped".to_string(),
                    source: Some("blog.rust-lang.org".to_string()),
                },
                IndustryUpdate {
                    update: "Async closures".to_string(),
                    source: None,
                },
            ]),
            ..minimal()
        };

        let out = render_response_markdown(&response, ProviderKind::OpenAi, ApiWorkload::Normal);

        assert!(out.contains("## Cover Letter\n\nDear team"));
        assert!(out.contains("### 1. Why Rust?\n\nSafety."));
        assert!(out.contains("- Edition 2024 shipped (blog.rust-lang.org)"));
        assert!(out.contains("- Async closures\n"));
    }
}
