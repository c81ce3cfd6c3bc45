//! 구조화 출력 스키마 생성.
//! 필수 필드 목록은 `FieldRequirements`에서만 가져와 검증기와 어긋나지 않는다.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::options::ApiWorkload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
}

/// 응답 JSON 형태 기술자. Gemini `responseSchema` 형식으로 직렬화된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDescriptor {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<&'static str, SchemaDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaDescriptor>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<&'static str>,
}

impl SchemaDescriptor {
    fn scalar(kind: SchemaType) -> Self {
        Self {
            kind,
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
        }
    }

    fn string() -> Self {
        Self::scalar(SchemaType::String)
    }

    fn integer() -> Self {
        Self::scalar(SchemaType::Integer)
    }

    fn array_of(items: SchemaDescriptor) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::scalar(SchemaType::Array)
        }
    }

    fn object(
        properties: impl IntoIterator<Item = (&'static str, SchemaDescriptor)>,
        required: Vec<&'static str>,
    ) -> Self {
        Self {
            properties: properties.into_iter().collect(),
            required,
            ..Self::scalar(SchemaType::Object)
        }
    }
}

/// 워크로드별 응답 스키마를 만든다.
pub fn build_response_schema(workload: ApiWorkload) -> SchemaDescriptor {
    let requirements = workload.requirements();

    let mut properties = vec![
        ("match_percentage", SchemaDescriptor::integer()),
        (
            "matching_highlights",
            SchemaDescriptor::array_of(SchemaDescriptor::string()),
        ),
        (
            "missing_skills",
            SchemaDescriptor::array_of(SchemaDescriptor::string()),
        ),
        ("tailored_cv", SchemaDescriptor::string()),
    ];

    if requirements.cover_letter {
        properties.push(("cover_letter", SchemaDescriptor::string()));
    }
    if requirements.interview_qna {
        properties.push((
            "interview_qna",
            SchemaDescriptor::array_of(SchemaDescriptor::object(
                [
                    ("question", SchemaDescriptor::string()),
                    ("answer", SchemaDescriptor::string()),
                ],
                vec!["question", "answer"],
            )),
        ));
    }
    if requirements.industry_updates {
        properties.push((
            "industry_updates",
            SchemaDescriptor::array_of(SchemaDescriptor::object(
                [
                    ("update", SchemaDescriptor::string()),
                    ("source", SchemaDescriptor::string()),
                ],
                vec!["update"],
            )),
        ));
    }

    SchemaDescriptor::object(properties, requirements.required_fields())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn properties_cover_exactly_the_required_fields() {
        for workload in ApiWorkload::ALL {
            let schema = build_response_schema(workload);
            let mut names: Vec<_> = schema.properties.keys().copied().collect();
            let mut required = schema.required.clone();
            names.sort_unstable();
            required.sort_unstable();
            assert_eq!(names, required, "{workload}");
        }
    }

    #[test]
    fn minimal_schema_serializes_to_gemini_shape() {
        let value = serde_json::to_value(build_response_schema(ApiWorkload::Minimal)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "OBJECT",
                "properties": {
                    "match_percentage": { "type": "INTEGER" },
                    "matching_highlights": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "missing_skills": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "tailored_cv": { "type": "STRING" }
                },
                "required": ["match_percentage", "matching_highlights", "missing_skills", "tailored_cv"]
            })
        );
    }

    #[test]
    fn industry_update_source_stays_optional() {
        let schema = build_response_schema(ApiWorkload::Normal);
        let updates = &schema.properties["industry_updates"];
        let item = updates.items.as_deref().unwrap();
        assert_eq!(item.required, vec!["update"]);
        assert!(item.properties.contains_key("source"));
    }
}
