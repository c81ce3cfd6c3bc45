//! 파싱된 응답 JSON의 형태 검증.
//! 값은 고치거나 기본값으로 채우지 않고, 형태가 맞으면 그대로 타입만 좁힌다.

use serde_json::{Map, Value};

use crate::domain::errors::ValidationError;
use crate::domain::generation::{AiResponse, IndustryUpdate, InterviewQna};
use crate::domain::options::ApiWorkload;

/// 워크로드별 필수 필드를 확인하고 `AiResponse`로 변환한다.
/// 검사 순서: 기본 필드 → 커버레터 → Q&A/업계 동향.
pub fn validate_ai_response(
    parsed: &Value,
    workload: ApiWorkload,
) -> Result<AiResponse, ValidationError> {
    let requirements = workload.requirements();
    let object = parsed
        .as_object()
        .ok_or(ValidationError::MissingRequiredFields)?;

    let base = (
        object.get("match_percentage").and_then(as_percentage),
        object.get("matching_highlights").and_then(as_string_array),
        object.get("missing_skills").and_then(as_string_array),
        object.get("tailored_cv").and_then(as_string),
    );
    let (Some(match_percentage), Some(matching_highlights), Some(missing_skills), Some(tailored_cv)) =
        base
    else {
        return Err(ValidationError::MissingRequiredFields);
    };

    let cover_letter = section(
        object,
        "cover_letter",
        requirements.cover_letter,
        ValidationError::MissingCoverLetter,
        as_string,
    )?;
    let interview_qna = section(
        object,
        "interview_qna",
        requirements.interview_qna,
        ValidationError::MissingQnaOrUpdates,
        as_qna_array,
    )?;
    let industry_updates = section(
        object,
        "industry_updates",
        requirements.industry_updates,
        ValidationError::MissingQnaOrUpdates,
        as_industry_update_array,
    )?;

    Ok(AiResponse {
        match_percentage,
        matching_highlights,
        missing_skills,
        tailored_cv,
        cover_letter,
        interview_qna,
        industry_updates,
    })
}

/// 선택 섹션 판정.
/// 필수인데 없으면 실패, 있는데 형태가 틀리면 필수 여부와 무관하게 실패한다.
fn section<T>(
    object: &Map<String, Value>,
    key: &str,
    required: bool,
    error: ValidationError,
    parse: impl Fn(&Value) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    match object.get(key) {
        None | Some(Value::Null) if required => Err(error),
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse(value).map(Some).ok_or(error),
    }
}

/// 0-100 정수. `85.0`처럼 소수부가 0인 실수도 받는다.
fn as_percentage(value: &Value) -> Option<u8> {
    if let Some(pct) = value.as_u64() {
        return u8::try_from(pct).ok().filter(|pct| *pct <= 100);
    }
    let pct = value.as_f64()?;
    (pct.is_finite() && pct.fract() == 0.0 && (0.0..=100.0).contains(&pct)).then(|| pct as u8)
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn as_string_array(value: &Value) -> Option<Vec<String>> {
    value.as_array()?.iter().map(as_string).collect()
}

fn as_qna_array(value: &Value) -> Option<Vec<InterviewQna>> {
    value
        .as_array()?
        .iter()
        .map(|item| {
            Some(InterviewQna {
                question: item.get("question").and_then(as_string)?,
                answer: item.get("answer").and_then(as_string)?,
            })
        })
        .collect()
}

fn as_industry_update_array(value: &Value) -> Option<Vec<IndustryUpdate>> {
    value
        .as_array()?
        .iter()
        .map(|item| {
            let update = item.get("update").and_then(as_string)?;
            let source = match item.get("source") {
                None | Some(Value::Null) => None,
                Some(source) => Some(as_string(source)?),
            };
            Some(IndustryUpdate { update, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::schema::build_response_schema;

    fn base() -> Value {
        json!({
            "match_percentage": 85,
            "matching_highlights": ["a"],
            "missing_skills": [],
            "tailored_cv": "x"
        })
    }

    fn full() -> Value {
        let mut value = base();
        let object = value.as_object_mut().unwrap();
        object.insert("cover_letter".into(), json!("Dear team"));
        object.insert(
            "interview_qna".into(),
            json!([{ "question": "Q1", "answer": "A1" }]),
        );
        object.insert(
            "industry_updates".into(),
            json!([{ "update": "U1", "source": "https://example.com" }, { "update": "U2" }]),
        );
        value
    }

    #[test]
    fn minimal_accepts_base_fields_only() {
        let response = validate_ai_response(&base(), ApiWorkload::Minimal).unwrap();
        assert_eq!(response.match_percentage, 85);
        assert_eq!(response.cover_letter, None);
    }

    #[test]
    fn normal_rejects_base_fields_only() {
        let err = validate_ai_response(&base(), ApiWorkload::Normal).unwrap_err();
        assert_eq!(err, ValidationError::MissingCoverLetter);

        let mut with_letter = base();
        with_letter["cover_letter"] = json!("hi");
        let err = validate_ai_response(&with_letter, ApiWorkload::Normal).unwrap_err();
        assert_eq!(err, ValidationError::MissingQnaOrUpdates);
        assert!(err.to_string().contains("missing Q&A or Industry Updates"));
    }

    #[test]
    fn base_field_type_errors_fail_first() {
        let mut value = full();
        value["match_percentage"] = json!("85");
        assert_eq!(
            validate_ai_response(&value, ApiWorkload::Normal),
            Err(ValidationError::MissingRequiredFields)
        );

        let mut value = full();
        value["matching_highlights"] = json!(["ok", 3]);
        assert_eq!(
            validate_ai_response(&value, ApiWorkload::Minimal),
            Err(ValidationError::MissingRequiredFields)
        );

        assert_eq!(
            validate_ai_response(&json!([1, 2]), ApiWorkload::Minimal),
            Err(ValidationError::MissingRequiredFields)
        );
    }

    #[test]
    fn percentage_out_of_range_is_rejected() {
        let mut value = base();
        value["match_percentage"] = json!(101);
        assert!(validate_ai_response(&value, ApiWorkload::Minimal).is_err());
        value["match_percentage"] = json!(-1);
        assert!(validate_ai_response(&value, ApiWorkload::Minimal).is_err());
        value["match_percentage"] = json!(100.5);
        assert!(validate_ai_response(&value, ApiWorkload::Minimal).is_err());
        value["match_percentage"] = json!(85.5);
        assert!(validate_ai_response(&value, ApiWorkload::Minimal).is_err());
    }

    #[test]
    fn integral_float_percentage_is_accepted() {
        let mut value = base();
        value["match_percentage"] = json!(85.0);
        let response = validate_ai_response(&value, ApiWorkload::Minimal).unwrap();
        assert_eq!(response.match_percentage, 85);

        value["match_percentage"] = json!(-0.0);
        assert_eq!(
            validate_ai_response(&value, ApiWorkload::Minimal)
                .unwrap()
                .match_percentage,
            0
        );
    }

    #[test]
    fn each_list_element_is_shape_checked() {
        let mut value = full();
        value["interview_qna"] = json!([{ "question": "Q1" }]);
        assert_eq!(
            validate_ai_response(&value, ApiWorkload::Normal),
            Err(ValidationError::MissingQnaOrUpdates)
        );

        let mut value = full();
        value["industry_updates"] = json!([{ "source": "s" }]);
        assert_eq!(
            validate_ai_response(&value, ApiWorkload::Normal),
            Err(ValidationError::MissingQnaOrUpdates)
        );
    }

    #[test]
    fn required_fields_match_schema_for_every_workload() {
        for workload in ApiWorkload::ALL {
            let schema = build_response_schema(workload);
            let complete = full();
            assert!(validate_ai_response(&complete, workload).is_ok());

            for field in complete.as_object().unwrap().keys() {
                let mut reduced = complete.clone();
                reduced.as_object_mut().unwrap().remove(field);
                let rejected = validate_ai_response(&reduced, workload).is_err();
                assert_eq!(
                    rejected,
                    schema.required.iter().any(|name| *name == field.as_str()),
                    "{workload}: {field}"
                );
            }
        }
    }

    #[test]
    fn round_trip_preserves_response() {
        let first = validate_ai_response(&full(), ApiWorkload::Normal).unwrap();
        let reparsed: Value = serde_json::from_str(&serde_json::to_string(&first).unwrap()).unwrap();
        let again = validate_ai_response(&reparsed, ApiWorkload::Normal).unwrap();
        assert_eq!(again, first);
    }
}
