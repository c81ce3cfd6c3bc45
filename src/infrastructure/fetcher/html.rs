//! HTML 본문을 평문으로 줄이는 변환기.

use scraper::{Html, Selector};

/// 본문 텍스트에서 제외하는 요소.
const STRIPPED_ELEMENTS: [&str; 5] = ["script", "style", "nav", "footer", "header"];

/// `<body>`의 텍스트 노드를 이어 붙이고 공백 연속을 한 칸으로 접는다.
/// script/style/nav/footer/header 하위 텍스트는 버린다.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };
    let Some(body) = document.select(&body_selector).next() else {
        return String::new();
    };

    let mut raw = String::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let stripped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| STRIPPED_ELEMENTS.iter().any(|name| *name == el.name()))
        });
        if !stripped {
            raw.push_str(text);
        }
    }

    collapse_whitespace(&raw)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
