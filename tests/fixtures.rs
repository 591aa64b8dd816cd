use linemark::{ParseOptions, Parser};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    markdown: String,
    html: String,
    /// Absent means defaults without the formatting pass.
    #[serde(default)]
    options: Option<ParseOptions>,
}

fn load_cases() -> Vec<Case> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/cases.json");
    let data = fs::read_to_string(path).expect("Failed to read cases.json");
    serde_json::from_str(&data).expect("Failed to parse cases.json")
}

#[test]
fn fixture_cases() {
    let cases = load_cases();
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in &cases {
        let options = case.options.unwrap_or_else(ParseOptions::unformatted);
        let result = Parser::new(options)
            .parse(&case.markdown)
            .unwrap_or_else(|err| panic!("{} failed to convert: {err}", case.name));

        if result != case.html {
            if failures.len() < 5 {
                eprintln!("\n{} failed", case.name);
                eprintln!("  Input: {:?}", case.markdown);
                eprintln!("  Expected: {:?}", case.html);
                eprintln!("  Got: {:?}", result);
            }
            failures.push(case.name.as_str());
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} cases failed: {:?}",
        failures.len(),
        cases.len(),
        failures
    );
}

#[test]
fn fixture_lists_are_balanced() {
    for case in load_cases() {
        let html = Parser::new(ParseOptions::unformatted()).render(&case.markdown);
        assert_eq!(
            html.matches("<ul>").count(),
            html.matches("</ul>").count(),
            "unbalanced <ul> in {}",
            case.name
        );
    }
}
