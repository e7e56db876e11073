use covdash::{
    report::{Suggestion, UncoveredBin, normalize, rank},
    view::filter,
};
use proptest::prelude::*;
use serde_json::{Value, json};

fn label_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,12}"
}

fn bin_strategy() -> impl Strategy<Value = UncoveredBin> {
    (label_strategy(), label_strategy(), label_strategy()).prop_map(|(cg, cp, bin)| {
        UncoveredBin {
            covergroup: cg,
            coverpoint: cp,
            bin,
        }
    })
}

fn suggestion_strategy() -> impl Strategy<Value = Suggestion> {
    // A handful of distinct scores so ties are common.
    (label_strategy(), 0u8..5).prop_map(|(target_bin, bucket)| Suggestion {
        target_bin,
        score: f64::from(bucket) / 4.0,
        ..Default::default()
    })
}

fn optional_list() -> impl Strategy<Value = Option<Vec<String>>> {
    proptest::option::of(proptest::collection::vec(label_strategy(), 0..4))
}

/// Either wire layout, with every optional field independently present or
/// absent.
fn raw_suggestion_strategy() -> impl Strategy<Value = Value> {
    (
        any::<bool>(),
        label_strategy(),
        proptest::option::of(0.0f64..1.0),
        proptest::option::of(prop_oneof![Just("high"), Just("medium"), Just("low")]),
        proptest::option::of(label_strategy()),
        optional_list(),
        optional_list(),
    )
        .prop_map(|(nested, target, score, priority, reasoning, deps, outline)| {
            let mut detail = serde_json::Map::new();
            if let Some(priority) = priority {
                detail.insert("priority".to_string(), json!(priority));
            }
            if let Some(reasoning) = reasoning {
                detail.insert("reasoning".to_string(), json!(reasoning));
            }
            if let Some(deps) = deps {
                detail.insert("dependencies".to_string(), json!(deps));
            }
            if let Some(outline) = outline {
                detail.insert("test_outline".to_string(), json!(outline));
            }
            detail.insert("suggestion".to_string(), json!(format!("hit {}", target)));
            let mut element = serde_json::Map::new();
            if let Some(score) = score {
                element.insert("score".to_string(), json!(score));
            }
            if nested {
                element.insert("target".to_string(), json!(target));
                element.insert("suggestion".to_string(), Value::Object(detail));
            } else {
                element.insert("target_bin".to_string(), json!(target));
                element.extend(detail);
            }
            Value::Object(element)
        })
}

fn targets(suggestions: &[Suggestion]) -> Vec<String> {
    suggestions.iter().map(|s| s.target_bin.clone()).collect()
}

proptest! {
    #[test]
    fn rank_is_idempotent(suggestions in proptest::collection::vec(suggestion_strategy(), 0..24)) {
        let once = rank(suggestions);
        let twice = rank(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rank_orders_descending_and_keeps_ties_stable(
        suggestions in proptest::collection::vec(suggestion_strategy(), 0..24)
    ) {
        let tagged: Vec<Suggestion> = suggestions
            .into_iter()
            .enumerate()
            .map(|(position, mut s)| {
                s.target_bin = format!("{}#{}", s.target_bin, position);
                s
            })
            .collect();
        let ranked = rank(tagged.clone());

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for score in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let before: Vec<Suggestion> = tagged.iter().filter(|s| s.score == score).cloned().collect();
            let after: Vec<Suggestion> = ranked.iter().filter(|s| s.score == score).cloned().collect();
            prop_assert_eq!(targets(&before), targets(&after));
        }
    }

    #[test]
    fn empty_query_is_identity(bins in proptest::collection::vec(bin_strategy(), 0..24)) {
        let visible: Vec<UncoveredBin> = filter(&bins, "").into_iter().cloned().collect();
        prop_assert_eq!(visible, bins);
    }

    #[test]
    fn filter_ignores_case(
        bins in proptest::collection::vec(bin_strategy(), 0..24),
        query in "[a-zA-Z_]{1,4}"
    ) {
        prop_assert_eq!(
            filter(&bins, &query.to_uppercase()),
            filter(&bins, &query.to_lowercase())
        );
    }

    #[test]
    fn filter_keeps_server_order(
        bins in proptest::collection::vec(bin_strategy(), 0..24),
        query in "[a-z]{1,2}"
    ) {
        let visible = filter(&bins, &query);
        let positions: Vec<usize> = visible
            .iter()
            .map(|v| bins.iter().position(|b| std::ptr::eq(b, *v)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn normalized_suggestions_are_complete_and_ranked(
        elements in proptest::collection::vec(raw_suggestion_strategy(), 0..12),
        prioritized_key in any::<bool>()
    ) {
        let key = if prioritized_key { "prioritized_suggestions" } else { "suggestions" };
        let raw = json!({ key: elements.clone() });

        let report = normalize(&raw);

        prop_assert_eq!(report.suggestions.len(), elements.len());
        for suggestion in &report.suggestions {
            prop_assert!(!suggestion.target_bin.is_empty());
            prop_assert!(suggestion.suggestion_text.starts_with("hit "));
        }
        for pair in report.suggestions.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        prop_assert_eq!(rank(report.suggestions.clone()), report.suggestions);
    }
}
