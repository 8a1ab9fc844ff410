//! Property-based tests for webview-atoms.
//!
//! Uses proptest to verify invariants hold for arbitrary inputs.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use serde_json::{json, Value};
use webview_atoms::prelude::*;
use webview_atoms::{locator_json, ScriptArg};

fn any_locator() -> impl Strategy<Value = Locator> {
    prop::sample::select(Locator::ALL.to_vec())
}

fn non_element_json() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
        "[a-z]{1,8}".prop_map(|id| json!({"WINDOW": id})),
    ]
}

// === Locator Property Tests ===

proptest! {
    /// Every strategy resolves back from its own wire key.
    #[test]
    fn prop_locator_wire_key_round_trip(locator in any_locator()) {
        let resolved = Locator::for_type(locator.get_type());
        prop_assert_eq!(resolved.ok(), Some(locator));
    }

    /// Keys outside the known set are rejected.
    #[test]
    fn prop_unknown_wire_key_rejected(key in "[A-Za-z]{1,16}") {
        let known = Locator::ALL.iter().any(|l| l.get_type() == key);
        let result = key.parse::<Locator>();
        if known {
            prop_assert!(result.is_ok());
        } else {
            let is_unknown = matches!(result, Err(AtomError::UnknownLocator { .. }));
            prop_assert!(is_unknown, "accepted unknown key: {}", key);
        }
    }

    /// Lookup arguments are a single-entry mapping keyed by the wire key.
    #[test]
    fn prop_locator_json_single_entry(locator in any_locator(), value in ".{0,32}") {
        let map = locator_json(locator, &value);
        prop_assert_eq!(map.len(), 1);
        prop_assert_eq!(map.get(locator.get_type()), Some(&Value::String(value)));
    }
}

// === Argument Property Tests ===

proptest! {
    /// Send-keys puts the text first and the active element last.
    #[test]
    fn prop_web_keys_element_last(text in ".{0,32}", id in "[a-z0-9-]{1,12}") {
        let element = ElementReference::new(id);
        let args = web_keys(text.clone()).arguments(Some(&element)).unwrap();
        prop_assert_eq!(args, vec![ScriptArg::text(text), ScriptArg::element(element)]);
    }

    /// Frame-by-index arguments are exactly `[index, root]`.
    #[test]
    fn prop_frame_by_index_args(index in any::<i32>(), root in "[a-z]{1,8}") {
        let root = WindowReference::new(root);
        let atom = select_frame_by_index_in(index, root.clone());
        let args = atom.arguments(Some(&ElementReference::new("x"))).unwrap();
        prop_assert_eq!(args, vec![ScriptArg::index(index), ScriptArg::window(root)]);
    }
}

// === Transformer Property Tests ===

proptest! {
    /// Handle lists keep their order and length.
    #[test]
    fn prop_element_list_preserves_order(ids in prop::collection::vec("[a-z0-9]{1,8}", 0..16)) {
        let value: Vec<Value> = ids.iter().map(|id| json!({"ELEMENT": id})).collect();
        let list = ElementReferenceList::new(Locator::CssSelector, "li")
            .apply(Evaluation::success(Value::Array(value)))
            .unwrap();
        let got: Vec<&str> = list.iter().map(ElementReference::id).collect();
        let want: Vec<&str> = ids.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want);
    }

    /// One non-handle anywhere fails the whole list.
    #[test]
    fn prop_element_list_rejects_any_non_handle(
        ids in prop::collection::vec("[a-z]{1,4}", 0..8),
        bad in non_element_json(),
        at in any::<prop::sample::Index>(),
    ) {
        let mut value: Vec<Value> = ids.iter().map(|id| json!({"ELEMENT": id})).collect();
        let position = at.index(value.len() + 1);
        value.insert(position, bad);
        let result = ElementReferenceList::new(Locator::Id, "x")
            .apply(Evaluation::success(Value::Array(value)));
        let is_rejected = matches!(result, Err(AtomError::NonReferenceElement { .. }));
        prop_assert!(is_rejected);
    }

    /// Text casts succeed exactly when the value is a string.
    #[test]
    fn prop_cast_text_or_fail(value in prop_oneof![
        ".{0,16}".prop_map(Value::from),
        non_element_json(),
    ]) {
        let is_string = value.is_string();
        let result = CastOrDie::<String>::new().apply(Evaluation::success(value));
        prop_assert_eq!(result.is_ok(), is_string);
    }

    /// Any error status fails the leaf, whatever the value.
    #[test]
    fn prop_error_status_fails(status in 1_i64..64, message in "[a-z ]{0,24}") {
        let err = web_click()
            .transform(Evaluation::failure(status, message.clone()))
            .unwrap_err();
        let matches_status = matches!(
            err,
            AtomError::EvaluationFailed { status: s, message: ref m } if s == status && *m == message
        );
        prop_assert!(matches_status);
    }
}
