//! Relationship inference on a normalized mapping

use crate::payload::PayloadMap;

/// Infer `owner`/`author`/`committer` roles
///
/// A `user` on a created resource is its owner; a `user` on a committed
/// resource is its author. Author and committer then fill in for each
/// other. Null fields count as absent.
pub fn infer_relationships(map: &mut PayloadMap) {
    if map.has_value("created_at") && map.has_value("user") && !map.has_value("owner") {
        move_field(map, "user", "owner");
    } else if map.has_value("committed_at") && map.has_value("user") && !map.has_value("author") {
        move_field(map, "user", "author");
    }

    if map.has_value("author") && !map.has_value("committer") {
        copy_field(map, "author", "committer");
    }
    if map.has_value("committer") && !map.has_value("author") {
        copy_field(map, "committer", "author");
    }
}

fn move_field(map: &mut PayloadMap, from: &str, to: &str) {
    if let Some(value) = map.remove(from) {
        map.insert(to, value);
    }
}

fn copy_field(map: &mut PayloadMap, from: &str, to: &str) {
    if let Some(value) = map.get(from).cloned() {
        map.insert(to, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payload;
    use serde_json::{json, Value};

    fn infer(value: Value) -> Value {
        let mut map = Payload::from(value).as_object().cloned().unwrap();
        infer_relationships(&mut map);
        Payload::Object(map).into_value()
    }

    #[test]
    fn test_created_user_becomes_owner() {
        assert_eq!(
            infer(json!({"created_at": "2011-01-26T19:01:12Z", "user": {"login": "a"}})),
            json!({"created_at": "2011-01-26T19:01:12Z", "owner": {"login": "a"}})
        );
    }

    #[test]
    fn test_existing_owner_is_kept() {
        assert_eq!(
            infer(json!({"created_at": "t", "user": {"login": "a"}, "owner": {"login": "b"}})),
            json!({"created_at": "t", "user": {"login": "a"}, "owner": {"login": "b"}})
        );
    }

    #[test]
    fn test_committed_user_becomes_author_and_committer() {
        assert_eq!(
            infer(json!({"committed_at": "t", "user": {"login": "a"}})),
            json!({"committed_at": "t", "author": {"login": "a"}, "committer": {"login": "a"}})
        );
    }

    #[test]
    fn test_created_takes_precedence_over_committed() {
        let out = infer(json!({"created_at": "t", "committed_at": "t", "user": {"login": "a"}}));
        assert_eq!(out["owner"], json!({"login": "a"}));
        assert!(out.get("author").is_none());
        assert!(out.get("user").is_none());
    }

    #[test]
    fn test_owner_present_lets_committed_rule_fire() {
        let out = infer(json!({
            "created_at": "t", "committed_at": "t",
            "owner": {"login": "o"}, "user": {"login": "u"}
        }));
        assert_eq!(out["owner"], json!({"login": "o"}));
        assert_eq!(out["author"], json!({"login": "u"}));
        assert!(out.get("user").is_none());
    }

    #[test]
    fn test_committer_fills_author() {
        assert_eq!(
            infer(json!({"committer": {"name": "c"}})),
            json!({"committer": {"name": "c"}, "author": {"name": "c"}})
        );
    }

    #[test]
    fn test_both_present_are_untouched() {
        let input = json!({"author": {"name": "a"}, "committer": {"name": "c"}});
        assert_eq!(infer(input.clone()), input);
    }

    #[test]
    fn test_null_fields_count_as_absent() {
        assert_eq!(
            infer(json!({"created_at": null, "user": {"login": "a"}})),
            json!({"created_at": null, "user": {"login": "a"}})
        );
        assert_eq!(
            infer(json!({"author": {"name": "a"}, "committer": null})),
            json!({"author": {"name": "a"}, "committer": {"name": "a"}})
        );
    }
}
