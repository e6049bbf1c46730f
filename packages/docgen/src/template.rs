// Template Slot Scanning
//
// Regex fallback for slot discovery when a component has no structural
// `defineSlots` declaration. Operates on immutable template text only;
// merging with structural data happens through `merge_slots`, never by
// sharing extraction state.

use crate::entities::SlotInfo;
use once_cell::sync::Lazy;
use regex::Regex;

static SLOT_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<slot(?P<attrs>[^>]*?)/?>").expect("slot tag regex"));
static SLOT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bname\s*=\s*["'](?P<name>[^"']+)["']"#).expect("slot name regex"));
static SLOT_BIND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?::|v-bind:)(?P<param>[A-Za-z_][\w-]*)\s*="#).expect("slot bind regex")
});

/// Scan template text for `<slot>` tags.
///
/// A slot without a `name` attribute is the `default` slot. Bound
/// attributes (`:item="..."`, `v-bind:item="..."`) become scope params.
/// Duplicate slot names merge their params, first occurrence wins on
/// order.
pub fn scan_template_slots(template: &str) -> Vec<SlotInfo> {
    let mut slots: Vec<SlotInfo> = Vec::new();

    for caps in SLOT_TAG_RE.captures_iter(template) {
        let attrs = caps.name("attrs").map(|m| m.as_str()).unwrap_or("");
        let name = SLOT_NAME_RE
            .captures(attrs)
            .and_then(|c| c.name("name"))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "default".to_string());

        let params: Vec<String> = SLOT_BIND_RE
            .captures_iter(attrs)
            .filter_map(|c| c.name("param"))
            .map(|m| m.as_str().to_string())
            .filter(|p| p != "name")
            .collect();

        if let Some(existing) = slots.iter_mut().find(|s| s.name == name) {
            for param in params {
                if !existing.params.contains(&param) {
                    existing.params.push(param);
                }
            }
        } else {
            slots.push(SlotInfo {
                name,
                params,
                description: String::new(),
            });
        }
    }

    slots
}

/// Merge structural slot declarations with template-derived ones.
///
/// Structural entries win: a template slot with the same name is dropped,
/// but its params fill a structural entry that has none. Template-only
/// slots are appended after the structural ones.
pub fn merge_slots(structural: Vec<SlotInfo>, template: Vec<SlotInfo>) -> Vec<SlotInfo> {
    let mut merged = structural;

    for slot in template {
        if let Some(existing) = merged.iter_mut().find(|s| s.name == slot.name) {
            if existing.params.is_empty() {
                existing.params = slot.params;
            }
        } else {
            merged.push(slot);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_named_and_default_slots() {
        let template = r#"<div><slot /><slot name="footer" :year="year" /></div>"#;
        let slots = scan_template_slots(template);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].name, "default");
        assert_eq!(slots[1].name, "footer");
        assert_eq!(slots[1].params, vec!["year".to_string()]);
    }

    #[test]
    fn test_scan_no_slots() {
        assert!(scan_template_slots("<div><span>hi</span></div>").is_empty());
    }

    #[test]
    fn test_merge_structural_wins() {
        let structural = vec![SlotInfo {
            name: "item".to_string(),
            params: vec![],
            description: "Row content.".to_string(),
        }];
        let template = vec![
            SlotInfo {
                name: "item".to_string(),
                params: vec!["row".to_string()],
                description: String::new(),
            },
            SlotInfo {
                name: "empty".to_string(),
                params: vec![],
                description: String::new(),
            },
        ];

        let merged = merge_slots(structural, template);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "item");
        assert_eq!(merged[0].description, "Row content.");
        assert_eq!(merged[0].params, vec!["row".to_string()]);
        assert_eq!(merged[1].name, "empty");
    }

    #[test]
    fn test_duplicate_template_slots_merge_params() {
        let template = r#"<slot name="row" :a="a" /><slot name="row" :b="b" />"#;
        let slots = scan_template_slots(template);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].params, vec!["a".to_string(), "b".to_string()]);
    }
}
