//! Descriptor emission: one depth-first pass from schema nodes to a
//! JSON-Schema-style descriptor.
//!
//! Design goals:
//! - Total over the kind set; unrecognized kinds emit an inspectable
//!   `{type:"unknown", note}` fragment instead of failing.
//! - Pure: no I/O, no shared state, input never mutated. The one visible
//!   side effect is invoking each `Default` node's producer.
//! - Order is contract: `properties`, `required`, `oneOf`, `prefixItems`
//!   all follow input declaration order.

use serde_json::{json, Map, Value};

use crate::node::SchemaNode;

/// Translate a schema node tree into a JSON-Schema-style descriptor.
///
/// Each call walks the tree once and returns a fresh descriptor sharing no
/// structure with the input; scalar values are copied. Recursion depth equals
/// tree depth; cycles are excluded by the data model and not guarded against.
/// A `Default` producer that panics propagates to the caller; nothing else
/// can fail.
pub fn emit_descriptor(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::String => json!({ "type": "string" }),
        SchemaNode::Number => json!({ "type": "number" }),
        SchemaNode::Boolean => json!({ "type": "boolean" }),

        SchemaNode::Literal(value) => json!({
            "type": value.type_name(),
            "enum": [value.to_json()],
        }),

        SchemaNode::Enum { values } => json!({
            "type": "string",
            "enum": values,
        }),

        // ---- object arm ----
        SchemaNode::Object { fields } => {
            let mut properties = Map::new();
            let mut required: Vec<String> = Vec::new();
            for (name, child) in fields {
                properties.insert(name.clone(), emit_descriptor(child));
                if !child.is_optional() {
                    required.push(name.clone());
                }
            }
            json!({
                "type": "object",
                "properties": properties,
                "required": required,
            })
        }

        SchemaNode::Array { item } => json!({
            "type": "array",
            "items": emit_descriptor(item),
        }),

        // Optionality is not part of the node's own descriptor; it only
        // suppresses the field's entry in the parent's `required` list.
        SchemaNode::Optional(inner) => emit_descriptor(inner),

        SchemaNode::Nullable(inner) => json!({
            "anyOf": [emit_descriptor(inner), { "type": "null" }],
        }),

        SchemaNode::Union { options } => json!({
            "oneOf": options.iter().map(emit_descriptor).collect::<Vec<_>>(),
        }),

        // `default` lands on top of whatever the inner descriptor produced.
        SchemaNode::Default { inner, value } => {
            let mut out = emit_descriptor(inner);
            let default = value.produce();
            if let Some(map) = out.as_object_mut() {
                map.insert("default".to_string(), default);
            }
            out
        }

        SchemaNode::Record { value } => json!({
            "type": "object",
            "additionalProperties": emit_descriptor(value),
        }),

        // No constraint at all.
        SchemaNode::Any | SchemaNode::Unknown => json!({}),

        // Refinement/preprocessing does not change the structural shape.
        SchemaNode::Effects(inner) => emit_descriptor(inner),

        SchemaNode::Tuple { items } => json!({
            "type": "array",
            "prefixItems": items.iter().map(emit_descriptor).collect::<Vec<_>>(),
            "minItems": items.len(),
            "maxItems": items.len(),
        }),

        SchemaNode::Other { kind } => json!({
            "type": "unknown",
            "note": format!("Unrecognized type: {kind}"),
        }),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SchemaNode;
    use serde_json::json;

    #[test]
    fn scalar_kinds_emit_fixed_shapes() {
        assert_eq!(emit_descriptor(&SchemaNode::string()), json!({"type": "string"}));
        assert_eq!(emit_descriptor(&SchemaNode::number()), json!({"type": "number"}));
        assert_eq!(emit_descriptor(&SchemaNode::boolean()), json!({"type": "boolean"}));
        assert_eq!(emit_descriptor(&SchemaNode::any()), json!({}));
        assert_eq!(emit_descriptor(&SchemaNode::unknown()), json!({}));
    }

    #[test]
    fn literals_carry_their_runtime_type_and_value() {
        assert_eq!(
            emit_descriptor(&SchemaNode::literal("active")),
            json!({"type": "string", "enum": ["active"]})
        );
        assert_eq!(
            emit_descriptor(&SchemaNode::literal(42i64)),
            json!({"type": "number", "enum": [42]})
        );
        assert_eq!(
            emit_descriptor(&SchemaNode::literal(true)),
            json!({"type": "boolean", "enum": [true]})
        );
    }

    #[test]
    fn string_enums_preserve_value_order() {
        let node = SchemaNode::string_enum(["celsius", "fahrenheit", "kelvin"]);
        assert_eq!(
            emit_descriptor(&node),
            json!({"type": "string", "enum": ["celsius", "fahrenheit", "kelvin"]})
        );
    }

    #[test]
    fn optional_is_transparent_in_its_own_descriptor() {
        assert_eq!(
            emit_descriptor(&SchemaNode::string().optional()),
            json!({"type": "string"})
        );
    }

    #[test]
    fn objects_split_required_by_optionality() {
        let node = SchemaNode::object([
            ("a", SchemaNode::string()),
            ("b", SchemaNode::number().optional()),
        ]);
        assert_eq!(
            emit_descriptor(&node),
            json!({
                "type": "object",
                "properties": {"a": {"type": "string"}, "b": {"type": "number"}},
                "required": ["a"],
            })
        );
    }

    #[test]
    fn object_property_and_required_order_follow_insertion() {
        let node = SchemaNode::object([
            ("zebra", SchemaNode::string()),
            ("alpha", SchemaNode::number().optional()),
            ("mid", SchemaNode::boolean()),
        ]);
        let out = emit_descriptor(&node);
        let keys = out["properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>();
        assert_eq!(keys, ["zebra", "alpha", "mid"]);
        assert_eq!(out["required"], json!(["zebra", "mid"]));
    }

    #[test]
    fn defaults_do_not_suppress_requiredness() {
        let node = SchemaNode::object([("age", SchemaNode::number().default_const(18))]);
        let out = emit_descriptor(&node);
        assert_eq!(out["required"], json!(["age"]));
        assert_eq!(out["properties"]["age"], json!({"type": "number", "default": 18}));
    }

    #[test]
    fn optional_like_foreign_kinds_drop_out_of_required() {
        let node = SchemaNode::object([
            ("a", SchemaNode::string()),
            ("b", SchemaNode::other("OptionalDate")),
        ]);
        let out = emit_descriptor(&node);
        assert_eq!(out["required"], json!(["a"]));
        assert_eq!(out["properties"]["b"]["type"], "unknown");
    }

    #[test]
    fn empty_objects_still_emit_an_empty_required_list() {
        let node = SchemaNode::object(std::iter::empty::<(&str, SchemaNode)>());
        assert_eq!(
            emit_descriptor(&node),
            json!({"type": "object", "properties": {}, "required": []})
        );
    }

    #[test]
    fn arrays_wrap_their_element() {
        assert_eq!(
            emit_descriptor(&SchemaNode::array(SchemaNode::string())),
            json!({"type": "array", "items": {"type": "string"}})
        );
    }

    #[test]
    fn nullable_wraps_in_any_of_with_null() {
        assert_eq!(
            emit_descriptor(&SchemaNode::string().nullable()),
            json!({"anyOf": [{"type": "string"}, {"type": "null"}]})
        );
    }

    #[test]
    fn unions_emit_one_of_in_option_order() {
        let node = SchemaNode::union([
            SchemaNode::literal("active"),
            SchemaNode::literal("inactive"),
        ]);
        assert_eq!(
            emit_descriptor(&node),
            json!({"oneOf": [
                {"type": "string", "enum": ["active"]},
                {"type": "string", "enum": ["inactive"]},
            ]})
        );
    }

    #[test]
    fn defaults_merge_on_top_of_the_inner_descriptor() {
        assert_eq!(
            emit_descriptor(&SchemaNode::number().default_const(18)),
            json!({"type": "number", "default": 18})
        );
    }

    #[test]
    fn defaults_on_objects_sit_alongside_properties() {
        let node = SchemaNode::object([("x", SchemaNode::number())]).default_const(json!({"x": 1}));
        let out = emit_descriptor(&node);
        assert_eq!(out["type"], "object");
        assert_eq!(out["required"], json!(["x"]));
        assert_eq!(out["default"], json!({"x": 1}));
    }

    #[test]
    fn default_producer_runs_once_per_translation_and_never_eagerly() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let node = {
            let calls = Arc::clone(&calls);
            SchemaNode::number().default_with(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                serde_json::Value::from(7)
            })
        };
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let first = emit_descriptor(&node);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // No memoization across repeated translations.
        let second = emit_descriptor(&node);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn records_emit_additional_properties_only() {
        let out = emit_descriptor(&SchemaNode::record(SchemaNode::string()));
        assert_eq!(
            out,
            json!({"type": "object", "additionalProperties": {"type": "string"}})
        );
        assert!(out.get("properties").is_none());
    }

    #[test]
    fn effects_wrappers_are_structurally_transparent() {
        assert_eq!(
            emit_descriptor(&SchemaNode::string().refined()),
            json!({"type": "string"})
        );
        // Stacked wrappers unwrap all the way down.
        assert_eq!(
            emit_descriptor(&SchemaNode::number().refined().refined()),
            json!({"type": "number"})
        );
    }

    #[test]
    fn tuples_pin_arity_through_min_and_max_items() {
        let node = SchemaNode::tuple([SchemaNode::string(), SchemaNode::number()]);
        assert_eq!(
            emit_descriptor(&node),
            json!({
                "type": "array",
                "prefixItems": [{"type": "string"}, {"type": "number"}],
                "minItems": 2,
                "maxItems": 2,
            })
        );
    }

    #[test]
    fn unrecognized_kinds_emit_a_note_instead_of_failing() {
        assert_eq!(
            emit_descriptor(&SchemaNode::other("ZodFoo")),
            json!({"type": "unknown", "note": "Unrecognized type: ZodFoo"})
        );
    }

    #[test]
    fn translation_is_repeatable_for_pure_producers() {
        let node = crate::samples::sample_tool_contract();
        let a = serde_json::to_string(&emit_descriptor(&node)).unwrap();
        let b = serde_json::to_string(&emit_descriptor(&node)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sample_contract_translates_to_the_golden_descriptor() {
        let out = emit_descriptor(&crate::samples::sample_tool_contract());
        let want = json!({
            "type": "object",
            "properties": {
                "id": {"type": "string"},
                "age": {"type": "number", "default": 18},
                "isAdmin": {"type": "boolean"},
                "tags": {"type": "array", "items": {"type": "string"}},
                "status": {"oneOf": [
                    {"type": "string", "enum": ["active"]},
                    {"type": "string", "enum": ["inactive"]},
                ]},
                "meta": {"type": "object", "additionalProperties": {"type": "string"}},
                "tupleExample": {
                    "type": "array",
                    "prefixItems": [{"type": "string"}, {"type": "number"}],
                    "minItems": 2,
                    "maxItems": 2,
                },
                "name": {"anyOf": [{"type": "string"}, {"type": "null"}]},
            },
            "required": ["id", "age", "tags", "status", "meta", "tupleExample", "name"],
        });
        // Serialized comparison keeps property order significant.
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            serde_json::to_string(&want).unwrap()
        );
    }
}
