//! End-to-end checks for json-contract: build the sample contract both ways
//! (builders and wire form), translate, and compare against the golden
//! descriptor. Exits nonzero if any check fails.

use colored::Colorize;
use serde_json::json;

const SAMPLE_CONTRACT_WIRE: &str = r#"{
    "kind": "object",
    "fields": {
        "id": {"kind": "string"},
        "age": {"kind": "default", "inner": {"kind": "number"}, "value": 18},
        "isAdmin": {"kind": "optional", "inner": {"kind": "boolean"}},
        "tags": {"kind": "array", "item": {"kind": "string"}},
        "status": {"kind": "union", "options": [
            {"kind": "literal", "value": "active"},
            {"kind": "literal", "value": "inactive"}
        ]},
        "meta": {"kind": "record", "valueType": {"kind": "string"}},
        "tupleExample": {"kind": "tuple", "items": [
            {"kind": "string"},
            {"kind": "number"}
        ]},
        "name": {"kind": "nullable", "inner": {"kind": "string"}}
    }
}"#;

fn golden_descriptor() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "string"},
            "age": {"type": "number", "default": 18},
            "isAdmin": {"type": "boolean"},
            "tags": {"type": "array", "items": {"type": "string"}},
            "status": {"oneOf": [
                {"type": "string", "enum": ["active"]},
                {"type": "string", "enum": ["inactive"]}
            ]},
            "meta": {"type": "object", "additionalProperties": {"type": "string"}},
            "tupleExample": {
                "type": "array",
                "prefixItems": [{"type": "string"}, {"type": "number"}],
                "minItems": 2,
                "maxItems": 2
            },
            "name": {"anyOf": [{"type": "string"}, {"type": "null"}]}
        },
        "required": ["id", "age", "tags", "status", "meta", "tupleExample", "name"]
    })
}

fn main() {
    let mut failures = 0usize;
    check("sample contract via builders", check_builder_sample(), &mut failures);
    check("sample contract via wire form", check_wire_sample(), &mut failures);
    check("unknown kind stays translatable", check_unknown_kind(), &mut failures);

    if failures > 0 {
        eprintln!("{} {failures} check(s) failed", "FAIL".red().bold());
        std::process::exit(1);
    }
    println!("{} all checks passed", "OK".green().bold());
}

fn check(name: &str, result: Result<(), String>, failures: &mut usize) {
    match result {
        Ok(()) => println!("{} {name}", "ok".green()),
        Err(message) => {
            *failures += 1;
            eprintln!("{} {name}: {message}", "fail".red());
        }
    }
}

fn check_builder_sample() -> Result<(), String> {
    let node = json_contract::samples::sample_tool_contract();
    let got = json_contract::emit::emit_descriptor(&node);
    expect_eq(&got, &golden_descriptor())
}

fn check_wire_sample() -> Result<(), String> {
    let node =
        json_contract::wire::node_from_str(SAMPLE_CONTRACT_WIRE).map_err(|e| e.to_string())?;
    let got = json_contract::emit::emit_descriptor(&node);
    expect_eq(&got, &golden_descriptor())
}

fn check_unknown_kind() -> Result<(), String> {
    let node =
        json_contract::wire::node_from_str(r#"{"kind": "ZodFoo"}"#).map_err(|e| e.to_string())?;
    let got = json_contract::emit::emit_descriptor(&node);
    expect_eq(
        &got,
        &json!({"type": "unknown", "note": "Unrecognized type: ZodFoo"}),
    )
}

fn expect_eq(got: &serde_json::Value, want: &serde_json::Value) -> Result<(), String> {
    // Serialized comparison keeps key order significant.
    let got_text = serde_json::to_string_pretty(got).map_err(|e| e.to_string())?;
    let want_text = serde_json::to_string_pretty(want).map_err(|e| e.to_string())?;
    if got_text == want_text {
        Ok(())
    } else {
        Err(format!("descriptor mismatch:\n--- got\n{got_text}\n--- want\n{want_text}"))
    }
}
