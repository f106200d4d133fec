//! Built-in sample contract. This is fixture data for the `demo` subcommand,
//! the tests, and dev-test-runner; nothing runs it implicitly.

use crate::node::SchemaNode;

/// A user-profile tool contract exercising the commonly combined kinds:
/// defaults, optionals, unions of literals, records, tuples, nullables.
pub fn sample_tool_contract() -> SchemaNode {
    SchemaNode::object([
        ("id", SchemaNode::string()),
        ("age", SchemaNode::number().default_const(18)),
        ("isAdmin", SchemaNode::boolean().optional()),
        ("tags", SchemaNode::array(SchemaNode::string())),
        (
            "status",
            SchemaNode::union([
                SchemaNode::literal("active"),
                SchemaNode::literal("inactive"),
            ]),
        ),
        ("meta", SchemaNode::record(SchemaNode::string())),
        (
            "tupleExample",
            SchemaNode::tuple([SchemaNode::string(), SchemaNode::number()]),
        ),
        ("name", SchemaNode::string().nullable()),
    ])
}
