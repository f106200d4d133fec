//! Translate typed, composable schema descriptions into JSON-Schema-style
//! descriptors for tool contracts.
//!
//! Design goals:
//! - One pure recursive pass: [`emit::emit_descriptor`] maps each node kind
//!   to its JSON-Schema fragment; no shared state, no I/O, reentrant.
//! - Total over the kind set: unrecognized kinds emit an inspectable
//!   `{type:"unknown", note}` fragment instead of failing.
//! - Order is contract: `properties`, `required`, `oneOf`, `prefixItems`
//!   follow input declaration order (serde_json `preserve_order`).

pub mod cli;
pub mod emit;
pub mod node;
pub mod path_de;
pub mod samples;
pub mod wire;
