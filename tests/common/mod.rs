#![allow(dead_code)]

pub use taskgraph_explorer_test_utils::builders;
pub use taskgraph_explorer_test_utils::{init_tracing, with_timeout};

use taskgraph_explorer::identifier::Identifier;

/// `//:name`
pub fn id(name: &str) -> Identifier {
    Identifier::new(".", name)
}
