//! The injected `ui` runtime module.
//!
//! Lowered sources build their output through two functions: `el` creates
//! an element node and `text` a text node. Both are registered directly on
//! the per-run engine, and `require("ui")` additionally hands back a module
//! object carrying them as function pointers so both import styles work.
//!
//! Nodes are plain Rhai maps tagged with a `__node` discriminator; the
//! render side turns them into a [`ViewNode`](crate::preview::ViewNode)
//! tree.

use crate::preview::sandbox::format_value;
use rhai::{Array, Dynamic, Engine, EvalAltResult, FnPtr, Map};

/// The only module name the sandbox loader resolves
pub const MODULE_NAME: &str = "ui";

/// Reported as `version` on the module object
pub const RUNTIME_VERSION: &str = "0.1";

/// Register the runtime constructors on a per-run engine
pub fn install(engine: &mut Engine) {
    engine.register_fn("el", |tag: &str| element(tag, Map::new(), Array::new()));
    engine.register_fn("el", |tag: &str, props: Map| element(tag, props, Array::new()));
    engine.register_fn("el", |tag: &str, props: Map, children: Array| {
        element(tag, props, children)
    });
    engine.register_fn("text", |value: Dynamic| text_node(&value));
}

/// The map handed back by `require("ui")`
pub fn module_object() -> Result<Map, Box<EvalAltResult>> {
    let mut module = Map::new();
    module.insert("el".into(), Dynamic::from(FnPtr::new("el")?));
    module.insert("text".into(), Dynamic::from(FnPtr::new("text")?));
    module.insert("version".into(), RUNTIME_VERSION.into());
    Ok(module)
}

fn element(tag: &str, props: Map, children: Array) -> Map {
    let mut node = Map::new();
    node.insert("__node".into(), "element".into());
    node.insert("tag".into(), tag.into());
    node.insert("props".into(), props.into());
    node.insert("children".into(), children.into());
    node
}

fn text_node(value: &Dynamic) -> Map {
    let mut node = Map::new();
    node.insert("__node".into(), "text".into());
    node.insert("value".into(), format_value(value).into());
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_shape() {
        let node = element("div", Map::new(), Array::new());
        assert_eq!(node.get("__node").map(|v| v.to_string()), Some("element".to_string()));
        assert_eq!(node.get("tag").map(|v| v.to_string()), Some("div".to_string()));
        assert!(node.contains_key("props"));
        assert!(node.contains_key("children"));
    }

    #[test]
    fn test_text_node_formats_value() {
        let node = text_node(&Dynamic::from(42_i64));
        assert_eq!(node.get("__node").map(|v| v.to_string()), Some("text".to_string()));
        assert_eq!(node.get("value").map(|v| v.to_string()), Some("42".to_string()));
    }

    #[test]
    fn test_module_object_exposes_constructors() {
        let module = module_object().unwrap();
        assert!(module.get("el").map(|v| v.is::<FnPtr>()).unwrap_or(false));
        assert!(module.get("text").map(|v| v.is::<FnPtr>()).unwrap_or(false));
        assert_eq!(
            module.get("version").map(|v| v.to_string()),
            Some(RUNTIME_VERSION.to_string())
        );
    }
}
