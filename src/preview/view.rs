//! The render-side view tree.
//!
//! The sandbox hands back tagged Rhai maps; this module converts them into
//! an owned [`ViewNode`] tree the frontend can paint without touching the
//! engine again. Conversion is total: values that are not recognizable
//! nodes degrade to text rather than failing, so a slightly-wrong return
//! value still previews as *something*.

use crate::preview::sandbox::format_value;
use rhai::{Array, Dynamic, Engine, FnPtr, Map, AST};
use std::sync::Arc;
use thiserror::Error;

/// A thrown error from calling the exported component
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RenderError(pub String);

/// One node of the preview tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Empty,
    Text(String),
    Element {
        tag: String,
        props: Vec<(String, String)>,
        children: Vec<ViewNode>,
    },
    Fragment(Vec<ViewNode>),
}

impl ViewNode {
    /// Convert a runtime value into a view node
    pub fn from_dynamic(value: &Dynamic) -> ViewNode {
        if value.is_unit() {
            return ViewNode::Empty;
        }
        if value.is_string() {
            return ViewNode::Text(value.clone().into_string().unwrap_or_default());
        }
        if value.is_array() {
            let children: Vec<ViewNode> = value
                .clone()
                .try_cast::<Array>()
                .unwrap_or_default()
                .iter()
                .map(ViewNode::from_dynamic)
                .collect();
            return ViewNode::Fragment(children);
        }
        if let Some(map) = value.clone().try_cast::<Map>() {
            return Self::from_node_map(&map);
        }
        ViewNode::Text(format_value(value))
    }

    fn from_node_map(map: &Map) -> ViewNode {
        let kind = map.get("__node").map(|v| v.to_string()).unwrap_or_default();
        match kind.as_str() {
            "text" => {
                let text = map.get("value").map(|v| v.to_string()).unwrap_or_default();
                ViewNode::Text(text)
            }
            "element" => {
                let tag = map.get("tag").map(|v| v.to_string()).unwrap_or_default();
                // Map keys are sorted, so prop order is stable.
                let props: Vec<(String, String)> = map
                    .get("props")
                    .cloned()
                    .and_then(|v| v.try_cast::<Map>())
                    .map(|props| {
                        props
                            .iter()
                            .map(|(key, val)| (key.to_string(), format_value(val)))
                            .collect()
                    })
                    .unwrap_or_default();
                let children: Vec<ViewNode> = map
                    .get("children")
                    .cloned()
                    .and_then(|v| v.try_cast::<Array>())
                    .map(|items| items.iter().map(ViewNode::from_dynamic).collect())
                    .unwrap_or_default();
                ViewNode::Element {
                    tag,
                    props,
                    children,
                }
            }
            // An untagged map previews as its console rendering.
            _ => ViewNode::Text(format_value(&Dynamic::from(map.clone()))),
        }
    }

    /// Look up a prop on an element node
    pub fn prop(&self, name: &str) -> Option<&str> {
        match self {
            ViewNode::Element { props, .. } => props
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// All text in the subtree, concatenated in document order
    pub fn text_content(&self) -> String {
        match self {
            ViewNode::Empty => String::new(),
            ViewNode::Text(text) => text.clone(),
            ViewNode::Element { children, .. } | ViewNode::Fragment(children) => children
                .iter()
                .map(|child| child.text_content())
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}

enum Entry {
    /// A callable export, invoked fresh on every render
    Component(FnPtr),
    /// A plain value export, converted directly
    Value(Dynamic),
}

/// A successful run's export, ready to be rendered.
///
/// Holds the run's engine and syntax tree so a component export can be
/// called after the run has finished.
pub struct RenderableUnit {
    engine: Arc<Engine>,
    ast: AST,
    entry: Entry,
}

impl RenderableUnit {
    pub fn component(engine: Arc<Engine>, ast: AST, entry: FnPtr) -> Self {
        Self {
            engine,
            ast,
            entry: Entry::Component(entry),
        }
    }

    pub fn value(engine: Arc<Engine>, ast: AST, value: Dynamic) -> Self {
        Self {
            engine,
            ast,
            entry: Entry::Value(value),
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self.entry, Entry::Component(_))
    }

    /// Produce the view tree.
    ///
    /// A throw inside a component surfaces as [`RenderError`] with the
    /// engine's message; it never unwinds into the caller.
    pub fn render(&self) -> Result<ViewNode, RenderError> {
        match &self.entry {
            Entry::Component(fn_ptr) => {
                let output: Dynamic = fn_ptr
                    .call(&self.engine, &self.ast, ())
                    .map_err(|err| RenderError(err.to_string()))?;
                Ok(ViewNode::from_dynamic(&output))
            }
            Entry::Value(value) => Ok(ViewNode::from_dynamic(value)),
        }
    }
}

impl std::fmt::Debug for RenderableUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.entry {
            Entry::Component(_) => "component",
            Entry::Value(_) => "value",
        };
        f.debug_struct("RenderableUnit").field("entry", &kind).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::sandbox::SandboxLoader;
    use crate::preview::transform::Transformer;

    fn render(source: &str) -> Result<ViewNode, RenderError> {
        let module = Transformer::new().transform(source).unwrap();
        let execution = SandboxLoader::execute(&module);
        let export = execution.slots.unwrap().resolved().unwrap();
        let unit = match export.clone().try_cast::<FnPtr>() {
            Some(fn_ptr) => RenderableUnit::component(execution.engine, execution.ast, fn_ptr),
            None => RenderableUnit::value(execution.engine, execution.ast, export),
        };
        unit.render()
    }

    #[test]
    fn test_component_renders_tree() {
        let node = render(
            "export default fn card() { <div class=\"card\"><h1>Title</h1><p>Body</p></div> }",
        )
        .unwrap();
        match &node {
            ViewNode::Element { tag, children, .. } => {
                assert_eq!(tag, "div");
                assert_eq!(node.prop("class"), Some("card"));
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected element, got {other:?}"),
        }
        assert_eq!(node.text_content(), "TitleBody");
    }

    #[test]
    fn test_interpolated_child_becomes_text() {
        let node = render("export default fn c() { let n = 3; <p>{n}</p> }").unwrap();
        assert_eq!(node.text_content(), "3");
    }

    #[test]
    fn test_value_export_renders_statically() {
        let node = render("export default <hr/>;").unwrap();
        assert!(matches!(node, ViewNode::Element { ref tag, .. } if tag == "hr"));
    }

    #[test]
    fn test_array_return_becomes_fragment() {
        let node = render("export default fn c() { [<li>a</li>, <li>b</li>] }").unwrap();
        match node {
            ViewNode::Fragment(children) => assert_eq!(children.len(), 2),
            other => panic!("expected fragment, got {other:?}"),
        }
    }

    #[test]
    fn test_throw_inside_component_is_render_error() {
        let err = render("export default fn c() { throw \"render boom\"; }").unwrap_err();
        assert!(err.0.contains("render boom"), "{}", err.0);
    }

    #[test]
    fn test_unit_return_is_empty() {
        let node = render("export default fn c() { () }").unwrap();
        assert_eq!(node, ViewNode::Empty);
    }
}
