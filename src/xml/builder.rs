//! [`XmlTree`] to XML text.

use quick_xml::escape::partial_escape;

use crate::xml::tree::{NodeData, NodeId, XmlTree};

/// Serialize a node and its subtree.
///
/// Attributes are written in insertion order with double quotes. Text
/// escapes `&`, `<` and `>`; attribute values additionally escape `"`.
pub fn build(tree: &XmlTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

/// Serialize a whole document: declaration, prolog, root, then epilog.
///
/// Nothing separates the declaration from the root unless the prolog holds
/// whitespace; callers decide on layout.
pub fn build_document(tree: &XmlTree) -> String {
    let mut out = String::new();
    if let Some(decl) = tree.declaration() {
        out.push_str("<?");
        out.push_str(decl);
        out.push_str("?>");
    }
    for &id in tree.prolog() {
        write_node(tree, id, &mut out);
    }
    if let Some(root) = tree.root() {
        write_node(tree, root, &mut out);
    }
    for &id in tree.epilog() {
        write_node(tree, id, &mut out);
    }
    out
}

enum Step {
    Open(NodeId),
    Close(NodeId),
}

fn write_node(tree: &XmlTree, id: NodeId, out: &mut String) {
    let mut stack = vec![Step::Open(id)];

    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Open(id) => id,
            Step::Close(id) => {
                if let Some(name) = tree.name(id) {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
                continue;
            }
        };
        let Some(node) = tree.get(id) else {
            continue;
        };

        match &node.data {
            NodeData::Element {
                name,
                attrs,
                self_closing,
            } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attrs.iter() {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }

                if *self_closing && node.children.is_empty() {
                    out.push_str("/>");
                    continue;
                }

                out.push('>');
                stack.push(Step::Close(id));
                // Reverse so the first child is written first
                stack.extend(node.children.iter().rev().map(|&child| Step::Open(child)));
            }
            NodeData::Text(text) => out.push_str(&partial_escape(text)),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::CData(text) => {
                out.push_str("<![CDATA[");
                out.push_str(text);
                out.push_str("]]>");
            }
            NodeData::ProcessingInstruction(text) => {
                out.push_str("<?");
                out.push_str(text);
                out.push_str("?>");
            }
            NodeData::Doctype(text) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(text);
                out.push('>');
            }
        }
    }
}

fn escape_attr(value: &str) -> String {
    partial_escape(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::xml::parse;
    use crate::xml::tree::Attributes;

    #[test]
    fn test_build_element_with_children() {
        let mut tree = XmlTree::with_root("target", [("state", "new")].into_iter().collect());
        let root = tree.root().unwrap();
        let text = tree.create_text("a < b & c");
        tree.append(root, text);

        assert_eq!(
            build(&tree, root),
            "<target state=\"new\">a &lt; b &amp; c</target>"
        );
    }

    #[test]
    fn test_build_empty_elements() {
        let mut tree = XmlTree::with_root("unit", Attributes::new());
        let root = tree.root().unwrap();
        assert_eq!(build(&tree, root), "<unit></unit>");

        let parsed = parse("<unit><x id=\"1\"/></unit>").unwrap();
        assert_eq!(
            build(&parsed, parsed.root().unwrap()),
            "<unit><x id=\"1\"/></unit>"
        );
    }

    #[test]
    fn test_build_escapes_attribute_quotes() {
        let tree = XmlTree::with_root("a", [("t", "say \"hi\" & <go>")].into_iter().collect());
        assert_eq!(
            build(&tree, tree.root().unwrap()),
            "<a t=\"say &quot;hi&quot; &amp; &lt;go&gt;\"></a>"
        );
    }

    #[test]
    fn test_build_document_round_trip() {
        let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><!-- generated --><xliff version=\"2.0\">\n  <file id=\"f\"><![CDATA[raw]]><?pi data?></file>\n</xliff>";
        let tree = parse(input).unwrap();
        assert_eq!(build_document(&tree), input);
    }

    #[test]
    fn test_build_document_keeps_outer_whitespace_and_epilog() {
        let input = "<?xml version=\"1.0\"?>\n<!-- generated -->\n<xliff version=\"2.0\"/>\n<!-- end -->\n";
        let tree = parse(input).unwrap();
        // Whitespace right before the root is the caller's to restore
        assert_eq!(
            build_document(&tree),
            "<?xml version=\"1.0\"?>\n<!-- generated --><xliff version=\"2.0\"/>\n<!-- end -->\n"
        );
    }

    #[test]
    fn test_build_deeply_nested_elements() {
        let depth = 200_000;
        let input = format!("{}{}", "<g>".repeat(depth), "</g>".repeat(depth));
        let tree = parse(&input).unwrap();
        assert_eq!(build(&tree, tree.root().unwrap()), input);
    }

    proptest! {
        #[test]
        fn prop_text_survives_round_trip(text in "[a-zA-Z0-9 <>&'\"\n]{0,40}") {
            let mut tree = XmlTree::with_root("source", Attributes::new());
            let root = tree.root().unwrap();
            let node = tree.create_text(text.clone());
            tree.append(root, node);
            tree.set_attr(root, "note", &text);

            let reparsed = parse(&build(&tree, root)).unwrap();
            let reparsed_root = reparsed.root().unwrap();
            prop_assert_eq!(reparsed.attr(reparsed_root, "note"), Some(text.as_str()));
            let body = reparsed.children(reparsed_root).first().and_then(|&id| reparsed.text(id));
            prop_assert_eq!(body.unwrap_or(""), text.as_str());
        }
    }
}
