//! XML text to [`XmlTree`] using quick-xml.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::xml::tree::{Attributes, NodeData, NodeId, XmlTree};

/// Parse XML text into a tree.
///
/// Whitespace is kept verbatim, with one exception: whitespace directly
/// before the root element is dropped. Comments, doctype, processing
/// instructions and whitespace around them go to the prolog or the epilog.
/// Entity and character references are resolved into the surrounding text.
pub fn parse(text: &str) -> Result<XmlTree> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut tree = XmlTree::new();
    let mut stack: Vec<NodeId> = Vec::new();
    // Whitespace seen before the root, held until we know what follows it
    let mut pending = String::new();

    loop {
        match reader.read_event()? {
            Event::Decl(decl) => {
                if tree.root().is_none() {
                    tree.set_declaration(std::str::from_utf8(&decl)?);
                }
            }
            Event::Start(e) => {
                let id = create_element(&mut tree, &e, false)?;
                attach(&mut tree, &stack, id)?;
                pending.clear();
                stack.push(id);
            }
            Event::Empty(e) => {
                let id = create_element(&mut tree, &e, true)?;
                attach(&mut tree, &stack, id)?;
                pending.clear();
            }
            Event::End(e) => {
                let name = e.name();
                let name = std::str::from_utf8(name.as_ref())?;
                match stack.pop() {
                    Some(open) if tree.name(open) == Some(name) => {}
                    Some(open) => {
                        return Err(Error::Malformed(format!(
                            "expected </{}>, found </{name}>",
                            tree.name(open).unwrap_or_default()
                        )));
                    }
                    None => {
                        return Err(Error::Malformed(format!("unexpected </{name}>")));
                    }
                }
            }
            Event::Text(e) => {
                push_text(&mut tree, &stack, &mut pending, std::str::from_utf8(&e)?)?;
            }
            Event::GeneralRef(e) => {
                let entity = std::str::from_utf8(&e)?;
                let resolved = resolve_entity(entity)
                    .ok_or_else(|| Error::Malformed(format!("unknown entity &{entity};")))?;
                push_text(&mut tree, &stack, &mut pending, &resolved)?;
            }
            Event::CData(e) => {
                let data = NodeData::CData(std::str::from_utf8(&e)?.to_string());
                push_misc(&mut tree, &stack, &mut pending, data);
            }
            Event::Comment(e) => {
                let data = NodeData::Comment(std::str::from_utf8(&e)?.to_string());
                push_misc(&mut tree, &stack, &mut pending, data);
            }
            Event::PI(e) => {
                let data = NodeData::ProcessingInstruction(std::str::from_utf8(&e)?.to_string());
                push_misc(&mut tree, &stack, &mut pending, data);
            }
            Event::DocType(e) => {
                let data = NodeData::Doctype(std::str::from_utf8(&e)?.trim().to_string());
                push_misc(&mut tree, &stack, &mut pending, data);
            }
            Event::Eof => break,
        }
    }

    if let Some(&open) = stack.last() {
        return Err(Error::Malformed(format!(
            "unclosed <{}>",
            tree.name(open).unwrap_or_default()
        )));
    }
    if tree.root().is_none() {
        return Err(Error::Malformed("no root element".to_string()));
    }

    Ok(tree)
}

fn create_element(tree: &mut XmlTree, e: &BytesStart<'_>, self_closing: bool) -> Result<NodeId> {
    let name = e.name();
    let name = std::str::from_utf8(name.as_ref())?.to_string();

    let mut attrs = Attributes::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = std::str::from_utf8(&attr.value)?;
        attrs.set(key, unescape(raw)?);
    }

    Ok(tree.create_node(NodeData::Element {
        name,
        attrs,
        self_closing,
    }))
}

/// Hook a freshly created element under the open element, or make it the root.
fn attach(tree: &mut XmlTree, stack: &[NodeId], id: NodeId) -> Result<()> {
    match stack.last() {
        Some(&parent) => tree.append(parent, id),
        None if tree.root().is_none() => tree.set_root(id),
        None => return Err(Error::Malformed("multiple root elements".to_string())),
    }
    Ok(())
}

fn push_text(
    tree: &mut XmlTree,
    stack: &[NodeId],
    pending: &mut String,
    text: &str,
) -> Result<()> {
    match stack.last() {
        Some(&parent) => tree.append_text(parent, text),
        None if !text.trim().is_empty() => {
            return Err(Error::Malformed(format!(
                "text outside the root element: {:?}",
                text.trim()
            )));
        }
        None if tree.root().is_none() => pending.push_str(text),
        None => {
            if let Some(last) = tree.epilog().last().copied()
                && let Some(node) = tree.get_mut(last)
                && let NodeData::Text(existing) = &mut node.data
            {
                existing.push_str(text);
            } else {
                let id = tree.create_text(text);
                tree.push_epilog(id);
            }
        }
    }
    Ok(())
}

fn push_misc(tree: &mut XmlTree, stack: &[NodeId], pending: &mut String, data: NodeData) {
    match stack.last() {
        Some(&parent) => {
            let id = tree.create_node(data);
            tree.append(parent, id);
        }
        None if tree.root().is_none() => {
            if !pending.is_empty() {
                let id = tree.create_text(std::mem::take(pending));
                tree.push_prolog(id);
            }
            let id = tree.create_node(data);
            tree.push_prolog(id);
        }
        None => {
            let id = tree.create_node(data);
            tree.push_epilog(id);
        }
    }
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_tree_with_whitespace() {
        let tree = parse("<a x=\"1\">\n  <b/>\n</a>").unwrap();
        let root = tree.root().unwrap();

        assert_eq!(tree.name(root), Some("a"));
        assert_eq!(tree.attr(root, "x"), Some("1"));
        assert_eq!(tree.children(root).len(), 3);
        assert_eq!(tree.text(tree.children(root)[0]), Some("\n  "));

        let b = tree.find_child(root, "b").unwrap();
        assert_eq!(tree.parent(b), Some(root));
    }

    #[test]
    fn test_parse_keeps_declaration_and_trailing_whitespace() {
        let tree = parse("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<xliff version=\"1.2\"/>\n").unwrap();

        assert_eq!(
            tree.declaration(),
            Some("xml version=\"1.0\" encoding=\"UTF-8\"")
        );
        assert!(tree.prolog().is_empty());
        assert_eq!(tree.name(tree.root().unwrap()), Some("xliff"));
        assert_eq!(tree.epilog().len(), 1);
        assert_eq!(tree.text(tree.epilog()[0]), Some("\n"));
    }

    #[test]
    fn test_parse_keeps_whitespace_between_prolog_nodes() {
        let tree = parse("<?xml version=\"1.0\"?>\n<!-- a -->\n<!-- b -->\n<x/>\n<!-- c -->\n\n").unwrap();

        let prolog: Vec<_> = tree
            .prolog()
            .iter()
            .map(|&id| tree.get(id).unwrap().data.clone())
            .collect();
        assert_eq!(
            prolog,
            vec![
                NodeData::Text("\n".to_string()),
                NodeData::Comment(" a ".to_string()),
                NodeData::Text("\n".to_string()),
                NodeData::Comment(" b ".to_string()),
            ]
        );

        let epilog: Vec<_> = tree
            .epilog()
            .iter()
            .map(|&id| tree.get(id).unwrap().data.clone())
            .collect();
        assert_eq!(
            epilog,
            vec![
                NodeData::Text("\n".to_string()),
                NodeData::Comment(" c ".to_string()),
                NodeData::Text("\n\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_resolves_entities_into_one_text_node() {
        let tree = parse("<a t=\"&lt;b&gt;\">Tom &amp; Jerry &#65;&#x42;</a>").unwrap();
        let root = tree.root().unwrap();

        assert_eq!(tree.attr(root, "t"), Some("<b>"));
        assert_eq!(tree.children(root).len(), 1);
        assert_eq!(tree.first_child_text(root), Some("Tom & Jerry AB"));
    }

    #[test]
    fn test_parse_keeps_comments_and_cdata() {
        let tree = parse("<!-- head --><a><!-- c --><![CDATA[<x>]]></a>").unwrap();
        let root = tree.root().unwrap();

        assert_eq!(tree.prolog().len(), 1);
        let kinds: Vec<_> = tree
            .children(root)
            .iter()
            .map(|&id| tree.get(id).unwrap().data.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeData::Comment(" c ".to_string()),
                NodeData::CData("<x>".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert!(parse("<a><b></a>").is_err());
        assert!(parse("<a>").is_err());
        assert!(parse("<a/><b/>").is_err());
        assert!(parse("text<a/>").is_err());
        assert!(parse("<a/>text").is_err());
        assert!(parse("<a>&bogus;</a>").is_err());
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("apos"), Some("'".to_string()));
        assert_eq!(resolve_entity("amp"), Some("&".to_string()));
        assert_eq!(resolve_entity("#8217"), Some("\u{2019}".to_string()));
        assert_eq!(resolve_entity("#x2019"), Some("\u{2019}".to_string()));
        assert_eq!(resolve_entity("nbsp"), None);
        assert_eq!(resolve_entity("#xZZ"), None);
    }
}
