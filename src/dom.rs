use std::collections::HashMap;

use crate::html::parse_html;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    // Insertion order is kept so dumps are stable.
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) value: String,
}

impl Element {
    pub(crate) fn new(tag_name: &str, attrs: Vec<(String, String)>) -> Self {
        let value = attrs
            .iter()
            .find(|(name, _)| name == "value")
            .map(|(_, value)| value.clone())
            .unwrap_or_default();
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs,
            value,
        }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(entry) = self.attrs.iter_mut().find(|(key, _)| key == name) {
            entry.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    pub(crate) fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        let element = Element::new(tag_name, attrs);
        let id_attr = element.attr("id").map(str::to_owned);
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = id_attr {
            if !id_attr.is_empty() && self.is_connected(id) {
                self.id_index.entry(id_attr).or_insert(id);
            }
        }
        id
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        self.create_node(None, NodeType::Element(Element::new(tag_name, Vec::new())))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn is_tag(&self, node_id: NodeId, tag: &str) -> bool {
        self.tag_name(node_id)
            .map(|name| name.eq_ignore_ascii_case(tag))
            .unwrap_or(false)
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0)?.parent
    }

    pub(crate) fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(node_id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn element_children(&self, node_id: NodeId) -> Vec<NodeId> {
        self.children(node_id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    pub(crate) fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|id| *id == node_id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|id| self.element(*id).is_some())
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node_id, &mut out);
        out
    }

    fn collect_text(&self, node_id: NodeId, out: &mut String) {
        let mut stack = vec![node_id];
        while let Some(node) = stack.pop() {
            match &self.nodes[node.0].node_type {
                NodeType::Document | NodeType::Element(_) => {
                    stack.extend(self.nodes[node.0].children.iter().rev());
                }
                NodeType::Text(text) => out.push_str(text),
            }
        }
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Runtime("textContent target is not an element".into()));
        }
        // Label swaps rewrite a lone text child in place so the arena stays flat.
        let sole_child = match self.nodes[node_id.0].children.as_slice() {
            [only] if !value.is_empty() => Some(*only),
            _ => None,
        };
        if let Some(only) = sole_child {
            if let NodeType::Text(text) = &mut self.nodes[only.0].node_type {
                value.clone_into(text);
                return Ok(());
            }
        }

        let old_children = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in old_children {
            self.nodes[child.0].parent = None;
        }
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        self.rebuild_id_index();
        Ok(())
    }

    pub(crate) fn set_inner_html(&mut self, node_id: NodeId, html: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Runtime("innerHTML target is not an element".into()));
        }

        let fragment = parse_html(html)?;

        // Replaced children stay in the arena, detached. Only install-time
        // header injection goes through here.
        let old_children = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in old_children {
            self.nodes[child.0].parent = None;
        }

        let children = fragment.nodes[fragment.root.0].children.clone();
        for child in children {
            self.clone_subtree_from_dom(&fragment, child, node_id);
        }

        self.rebuild_id_index();
        Ok(())
    }

    fn clone_subtree_from_dom(&mut self, source: &Dom, source_node: NodeId, parent: NodeId) {
        let mut stack = vec![(source_node, parent)];
        while let Some((source_node, parent)) = stack.pop() {
            let node_type = match &source.nodes[source_node.0].node_type {
                NodeType::Document => continue,
                NodeType::Element(element) => NodeType::Element(element.clone()),
                NodeType::Text(text) => NodeType::Text(text.clone()),
            };

            let node = self.create_node(Some(parent), node_type);
            stack.extend(
                source.nodes[source_node.0]
                    .children
                    .iter()
                    .rev()
                    .map(|child| (*child, node)),
            );
        }
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.element(node_id)?.attr(&name.to_ascii_lowercase())
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let lowered = name.to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("setAttribute target is not an element".into()))?;
        element.set_attr(&lowered, value);
        if lowered == "value" {
            element.value = value.to_string();
        }
        if lowered == "id" {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> Result<bool> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))?;
        Ok(element.has_class(class_name))
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))?;
        let mut classes = class_tokens(element.attr("class"));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))?;
        let mut classes = class_tokens(element.attr("class"));
        classes.retain(|name| name != class_name);
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn class_toggle(&mut self, node_id: NodeId, class_name: &str) -> Result<bool> {
        if self.class_contains(node_id, class_name)? {
            self.class_remove(node_id, class_name)?;
            Ok(false)
        } else {
            self.class_add(node_id, class_name)?;
            Ok(true)
        }
    }

    pub(crate) fn style_property(&self, node_id: NodeId, name: &str) -> Option<String> {
        let decls = parse_style_declarations(self.attr(node_id, "style"));
        let name = name.to_ascii_lowercase();
        decls
            .into_iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value)
    }

    pub(crate) fn set_style_property(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let mut decls = parse_style_declarations(self.attr(node_id, "style"));
        let name = name.to_ascii_lowercase();
        if let Some(pos) = decls.iter().position(|(existing, _)| *existing == name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name, value.to_string()));
        }
        self.set_attr(node_id, "style", &serialize_style_declarations(&decls))
    }

    /// Replaces the whole inline style, normalizing the declaration list.
    pub(crate) fn set_style_text(&mut self, node_id: NodeId, css_text: &str) -> Result<()> {
        let decls = parse_style_declarations(Some(css_text));
        self.set_attr(node_id, "style", &serialize_style_declarations(&decls))
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insertion(parent, child, "appendChild")?;
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.rebuild_id_index();
        Ok(())
    }

    pub(crate) fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<()> {
        self.check_insertion(parent, child, "insertBefore")?;
        if child == reference {
            return Ok(());
        }
        if self.parent(reference) != Some(parent) {
            return Err(Error::Runtime(
                "insertBefore reference is not a child of the target".into(),
            ));
        }
        self.detach(child);
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|id| *id == reference)
            .ok_or_else(|| Error::Runtime("insertBefore reference vanished".into()))?;
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(pos, child);
        self.rebuild_id_index();
        Ok(())
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId, op: &str) -> Result<()> {
        if !self.can_have_children(parent) {
            return Err(Error::Runtime(format!("{op} target cannot have children")));
        }
        if child == self.root || child == parent || child.0 >= self.nodes.len() {
            return Err(Error::Runtime(format!("invalid {op} node")));
        }

        // Parent must not be inside child's subtree.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(Error::Runtime(format!("{op} would create a cycle")));
            }
            cursor = self.parent(node);
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.parent(child) {
            self.nodes[old_parent.0].children.retain(|id| *id != child);
        }
        self.nodes[child.0].parent = None;
    }

    fn can_have_children(&self, node_id: NodeId) -> bool {
        matches!(
            self.nodes.get(node_id.0).map(|n| &n.node_type),
            Some(NodeType::Document | NodeType::Element(_))
        )
    }

    pub(crate) fn is_connected(&self, node_id: NodeId) -> bool {
        let mut cursor = Some(node_id);
        while let Some(node) = cursor {
            if node == self.root {
                return true;
            }
            cursor = self.parent(node);
        }
        false
    }

    fn rebuild_id_index(&mut self) {
        let mut next = HashMap::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if let NodeType::Element(element) = &self.nodes[node.0].node_type {
                if let Some(id) = element.attr("id") {
                    if !id.is_empty() {
                        next.entry(id.to_string()).or_insert(node);
                    }
                }
            }
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        self.id_index = next;
    }

    pub(crate) fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        let mut stack = vec![node_id];
        while let Some(node) = stack.pop() {
            if matches!(self.nodes[node.0].node_type, NodeType::Element(_)) {
                out.push(node);
            }
            stack.extend(self.nodes[node.0].children.iter().rev());
        }
    }

    pub(crate) fn collect_element_descendants(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn document_element(&self) -> Option<NodeId> {
        self.children(self.root)
            .iter()
            .copied()
            .find(|id| self.is_tag(*id, "html"))
    }

    pub(crate) fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.element_children(html)
            .into_iter()
            .find(|id| self.is_tag(*id, "body"))
    }

    /// Makes sure the tree has an `<html>` root with a `<body>` child,
    /// moving loose top-level content inside them.
    pub(crate) fn ensure_document_structure(&mut self) -> Result<()> {
        let html = match self.document_element() {
            Some(html) => html,
            None => {
                let html = self.create_detached_element("html");
                let loose = self.children(self.root).to_vec();
                for node in loose {
                    self.append_child(html, node)?;
                }
                self.append_child(self.root, html)?;
                html
            }
        };

        if self.body().is_none() {
            let body = self.create_detached_element("body");
            let loose = self
                .children(html)
                .iter()
                .copied()
                .filter(|id| !self.is_tag(*id, "head"))
                .collect::<Vec<_>>();
            for node in loose {
                self.append_child(body, node)?;
            }
            self.append_child(html, body)?;
        }
        Ok(())
    }

    pub(crate) fn node_label(&self, node_id: NodeId) -> String {
        let Some(element) = self.element(node_id) else {
            return if node_id == self.root {
                "#document".into()
            } else {
                "#text".into()
            };
        };
        let mut label = element.tag_name.clone();
        if let Some(id) = element.attr("id").filter(|id| !id.is_empty()) {
            label.push('#');
            label.push_str(id);
        }
        for class_name in class_tokens(element.attr("class")) {
            label.push('.');
            label.push_str(&class_name);
        }
        label
    }

    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(node_id, &mut out);
        out
    }

    fn dump_into(&self, node_id: NodeId, out: &mut String) {
        let mut stack = vec![DumpStep::Open(node_id)];
        while let Some(step) = stack.pop() {
            let node_id = match step {
                DumpStep::Open(node_id) => node_id,
                DumpStep::Close(tag_name) => {
                    out.push_str("</");
                    out.push_str(tag_name);
                    out.push('>');
                    continue;
                }
            };
            match &self.nodes[node_id.0].node_type {
                NodeType::Document => {}
                NodeType::Text(text) => {
                    out.push_str(text);
                    continue;
                }
                NodeType::Element(element) => {
                    out.push('<');
                    out.push_str(&element.tag_name);
                    for (k, v) in &element.attrs {
                        out.push(' ');
                        out.push_str(k);
                        out.push_str("=\"");
                        out.push_str(v);
                        out.push('"');
                    }
                    out.push('>');
                    stack.push(DumpStep::Close(&element.tag_name));
                }
            }
            stack.extend(
                self.nodes[node_id.0]
                    .children
                    .iter()
                    .rev()
                    .map(|child| DumpStep::Open(*child)),
            );
        }
    }
}

enum DumpStep<'a> {
    Open(NodeId),
    Close(&'a str),
}

fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .map(|value| {
            value
                .split_whitespace()
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
}

fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.remove_attr("class");
    } else {
        element.set_attr("class", &classes.join(" "));
    }
}

fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    let Some(style_attr) = style_attr else {
        return out;
    };

    for decl in style_attr.split(';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            continue;
        }
        let value = value.trim().to_string();
        if let Some(pos) = out.iter().position(|(existing, _)| *existing == name) {
            out[pos].1 = value;
        } else {
            out.push((name, value));
        }
    }

    out
}

fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    let mut out = String::new();
    for (idx, (name, value)) in decls.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}
