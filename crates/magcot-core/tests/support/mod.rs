//! In-memory document tree for driving the viewer without a browser.

#![allow(dead_code)]

use magcot_core::Surface;
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct MemNode {
    pub id: String,
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
    pub html: String,
    pub children: Vec<usize>,
}

/// Nodes in creation order; index 0 is the body. Clones share the tree.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    nodes: Rc<RefCell<Vec<MemNode>>>,
    globals: BTreeMap<String, String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        let surface = Self::default();
        surface.nodes.borrow_mut().push(MemNode {
            tag: "body".into(),
            ..MemNode::default()
        });
        surface
    }

    pub fn body(&self) -> usize {
        0
    }

    pub fn add(&self, parent: usize, tag: &str, id: &str, classes: &[&str]) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        let idx = nodes.len();
        nodes.push(MemNode {
            id: id.to_string(),
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..MemNode::default()
        });
        nodes[parent].children.push(idx);
        idx
    }

    pub fn set_global(&mut self, name: &str, json: &str) {
        self.globals.insert(name.to_string(), json.to_string());
    }

    pub fn node(&self, idx: usize) -> MemNode {
        self.nodes.borrow()[idx].clone()
    }

    pub fn style(&self, idx: usize, property: &str) -> Option<String> {
        self.nodes.borrow()[idx].styles.get(property).cloned()
    }

    pub fn has_class(&self, idx: usize, class: &str) -> bool {
        self.nodes.borrow()[idx].classes.iter().any(|c| c == class)
    }

    pub fn id_of(&self, id: &str) -> usize {
        self.by_id(id)
            .unwrap_or_else(|| panic!("no node #{id} in the test page"))
    }

    fn descendants(&self, parent: usize, out: &mut Vec<usize>) {
        let children = self.nodes.borrow()[parent].children.clone();
        for child in children {
            out.push(child);
            self.descendants(child, out);
        }
    }

    /// Turn `<div class="a b">text</div>` runs into child nodes, which is all
    /// the markup the viewer writes into the info panel.
    fn parse_divs(&self, parent: usize, html: &str) {
        let mut rest = html;
        while let Some(start) = rest.find(r#"<div class=""#) {
            rest = &rest[start + r#"<div class=""#.len()..];
            let Some(end_class) = rest.find(r#"">"#) else {
                break;
            };
            let classes: Vec<&str> = rest[..end_class].split_whitespace().collect();
            rest = &rest[end_class + 2..];
            let Some(end) = rest.find("</div>") else {
                break;
            };
            let content = rest[..end].to_string();
            rest = &rest[end..];
            let idx = self.add(parent, "div", "", &classes);
            let mut nodes = self.nodes.borrow_mut();
            nodes[idx].text = content.clone();
            nodes[idx].html = content;
        }
    }
}

fn strip_tags(html: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

impl Surface for MemorySurface {
    type Node = usize;

    fn by_id(&self, id: &str) -> Option<usize> {
        self.nodes.borrow().iter().position(|n| n.id == id)
    }

    fn by_class(&self, class: &str) -> Vec<usize> {
        let mut all = Vec::new();
        self.descendants(self.body(), &mut all);
        all.into_iter().filter(|&i| self.has_class(i, class)).collect()
    }

    fn by_class_within(&self, parent: &usize, class: &str) -> Vec<usize> {
        let mut all = Vec::new();
        self.descendants(*parent, &mut all);
        all.into_iter().filter(|&i| self.has_class(i, class)).collect()
    }

    fn first_by_tag(&self, parent: &usize, tag: &str) -> Option<usize> {
        let mut all = Vec::new();
        self.descendants(*parent, &mut all);
        all.into_iter().find(|&i| self.nodes.borrow()[i].tag == tag)
    }

    fn node_id(&self, node: &usize) -> String {
        self.nodes.borrow()[*node].id.clone()
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &usize, name: &str, value: &str) {
        self.nodes.borrow_mut()[*node]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, node: &usize, name: &str) {
        self.nodes.borrow_mut()[*node].attrs.remove(name);
    }

    fn classes(&self, node: &usize) -> Vec<String> {
        self.nodes.borrow()[*node].classes.clone()
    }

    fn add_class(&self, node: &usize, class: &str) {
        if !self.has_class(*node, class) {
            self.nodes.borrow_mut()[*node].classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &usize, class: &str) {
        self.nodes.borrow_mut()[*node].classes.retain(|c| c != class);
    }

    fn set_style(&self, node: &usize, property: &str, value: &str) {
        self.nodes.borrow_mut()[*node]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn text(&self, node: &usize) -> String {
        self.nodes.borrow()[*node].text.clone()
    }

    fn set_text(&self, node: &usize, text: &str) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[*node].text = text.to_string();
        nodes[*node].html = text.to_string();
        nodes[*node].children.clear();
    }

    fn inner_html(&self, node: &usize) -> String {
        self.nodes.borrow()[*node].html.clone()
    }

    fn set_inner_html(&self, node: &usize, html: &str) {
        {
            let mut nodes = self.nodes.borrow_mut();
            nodes[*node].html = html.to_string();
            nodes[*node].text = strip_tags(html);
            nodes[*node].children.clear();
        }
        self.parse_divs(*node, html);
    }

    fn append_div(&self, parent: &usize, id: &str, classes: &[&str]) -> Option<usize> {
        Some(self.add(*parent, "div", id, classes))
    }

    fn global_json(&self, name: &str) -> Option<String> {
        self.globals.get(name).cloned()
    }
}

// ─── Page fixtures ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PageFixture {
    #[serde(default)]
    groups: Option<serde_json::Value>,
    textures: Vec<TextureFixture>,
}

#[derive(Debug, Deserialize)]
struct TextureFixture {
    data: serde_json::Value,
    #[serde(default)]
    elements: Vec<ElementFixture>,
}

#[derive(Debug, Deserialize)]
struct ElementFixture {
    id: String,
    classes: Vec<String>,
    symbol: String,
    data: serde_json::Value,
    #[serde(default)]
    onclick: Option<String>,
}

/// Build the viewer page skeleton plus the textures and elements described
/// by a JSON fixture.
pub fn page_from_fixture(json: &str) -> MemorySurface {
    let fixture: PageFixture = serde_json::from_str(json).expect("bad page fixture");
    let mut surface = MemorySurface::new();
    let body = surface.body();

    let area = surface.add(body, "div", "displayarea", &[]);
    let display = surface.add(area, "div", "display", &[]);
    surface.add(body, "div", "texnameframe", &[]);
    let prev = surface.add(body, "div", "texprev", &["texnav"]);
    let next = surface.add(body, "div", "texnext", &["texnav"]);
    surface.set_attribute(&prev, "onclick", "prevTex()");
    surface.set_attribute(&next, "onclick", "nextTex()");
    surface.add(body, "div", "buttonfield", &[]);
    surface.add(body, "div", "info", &[]);

    for tex in fixture.textures {
        let wrapper = surface.add(display, "div", "", &["texwrap"]);
        surface.set_attribute(&wrapper, "data", &tex.data.to_string());
        surface.add(wrapper, "img", "", &[]);
        for el in tex.elements {
            let classes: Vec<&str> = el.classes.iter().map(String::as_str).collect();
            let node = surface.add(wrapper, "div", &el.id, &classes);
            surface.set_attribute(&node, "data", &el.data.to_string());
            surface.set_text(&node, &el.symbol);
            if let Some(handler) = el.onclick {
                surface.set_attribute(&node, "onclick", &handler);
            }
        }
    }

    if let Some(groups) = fixture.groups {
        surface.set_global("allGroupData", &groups.to_string());
    }
    surface
}
