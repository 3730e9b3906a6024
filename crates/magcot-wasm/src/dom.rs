//! `Surface` over the browser DOM.

use magcot_core::Surface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCollection, HtmlElement};

/// The live page. Cloning shares the same document.
#[derive(Clone)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn collect(collection: &HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

fn report(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("{op} failed: {e:?}");
    }
}

impl Surface for DomSurface {
    type Node = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn by_class(&self, class: &str) -> Vec<Element> {
        collect(&self.document.get_elements_by_class_name(class))
    }

    fn by_class_within(&self, parent: &Element, class: &str) -> Vec<Element> {
        collect(&parent.get_elements_by_class_name(class))
    }

    fn first_by_tag(&self, parent: &Element, tag: &str) -> Option<Element> {
        parent.get_elements_by_tag_name(tag).item(0)
    }

    fn node_id(&self, node: &Element) -> String {
        node.id()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        report("setAttribute", node.set_attribute(name, value));
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        report("removeAttribute", node.remove_attribute(name));
    }

    fn classes(&self, node: &Element) -> Vec<String> {
        let list = node.class_list();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn add_class(&self, node: &Element, class: &str) {
        report("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&self, node: &Element, class: &str) {
        report("classList.remove", node.class_list().remove_1(class));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        match node.dyn_ref::<HtmlElement>() {
            Some(el) => report("style.setProperty", el.style().set_property(property, value)),
            None => log::warn!("cannot style non-HTML element #{}", node.id()),
        }
    }

    fn text(&self, node: &Element) -> String {
        match node.dyn_ref::<HtmlElement>() {
            Some(el) => el.inner_text(),
            None => node.text_content().unwrap_or_default(),
        }
    }

    fn set_text(&self, node: &Element, text: &str) {
        match node.dyn_ref::<HtmlElement>() {
            Some(el) => el.set_inner_text(text),
            None => node.set_text_content(Some(text)),
        }
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn append_div(&self, parent: &Element, id: &str, classes: &[&str]) -> Option<Element> {
        let div = match self.document.create_element("div") {
            Ok(div) => div,
            Err(e) => {
                log::warn!("createElement failed: {e:?}");
                return None;
            }
        };
        div.set_id(id);
        for class in classes {
            report("classList.add", div.class_list().add_1(class));
        }
        if let Err(e) = parent.append_child(&div) {
            log::warn!("appendChild failed: {e:?}");
            return None;
        }
        Some(div)
    }

    fn global_json(&self, name: &str) -> Option<String> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        js_sys::JSON::stringify(&value).ok().map(String::from)
    }
}
