//! The document tree the viewer reads from and writes to.
//!
//! In the browser this is the DOM; tests use an in-memory tree. All
//! operations are infallible from the viewer's side: a backend that hits an
//! error logs it and carries on, matching the page's assume-valid posture.

/// Access to the page's nodes.
pub trait Surface {
    /// A handle to one node. Cheap to clone.
    type Node: Clone;

    fn by_id(&self, id: &str) -> Option<Self::Node>;

    /// All nodes carrying `class`, in document order.
    fn by_class(&self, class: &str) -> Vec<Self::Node>;

    /// Descendants of `parent` carrying `class`, in document order.
    fn by_class_within(&self, parent: &Self::Node, class: &str) -> Vec<Self::Node>;

    /// First descendant of `parent` with the given tag name.
    fn first_by_tag(&self, parent: &Self::Node, tag: &str) -> Option<Self::Node>;

    /// The node's `id`, empty when it has none.
    fn node_id(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    /// The node's class tokens.
    fn classes(&self, node: &Self::Node) -> Vec<String>;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Set an inline style property (CSS property name, e.g. `z-index`).
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// The text the user sees in the node.
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);

    fn inner_html(&self, node: &Self::Node) -> String;
    fn set_inner_html(&self, node: &Self::Node, html: &str);

    /// Create a `div` with the given id and classes as the last child of
    /// `parent`.
    fn append_div(&self, parent: &Self::Node, id: &str, classes: &[&str]) -> Option<Self::Node>;

    /// A page-level global serialized as JSON, if the page defines it.
    fn global_json(&self, name: &str) -> Option<String>;
}
