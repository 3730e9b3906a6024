//! The viewer: one layout pass at load, then event-driven updates.
//!
//! `Viewer::boot` reads every texture and element from the surface, picks
//! the magnification, places everything and builds the group buttons. The
//! remaining methods are the handlers for user events: stepping through
//! textures, toggling groups, and showing a marker's details.

use crate::config::ViewerConfig;
use crate::groups::{
    BADGE_ATTR, GROUP_BUTTON_CLASS, GROUP_OFF_CLASS, GROUP_ON_CLASS, GroupSet, GroupState,
};
use crate::id::GroupId;
use crate::info::{COPYABLE_CLASS, render_info};
use crate::layout::{
    DisplayPlan, Placement, area_placement, compute_magnification, grid_size, point_placement,
    px, texture_image_size, z_order,
};
use crate::model::{DATA_ATTR, MarkerData, MarkerKind, TextureEntry, parse_data_or_default};
use crate::pager::{TexturePager, nav_class, truncate_label};
use crate::surface::Surface;

/// Wrapper around each texture `<img>` and its markers.
pub const TEXTURE_CLASS: &str = "texwrap";
/// Every annotated element.
pub const ELEMENT_CLASS: &str = "element";
/// Patches, clippable patches and grids.
pub const AREA_CLASS: &str = "area";
/// Page global listing group members.
pub const GROUP_MANIFEST: &str = "allGroupData";
/// Inline handler attribute left by the page generator.
const INLINE_HANDLER_ATTR: &str = "onclick";

pub struct Viewer<S: Surface> {
    surface: S,
    config: ViewerConfig,
    plan: DisplayPlan,
    textures: Vec<TextureEntry>,
    texture_nodes: Vec<S::Node>,
    pager: TexturePager,
    groups: GroupSet,
    group_buttons: Vec<(GroupId, S::Node)>,
}

impl<S: Surface> Viewer<S> {
    /// Run the load-time layout pass over the surface.
    pub fn boot(surface: S, config: ViewerConfig) -> Self {
        let texture_nodes = surface.by_class(TEXTURE_CLASS);
        let textures: Vec<TextureEntry> = texture_nodes
            .iter()
            .map(|node| parse_data_or_default(surface.attribute(node, DATA_ATTR).as_deref()))
            .collect();
        let plan = compute_magnification(&textures, config.display_margin);
        let groups = load_groups(&surface);

        let mut viewer = Self {
            pager: TexturePager::new(textures.len()),
            surface,
            config,
            plan,
            textures,
            texture_nodes,
            groups,
            group_buttons: Vec::new(),
        };

        viewer.stretch_display();
        viewer.size_textures();
        viewer.place_elements();
        viewer.add_group_buttons();
        viewer.strip_inline_handlers();
        viewer.refresh_display_area();

        log::info!(
            "viewer ready: {} textures, {} groups, x{}",
            viewer.textures.len(),
            viewer.groups.len(),
            viewer.plan.factor
        );
        viewer
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn plan(&self) -> &DisplayPlan {
        &self.plan
    }

    pub fn magnification(&self) -> f64 {
        self.plan.factor
    }

    pub fn textures(&self) -> &[TextureEntry] {
        &self.textures
    }

    pub fn pager(&self) -> &TexturePager {
        &self.pager
    }

    pub fn active_texture(&self) -> Option<&TextureEntry> {
        self.textures.get(self.pager.pointer())
    }

    pub fn groups(&self) -> &GroupSet {
        &self.groups
    }

    /// Group buttons created at boot, in button order.
    pub fn group_buttons(&self) -> &[(GroupId, S::Node)] {
        &self.group_buttons
    }

    /// The `prev` and `next` buttons, when the page has them.
    pub fn nav_buttons(&self) -> (Option<S::Node>, Option<S::Node>) {
        (
            self.surface.by_id(&self.config.ids.prev),
            self.surface.by_id(&self.config.ids.next),
        )
    }

    /// Every clickable marker with its kind.
    pub fn markers(&self) -> Vec<(S::Node, MarkerKind)> {
        MarkerKind::ALL
            .into_iter()
            .flat_map(|kind| {
                self.surface
                    .by_class(kind.class())
                    .into_iter()
                    .map(move |node| (node, kind))
            })
            .collect()
    }

    /// Copyable regions present anywhere in the page.
    pub fn copyables(&self) -> Vec<S::Node> {
        self.surface.by_class(COPYABLE_CLASS)
    }

    /// Snapshot of the interaction state:
    /// `{"texture", "index", "count", "magnification", "groups": [{"name", "on"}]}`.
    /// `texture` is `null` when the page has none.
    pub fn state(&self) -> serde_json::Value {
        let groups: Vec<serde_json::Value> = self
            .groups
            .iter()
            .map(|g| {
                serde_json::json!({
                    "name": g.id.as_str(),
                    "on": g.state == GroupState::On,
                })
            })
            .collect();
        serde_json::json!({
            "texture": self.active_texture().map(|t| t.path.as_str()),
            "index": self.pager.pointer(),
            "count": self.pager.count(),
            "magnification": self.plan.factor,
            "groups": groups,
        })
    }

    // ─── Events ──────────────────────────────────────────────────────────

    pub fn prev_texture(&mut self) -> bool {
        let moved = self.pager.prev();
        if moved {
            self.refresh_display_area();
        }
        moved
    }

    pub fn next_texture(&mut self) -> bool {
        let moved = self.pager.next();
        if moved {
            self.refresh_display_area();
        }
        moved
    }

    /// Flip a group's visibility. Returns the new state, `None` if no such
    /// group exists.
    pub fn toggle_group(&mut self, id: GroupId) -> Option<GroupState> {
        let state = self.groups.toggle(id)?;
        for member in self.surface.by_class(&id.member_class()) {
            self.surface.set_style(&member, "visibility", state.visibility());
        }
        if let Some((_, button)) = self.group_buttons.iter().find(|(gid, _)| *gid == id) {
            let (add, remove) = state.button_classes();
            self.surface.remove_class(button, remove);
            self.surface.add_class(button, add);
        }
        Some(state)
    }

    /// Render a marker's details into the info panel, replacing what was
    /// there. Returns the copyable regions of the new content.
    pub fn show_info(&self, node: &S::Node) -> Vec<S::Node> {
        let classes = self.surface.classes(node);
        let Some(kind) = MarkerKind::from_classes(classes.iter().map(String::as_str)) else {
            log::debug!("clicked node is not a marker");
            return Vec::new();
        };
        let Some(panel) = self.surface.by_id(&self.config.ids.info) else {
            log::warn!("no info panel #{}", self.config.ids.info);
            return Vec::new();
        };
        let data: MarkerData =
            parse_data_or_default(self.surface.attribute(node, DATA_ATTR).as_deref());
        let html = render_info(
            &self.surface.node_id(node),
            &self.surface.text(node),
            kind,
            &data,
        );
        self.surface.set_inner_html(&panel, &html);
        self.surface.by_class_within(&panel, COPYABLE_CLASS)
    }

    // ─── Layout pass ─────────────────────────────────────────────────────

    fn apply(&self, node: &S::Node, placement: &Placement) {
        for (property, value) in placement {
            self.surface.set_style(node, property, value);
        }
    }

    fn stretch_display(&self) {
        let ids = &self.config.ids;
        if let (Some(width), Some(display)) =
            (self.plan.display_width, self.surface.by_id(&ids.display))
        {
            self.surface.set_style(&display, "width", &px(width));
        }
        if let (Some(width), Some(area)) =
            (self.plan.area_width, self.surface.by_id(&ids.display_area))
        {
            self.surface.set_style(&area, "width", &px(width));
        }
    }

    fn size_textures(&self) {
        for (node, tex) in self.texture_nodes.iter().zip(&self.textures) {
            match self.surface.first_by_tag(node, "img") {
                Some(img) => self.apply(&img, &texture_image_size(tex, &self.plan)),
                None => log::warn!("texture {} has no image", tex.path),
            }
        }
    }

    fn place_elements(&self) {
        let data_of = |node: &S::Node| -> MarkerData {
            parse_data_or_default(self.surface.attribute(node, DATA_ATTR).as_deref())
        };
        for node in self.surface.by_class(ELEMENT_CLASS) {
            self.apply(&node, &z_order(&data_of(&node)));
        }
        for node in self.surface.by_class(MarkerKind::Point.class()) {
            self.apply(&node, &point_placement(&data_of(&node), &self.plan));
        }
        for node in self.surface.by_class(AREA_CLASS) {
            self.apply(&node, &area_placement(&data_of(&node), &self.plan));
        }
        // after the area pass: grids carry no w/h of their own
        for node in self.surface.by_class(MarkerKind::Grid.class()) {
            self.apply(&node, &grid_size(&data_of(&node), &self.plan));
        }
        log::trace!("elements placed at x{}", self.plan.factor);
    }

    fn add_group_buttons(&mut self) {
        let Some(field) = self.surface.by_id(&self.config.ids.button_field) else {
            log::warn!("no button field #{}", self.config.ids.button_field);
            return;
        };
        for group in self.groups.iter() {
            let button = match self.surface.by_id(&group.id.button_id()) {
                // left by an earlier boot of the same page
                Some(existing) => {
                    self.surface.remove_class(&existing, GROUP_OFF_CLASS);
                    self.surface.add_class(&existing, GROUP_ON_CLASS);
                    for member in self.surface.by_class(&group.id.member_class()) {
                        self.surface
                            .set_style(&member, "visibility", GroupState::On.visibility());
                    }
                    existing
                }
                None => match self.surface.append_div(
                    &field,
                    &group.id.button_id(),
                    &[GROUP_BUTTON_CLASS, GROUP_ON_CLASS],
                ) {
                    Some(button) => button,
                    None => continue,
                },
            };
            self.surface.set_text(&button, group.id.as_str());
            self.surface
                .set_attribute(&button, BADGE_ATTR, &group.badge(self.config.badge_limit));
            self.group_buttons.push((group.id, button));
        }
    }

    fn strip_inline_handlers(&self) {
        let (prev, next) = self.nav_buttons();
        let markers = self.markers().into_iter().map(|(node, _)| node);
        for node in markers.chain(prev).chain(next) {
            self.surface.remove_attribute(&node, INLINE_HANDLER_ATTR);
        }
    }

    /// Show the active texture only, update its label and the nav buttons.
    fn refresh_display_area(&self) {
        for (i, node) in self.texture_nodes.iter().enumerate() {
            let display = if self.pager.is_active(i) { "block" } else { "none" };
            self.surface.set_style(node, "display", display);
        }

        if let (Some(tex), Some(frame)) = (
            self.active_texture(),
            self.surface.by_id(&self.config.ids.name_frame),
        ) {
            self.surface
                .set_text(&frame, &truncate_label(&tex.path, self.config.name_limit));
        }

        let (prev, next) = self.nav_buttons();
        for (button, enabled) in [(prev, self.pager.can_prev()), (next, self.pager.can_next())] {
            if let Some(button) = button {
                let (add, remove) = nav_class(enabled);
                self.surface.remove_class(&button, remove);
                self.surface.add_class(&button, add);
            }
        }
    }
}

/// Groups from the page manifest, or from member classes without one.
fn load_groups<S: Surface>(surface: &S) -> GroupSet {
    if let Some(json) = surface.global_json(GROUP_MANIFEST) {
        match GroupSet::from_manifest(&json) {
            Ok(set) => return set,
            Err(e) => log::warn!("{e}; deriving groups from classes"),
        }
    }
    let elements = surface.by_class(ELEMENT_CLASS);
    GroupSet::from_classes(elements.iter().map(|node| surface.classes(node)))
}
