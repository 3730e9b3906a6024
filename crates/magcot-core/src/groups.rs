//! Named element groups and their visibility toggles.
//!
//! Membership is fixed by the markup (`g--<name>` classes). The on/off
//! state lives here for the lifetime of the page; every group starts on.

use crate::id::GroupId;
use serde_json::Value;

/// Classes on a group button reflecting its state.
pub const GROUP_ON_CLASS: &str = "groupon";
pub const GROUP_OFF_CLASS: &str = "groupoff";
/// Class shared by every group button.
pub const GROUP_BUTTON_CLASS: &str = "grouptoggler";
/// Attribute holding the member count badge.
pub const BADGE_ATTR: &str = "elnumber";

/// Visibility of a group's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupState {
    #[default]
    On,
    Off,
}

impl GroupState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            GroupState::On => GroupState::Off,
            GroupState::Off => GroupState::On,
        }
    }

    /// CSS `visibility` value for the members.
    pub fn visibility(self) -> &'static str {
        match self {
            GroupState::On => "visible",
            GroupState::Off => "hidden",
        }
    }

    /// (class to add, class to remove) on the group button.
    pub fn button_classes(self) -> (&'static str, &'static str) {
        match self {
            GroupState::On => (GROUP_ON_CLASS, GROUP_OFF_CLASS),
            GroupState::Off => (GROUP_OFF_CLASS, GROUP_ON_CLASS),
        }
    }
}

/// One group as shown in the button field.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub members: usize,
    pub state: GroupState,
}

impl Group {
    fn new(id: GroupId, members: usize) -> Self {
        Self {
            id,
            members,
            state: GroupState::On,
        }
    }

    /// Badge text: the member count, or an ellipsis when it has more than
    /// `limit` members (the badge fits one digit).
    pub fn badge(&self, limit: usize) -> String {
        if self.members > limit {
            "…".to_string()
        } else {
            self.members.to_string()
        }
    }
}

/// All groups in button order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSet {
    groups: Vec<Group>,
}

impl GroupSet {
    /// Build from the generator's manifest: a JSON object mapping each group
    /// name to the list of its element ids, in declaration order.
    ///
    /// # Errors
    /// Returns a message if the manifest is not a JSON object.
    pub fn from_manifest(json: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| format!("bad group manifest: {e}"))?;
        let Value::Object(map) = value else {
            return Err("bad group manifest: expected an object".to_string());
        };
        let groups = map
            .iter()
            .map(|(name, members)| {
                let count = members.as_array().map_or(0, Vec::len);
                Group::new(GroupId::intern(name), count)
            })
            .collect();
        Ok(Self { groups })
    }

    /// Build from the class lists of all elements, in document order.
    /// Used when the page carries no manifest.
    pub fn from_classes<I, C, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for classes in elements {
            for token in classes {
                let Some(id) = GroupId::from_class(token.as_ref()) else {
                    continue;
                };
                match set.groups.iter_mut().find(|g| g.id == id) {
                    Some(group) => group.members += 1,
                    None => set.groups.push(Group::new(id, 1)),
                }
            }
        }
        set
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Flip a group. Returns the new state, `None` for unknown groups.
    pub fn toggle(&mut self, id: GroupId) -> Option<GroupState> {
        let group = self.groups.iter_mut().find(|g| g.id == id)?;
        group.state = group.state.toggled();
        log::debug!("group {} -> {:?}", id, group.state);
        Some(group.state)
    }
}
