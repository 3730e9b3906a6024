use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for group names.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Class prefix carried by every member of a group.
pub const GROUP_CLASS_PREFIX: &str = "g--";

/// Id prefix of the toggle button created for a group.
pub const GROUP_BUTTON_PREFIX: &str = "btn--";

/// An interned group name. 4 bytes, Copy, Eq, Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(Spur);

impl GroupId {
    /// Intern a group name, or return the existing id.
    pub fn intern(s: &str) -> Self {
        GroupId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to the bare group name.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Recover a group from a member class token such as `g--walls`.
    pub fn from_class(token: &str) -> Option<Self> {
        token
            .strip_prefix(GROUP_CLASS_PREFIX)
            .filter(|name| !name.is_empty())
            .map(Self::intern)
    }

    /// The class token shared by all members (`g--<name>`).
    pub fn member_class(&self) -> String {
        format!("{GROUP_CLASS_PREFIX}{}", self.as_str())
    }

    /// The element id of the toggle button (`btn--<name>`).
    pub fn button_id(&self) -> String {
        format!("{GROUP_BUTTON_PREFIX}{}", self.as_str())
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
