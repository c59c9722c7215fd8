//! Sidebar menu model.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Dashboard,
    Catalog,
    Brand,
    Model,
    People,
    User,
    Vendor,
    Order,
    Profile,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Dashboard => "▦",
            Icon::Catalog => "☰",
            Icon::Brand => "◆",
            Icon::Model => "◇",
            Icon::People => "☷",
            Icon::User => "☺",
            Icon::Vendor => "⚑",
            Icon::Order => "▤",
            Icon::Profile => "☻",
        }
    }
}

/// One menu entry. A link always has a path; a group never does and only
/// toggles its children.
#[derive(Debug, Clone, PartialEq)]
pub enum NavItem {
    Link {
        title: String,
        path: String,
        icon: Icon,
        info: Option<String>,
    },
    Group {
        title: String,
        icon: Icon,
        info: Option<String>,
        children: Vec<NavItem>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveState {
    Inactive,
    /// The item's own path is the current path.
    Active,
    /// Some descendant is active.
    ChildActive,
}

impl NavItem {
    pub fn link(title: impl Into<String>, path: impl Into<String>, icon: Icon) -> Self {
        NavItem::Link {
            title: title.into(),
            path: path.into(),
            icon,
            info: None,
        }
    }

    pub fn group(title: impl Into<String>, icon: Icon, children: Vec<NavItem>) -> Self {
        NavItem::Group {
            title: title.into(),
            icon,
            info: None,
            children,
        }
    }

    /// Attach a badge.
    pub fn with_info(mut self, badge: impl Into<String>) -> Self {
        match &mut self {
            NavItem::Link { info, .. } | NavItem::Group { info, .. } => *info = Some(badge.into()),
        }
        self
    }

    pub fn title(&self) -> &str {
        match self {
            NavItem::Link { title, .. } | NavItem::Group { title, .. } => title,
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            NavItem::Link { icon, .. } | NavItem::Group { icon, .. } => *icon,
        }
    }

    pub fn info(&self) -> Option<&str> {
        match self {
            NavItem::Link { info, .. } | NavItem::Group { info, .. } => info.as_deref(),
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            NavItem::Link { path, .. } => Some(path),
            NavItem::Group { .. } => None,
        }
    }

    pub fn children(&self) -> &[NavItem] {
        match self {
            NavItem::Link { .. } => &[],
            NavItem::Group { children, .. } => children,
        }
    }

    /// Whether the item renders an expand/collapse affordance.
    pub fn has_toggle(&self) -> bool {
        matches!(self, NavItem::Group { .. })
    }

    /// Exact path comparison; `/admin/orders` does not activate `/admin`.
    pub fn active_state(&self, current_path: &str) -> ActiveState {
        match self {
            NavItem::Link { path, .. } if path == current_path => ActiveState::Active,
            NavItem::Link { .. } => ActiveState::Inactive,
            NavItem::Group { children, .. } => {
                if children
                    .iter()
                    .any(|child| child.active_state(current_path) != ActiveState::Inactive)
                {
                    ActiveState::ChildActive
                } else {
                    ActiveState::Inactive
                }
            }
        }
    }

    /// Groups open themselves when they contain the current page, except in
    /// the collapsed rail where submenus are not rendered at all.
    pub fn should_auto_expand(&self, current_path: &str, collapsed: bool) -> bool {
        !collapsed && self.active_state(current_path) == ActiveState::ChildActive
    }

    fn validate(&self, trail: &str) -> Result<()> {
        let here = if trail.is_empty() {
            self.title().to_string()
        } else {
            format!("{trail} > {}", self.title())
        };

        if self.title().trim().is_empty() {
            return Err(Error::InvalidMenu(format!("{here}: empty title")));
        }

        match self {
            NavItem::Link { path, .. } => {
                if !path.starts_with('/') {
                    return Err(Error::InvalidMenu(format!(
                        "{here}: path '{path}' must be absolute"
                    )));
                }
            }
            NavItem::Group { children, .. } => {
                if children.is_empty() {
                    return Err(Error::InvalidMenu(format!("{here}: group has no children")));
                }
                for child in children {
                    child.validate(&here)?;
                }
            }
        }
        Ok(())
    }
}

/// A validated, non-empty menu.
#[derive(Debug, Clone, PartialEq)]
pub struct NavMenu {
    items: Vec<NavItem>,
}

impl NavMenu {
    pub fn new(items: Vec<NavItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::InvalidMenu("menu has no items".into()));
        }
        for item in &items {
            item.validate("")?;
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Every link in menu order, flattened out of their groups.
    pub fn links(&self) -> Vec<&NavItem> {
        fn collect<'a>(items: &'a [NavItem], out: &mut Vec<&'a NavItem>) {
            for item in items {
                match item {
                    NavItem::Link { .. } => out.push(item),
                    NavItem::Group { children, .. } => collect(children, out),
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.items, &mut out);
        out
    }

    /// Titles from the top-level entry down to the active link, or empty when
    /// nothing in the menu matches.
    pub fn active_trail(&self, current_path: &str) -> Vec<&str> {
        let mut trail = Vec::new();
        let mut level = self.items.as_slice();
        while let Some(item) = level
            .iter()
            .find(|item| item.active_state(current_path) != ActiveState::Inactive)
        {
            trail.push(item.title());
            level = item.children();
        }
        trail
    }
}
