//! Inline SVG icons.

use super::node::Element;

/// Icons used by the shell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    /// Hamburger menu
    Menu,
    /// Downward caret (account selector closed)
    DropDown,
    /// Upward caret (account selector open)
    DropUp,
}

impl Icon {
    /// Name used in the `icon` attribute
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::DropDown => "drop-down",
            Self::DropUp => "drop-up",
        }
    }

    /// Path data
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Menu => "M3 18h18v-2H3v2zm0-5h18v-2H3v2zm0-7v2h18V6H3z",
            Self::DropDown => "M7 10l5 5 5-5z",
            Self::DropUp => "M7 14l5-5 5 5z",
        }
    }

    /// The icon as an `svg` element
    #[must_use]
    pub fn svg(self) -> Element {
        Element::new("svg")
            .attr("icon", self.name())
            .attr("height", "24")
            .attr("width", "24")
            .attr("viewBox", "0 0 24 24")
            .child(Element::new("path").attr("d", self.path()))
    }
}
