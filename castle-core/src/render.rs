//! Popover content and visibility.
//!
//! [`PopoverView`] is the model the UI paints: a title, the rows for the
//! fields a target actually has, the hidden flag behind `aria-hidden`, and
//! the last placement behind `data-placement`. Rows carry raw values only;
//! the icon in front of each row is the only hint of what the value is.

use crate::geometry::{Point, Size};
use crate::placement::{place, Placement, PlacementInput};
use crate::target::Target;
use crate::viewport::{reconcile, ScrollDelta};

/// Turns icon placeholders into glyphs, `lucide.createIcons()` in the webview.
///
/// Must be idempotent and cheap when there is nothing to do.
pub trait IconMaterializer {
    fn materialize(&self);
}

/// Icon shown in front of a popover row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIcon {
    Home,
    Briefcase,
    StickyNote,
}

impl RowIcon {
    /// Lucide icon name for the `data-lucide` placeholder.
    pub const fn lucide_name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Briefcase => "briefcase",
            Self::StickyNote => "sticky-note",
        }
    }
}

/// One body row of the popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverRow {
    pub icon: RowIcon,
    pub value: String,
}

/// Title and body rows for one target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopoverContent {
    pub title: String,
    pub rows: Vec<PopoverRow>,
}

impl PopoverContent {
    /// Build the content for `target`: address, work, notes, in that order,
    /// skipping absent fields.
    pub fn for_target(target: &Target) -> Self {
        let rows = [
            (RowIcon::Home, &target.address),
            (RowIcon::Briefcase, &target.work),
            (RowIcon::StickyNote, &target.notes),
        ]
        .into_iter()
        .filter_map(|(icon, value)| {
            value.as_ref().map(|value| PopoverRow {
                icon,
                value: value.clone(),
            })
        })
        .collect();

        Self {
            title: target.title.clone(),
            rows,
        }
    }

    /// All visible text, title first.
    pub fn text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.rows.iter().map(|row| row.value.as_str()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of laying out the popover: where it goes and how far to scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub placement: Placement,
    pub scroll: ScrollDelta,
}

/// Paint model of the single popover.
#[derive(Debug, Clone, PartialEq)]
pub struct PopoverView {
    content: PopoverContent,
    hidden: bool,
    placement: Option<Placement>,
}

impl Default for PopoverView {
    fn default() -> Self {
        Self {
            content: PopoverContent::default(),
            hidden: true,
            placement: None,
        }
    }
}

impl PopoverView {
    pub fn content(&self) -> &PopoverContent {
        &self.content
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Replace the content with `target`'s and show the popover.
    ///
    /// The previous placement is dropped: new content can change the size,
    /// so the popover stays invisible until it is measured and placed again.
    pub fn render(&mut self, target: &Target) {
        self.content = PopoverContent::for_target(target);
        self.placement = None;
        self.show();
    }

    /// Whether the popover is shown but still waiting for its placement.
    pub fn is_measuring(&self) -> bool {
        !self.hidden && self.placement.is_none()
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    /// Hide the popover. Content stays until the next render.
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Place the popover from measured geometry and compute the scroll that
    /// keeps it and its anchor in view.
    ///
    /// `input` must carry the popover size measured after icons were
    /// materialized; `viewport` is the window's inner size.
    pub fn layout(&mut self, input: &PlacementInput, viewport: Size) -> Layout {
        let placement = place(input);
        self.placement = Some(placement);

        let popover = placement.viewport_rect(&input.container, input.popover);
        let anchor: Point = input.anchor.center();
        Layout {
            placement,
            scroll: reconcile(&popover, anchor, viewport),
        }
    }

    /// `aria-hidden` attribute value.
    pub fn aria_hidden(&self) -> &'static str {
        if self.hidden {
            "true"
        } else {
            "false"
        }
    }

    /// `data-placement` attribute value; `None` leaves the attribute off
    /// until the popover has been placed.
    pub fn data_placement(&self) -> Option<&'static str> {
        self.placement.map(|placement| placement.side.as_str())
    }
}
