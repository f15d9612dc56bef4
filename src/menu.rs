//! Overflow menu.
//!
//! The header's "more" button opens a popover listing actions for the page
//! currently shown: open it in the system browser, copy its link, and any
//! extra items the host registers. Picking an item resolves to a
//! [`MenuAction`] for the caller to perform and always dismisses the menu.
//!
//! Items are separated by dividers:
//!
//! ```text
//! ┌──────────────────┐
//! │ Open on Browser  │
//! ├──────────────────┤
//! │ Copy Link        │
//! ├──────────────────┤
//! │ <extra item 0>   │
//! └──────────────────┘
//! ```

use crate::error::{OverlayError, OverlayResult};
use crate::geometry::{Point, Rect, Size};
use crate::popover::{Popover, PopoverConfig, ScheduledAnimation, Visibility};
use crate::{debug_log, trace_log};
use gpui::App;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Handler run when an extra menu item is picked.
pub type MenuItemHandler = Arc<dyn Fn(&mut App) + Send + Sync>;

/// Host-provided menu entry appended after the built-in ones.
#[derive(Clone)]
pub struct ExtraMenuItem {
    pub title: String,
    pub on_select: Option<MenuItemHandler>,
}

impl ExtraMenuItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            on_select: None,
        }
    }

    /// Set the handler run when the item is picked.
    pub fn on_select<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut App) + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(handler));
        self
    }

    /// Run the handler, if any.
    pub fn run(&self, cx: &mut App) {
        if let Some(handler) = &self.on_select {
            handler(cx);
        }
    }
}

impl fmt::Debug for ExtraMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraMenuItem")
            .field("title", &self.title)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

/// What a menu row does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemKind {
    OpenInBrowser,
    CopyLink,
    /// Index into the extra items
    Extra(usize),
}

/// One row of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub kind: MenuItemKind,
}

/// Result of picking a menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Open the URL with the system handler
    OpenUrl(String),
    /// Put the URL on the clipboard
    CopyToClipboard(String),
    /// Run the extra item at this index
    Extra(usize),
}

/// A picked action plus the dismissal it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSelection {
    pub action: MenuAction,
    pub hide: Option<ScheduledAnimation>,
}

/// Overflow menu: its rows and the popover that shows them.
pub struct OverflowMenu {
    url: String,
    items: Vec<MenuItem>,
    extras: Vec<ExtraMenuItem>,
    popover: Popover,
}

impl OverflowMenu {
    pub fn new(
        url: impl Into<String>,
        open_browser_title: impl Into<String>,
        copy_link_title: impl Into<String>,
        extras: Vec<ExtraMenuItem>,
        popover: PopoverConfig,
        viewport: Size,
    ) -> Self {
        let mut items = vec![
            MenuItem {
                label: open_browser_title.into(),
                kind: MenuItemKind::OpenInBrowser,
            },
            MenuItem {
                label: copy_link_title.into(),
                kind: MenuItemKind::CopyLink,
            },
        ];
        items.extend(extras.iter().enumerate().map(|(i, extra)| MenuItem {
            label: extra.title.clone(),
            kind: MenuItemKind::Extra(i),
        }));

        Self {
            url: url.into(),
            items,
            extras,
            popover: Popover::new(popover, viewport),
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn extra(&self, index: usize) -> Option<&ExtraMenuItem> {
        self.extras.get(index)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Point the menu actions at a new page.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn popover(&self) -> &Popover {
        &self.popover
    }

    pub fn popover_mut(&mut self) -> &mut Popover {
        &mut self.popover
    }

    /// Open the menu from the trigger button's rectangle.
    pub fn open(&mut self, trigger: Rect) -> bool {
        self.popover.show(trigger)
    }

    pub fn close(&mut self, now: Instant) -> Option<ScheduledAnimation> {
        self.popover.hide(now)
    }

    /// Whether rows currently accept presses.
    pub fn is_interactive(&self) -> bool {
        self.popover.visibility() != Visibility::Hidden && !self.popover.is_exiting()
    }

    /// Pick row `index`. Returns `None` if the menu is not interactive or the
    /// index is out of range.
    pub fn select(&mut self, index: usize, now: Instant) -> Option<MenuSelection> {
        if !self.is_interactive() {
            trace_log!("Menu selection {} ignored: menu not interactive", index);
            return None;
        }
        let item = self.items.get(index)?;
        let action = match item.kind {
            MenuItemKind::OpenInBrowser => MenuAction::OpenUrl(self.url.clone()),
            MenuItemKind::CopyLink => MenuAction::CopyToClipboard(self.url.clone()),
            MenuItemKind::Extra(i) => MenuAction::Extra(i),
        };
        debug_log!("Menu item '{}' selected: {:?}", item.label, action);

        Some(MenuSelection {
            action,
            hide: self.popover.hide(now),
        })
    }

    /// Forward a pointer press to the popover for outside-tap dismissal.
    pub fn pointer_down(&mut self, p: Point, now: Instant) -> Option<ScheduledAnimation> {
        self.popover.pointer_down(p, now)
    }

    /// Reject extra items without a title.
    pub fn validate_extras(extras: &[ExtraMenuItem]) -> OverlayResult<()> {
        match extras.iter().position(|e| e.title.trim().is_empty()) {
            Some(index) => Err(OverlayError::EmptyMenuTitle { index }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for OverflowMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverflowMenu")
            .field("url", &self.url)
            .field("items", &self.items)
            .field("popover", &self.popover)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(extras: Vec<ExtraMenuItem>) -> OverflowMenu {
        OverflowMenu::new(
            "https://example.com",
            "Open on Browser",
            "Copy Link",
            extras,
            PopoverConfig::default(),
            Size::new(320.0, 640.0),
        )
    }

    fn open_and_settle(menu: &mut OverflowMenu, now: Instant) {
        menu.open(Rect::new(280.0, 0.0, 40.0, 40.0));
        let enter = menu
            .popover_mut()
            .content_measured(Size::new(180.0, 144.0), now)
            .unwrap();
        menu.popover_mut().animation_finished(enter.handle);
    }

    #[test]
    fn test_item_order() {
        let menu = menu(vec![ExtraMenuItem::new("Share"), ExtraMenuItem::new("Report")]);
        let kinds: Vec<_> = menu.items().iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MenuItemKind::OpenInBrowser,
                MenuItemKind::CopyLink,
                MenuItemKind::Extra(0),
                MenuItemKind::Extra(1),
            ]
        );
        assert_eq!(menu.items()[3].label, "Report");
    }

    #[test]
    fn test_select_resolves_current_url_and_hides() {
        let mut menu = menu(Vec::new());
        let now = Instant::now();
        open_and_settle(&mut menu, now);
        menu.set_url("https://example.com/next");

        let selection = menu.select(1, now).unwrap();
        assert_eq!(
            selection.action,
            MenuAction::CopyToClipboard("https://example.com/next".into())
        );
        assert!(selection.hide.is_some());
        assert!(!menu.is_interactive());
        assert!(menu.select(0, now).is_none());
    }

    #[test]
    fn test_select_ignored_when_hidden_or_out_of_range() {
        let mut menu = menu(Vec::new());
        let now = Instant::now();
        assert!(menu.select(0, now).is_none());

        open_and_settle(&mut menu, now);
        assert!(menu.select(7, now).is_none());
        assert!(menu.is_interactive());
    }

    #[test]
    fn test_validate_extras() {
        assert!(OverflowMenu::validate_extras(&[ExtraMenuItem::new("Share")]).is_ok());
        assert_eq!(
            OverflowMenu::validate_extras(&[ExtraMenuItem::new("Share"), ExtraMenuItem::new(" ")]),
            Err(OverlayError::EmptyMenuTitle { index: 1 })
        );
    }

    #[gpui::test]
    fn test_extra_item_handler(cx: &mut gpui::TestAppContext) {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let item = ExtraMenuItem::new("Share").on_select(move |_cx| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cx.update(|cx| item.run(cx));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(format!("{:?}", item).contains("Share"));
    }
}
