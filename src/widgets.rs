//! GPUI rendering for the browser overlay.
//!
//! [`BrowserOverlayView`] wraps a [`BrowserOverlay`] and draws it:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ ✕  ‹   Page title                ›  ⋯  │  header
//! │        https://current.example          │
//! ├▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔───────────────────────────┤  progress
//! │                                         │
//! │          host content view              │
//! │                                         │
//! └─────────────────────────────────────────┘
//!                       + popover layer (menu)
//! ```
//!
//! The view owns the timers the state machines ask for. Every scheduled
//! completion is a [`Task`] kept in an `Option`; replacing or dropping it
//! cancels the timer, and the handle check in the state machine discards
//! anything that still slips through.
//!
//! Element sizes come from `canvas` prepaint callbacks: the menu trigger's
//! window bounds are recorded every frame, and the menu content is measured
//! once per show cycle.

use crate::animation::PresentationAnimation;
use crate::error::OverlayResult;
use crate::overlay::{BrowserOverlay, HeaderTheme};
use crate::trace_log;
use gpui::prelude::*;
use gpui::{
    canvas, div, px, relative, rgb, Animation, AnimationExt, AnyElement, AnyView, Context, Div,
    FontWeight, MouseButton, MouseDownEvent, Render, SharedString, Task, Window,
};
use std::time::{Duration, Instant};

#[cfg(feature = "menu")]
use crate::debug_log;
#[cfg(feature = "menu")]
use crate::geometry::{Point, Rect, Size};
#[cfg(feature = "menu")]
use crate::menu::MenuAction;
#[cfg(feature = "menu")]
use crate::popover::ScheduledAnimation;
#[cfg(feature = "menu")]
use gpui::ClipboardItem;

#[cfg(feature = "progress")]
use crate::progress::{ProgressBarStyle, ScheduledStep};

const HEADER_HEIGHT: f32 = 56.0;

/// Pressable controls in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderControl {
    Close,
    Back,
    Forward,
    #[cfg(feature = "menu")]
    Menu,
}

/// Renders a [`BrowserOverlay`] around a host-supplied content view.
///
/// # Example
///
/// ```ignore
/// let overlay = BrowserOverlay::new(
///     OverlayConfig::new("https://example.com"),
///     OverlayCallbacks::new().on_close(|| println!("closed")),
///     Size::new(390.0, 844.0),
/// )?;
/// let view = cx.new(|_| BrowserOverlayView::new(overlay).content(web_view));
/// view.update(cx, |view, cx| view.open(cx));
/// ```
pub struct BrowserOverlayView {
    overlay: BrowserOverlay,
    content: Option<AnyView>,
    /// Bumped on every open/close so each presentation animation gets a fresh id
    presentations: u64,
    /// Still drawing the close animation after the overlay state closed
    dismissing: bool,
    dismiss_task: Option<Task<()>>,
    close_task: Option<Task<()>>,
    #[cfg(feature = "menu")]
    trigger_bounds: Option<Rect>,
    #[cfg(feature = "menu")]
    popover_task: Option<Task<()>>,
    #[cfg(feature = "progress")]
    progress_task: Option<Task<()>>,
}

impl BrowserOverlayView {
    pub fn new(overlay: BrowserOverlay) -> Self {
        Self {
            overlay,
            content: None,
            presentations: 0,
            dismissing: false,
            dismiss_task: None,
            close_task: None,
            #[cfg(feature = "menu")]
            trigger_bounds: None,
            #[cfg(feature = "menu")]
            popover_task: None,
            #[cfg(feature = "progress")]
            progress_task: None,
        }
    }

    /// Set the view rendered below the header (typically the web view).
    pub fn content(mut self, view: impl Into<AnyView>) -> Self {
        self.content = Some(view.into());
        self
    }

    /// Replace the content view.
    pub fn set_content(&mut self, view: impl Into<AnyView>, cx: &mut Context<'_, Self>) {
        self.content = Some(view.into());
        cx.notify();
    }

    pub fn overlay(&self) -> &BrowserOverlay {
        &self.overlay
    }

    /// Whether the close animation is still on screen.
    pub fn is_dismissing(&self) -> bool {
        self.dismissing
    }

    // ========================================================================
    // Host API
    // ========================================================================

    pub fn open(&mut self, cx: &mut Context<'_, Self>) {
        self.close_task = None;
        self.dismiss_task = None;
        self.dismissing = false;
        self.overlay.open();
        self.presentations += 1;
        cx.notify();
    }

    /// Close the overlay. The history reset and the end of the close
    /// animation run on separate timers; the view keeps drawing until the
    /// later of the two.
    pub fn close(&mut self, cx: &mut Context<'_, Self>) {
        let Some(reset) = self.overlay.close(Instant::now()) else {
            return;
        };
        #[cfg(feature = "menu")]
        self.schedule_popover(reset.menu_exit, cx);

        self.dismissing = true;
        self.presentations += 1;
        let visible_for = self.overlay.config().presentation.duration().max(reset.delay);
        self.dismiss_task = Some(Self::after(cx, visible_for, |view, cx| {
            view.dismissing = false;
            cx.notify();
        }));
        self.close_task = Some(Self::after(cx, reset.delay, move |view, cx| {
            view.overlay.flush_close(reset.handle);
            cx.notify();
        }));
        cx.notify();
    }

    pub fn record_navigation(&mut self, url: impl Into<String>, cx: &mut Context<'_, Self>) {
        if self.overlay.record_navigation(url).is_some() {
            cx.notify();
        }
    }

    pub fn go_back(&mut self, cx: &mut Context<'_, Self>) {
        if self.overlay.go_back().is_some() {
            cx.notify();
        }
    }

    pub fn go_forward(&mut self, cx: &mut Context<'_, Self>) {
        if self.overlay.go_forward().is_some() {
            cx.notify();
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>, cx: &mut Context<'_, Self>) {
        self.overlay.set_title(title);
        cx.notify();
    }

    #[cfg(feature = "progress")]
    pub fn load_progress(&mut self, value: f32, cx: &mut Context<'_, Self>) -> OverlayResult<()> {
        let step = self.overlay.load_progress(value, Instant::now())?;
        if step.is_some() {
            self.schedule_progress(step, cx);
        }
        cx.notify();
        Ok(())
    }

    #[cfg(not(feature = "progress"))]
    pub fn load_progress(&mut self, _value: f32, _cx: &mut Context<'_, Self>) -> OverlayResult<()> {
        Ok(())
    }

    /// Open the overflow menu from `trigger` (window coordinates).
    #[cfg(feature = "menu")]
    pub fn open_menu(&mut self, trigger: Rect, cx: &mut Context<'_, Self>) {
        if self.overlay.menu_mut().open(trigger) {
            self.popover_task = None;
            cx.notify();
        }
    }

    /// Pick menu row `index` and perform its action.
    #[cfg(feature = "menu")]
    pub fn select_menu_item(&mut self, index: usize, cx: &mut Context<'_, Self>) {
        let Some(selection) = self.overlay.menu_mut().select(index, Instant::now()) else {
            return;
        };
        self.schedule_popover(selection.hide, cx);

        match selection.action {
            MenuAction::OpenUrl(url) => cx.open_url(&url),
            MenuAction::CopyToClipboard(url) => {
                cx.write_to_clipboard(ClipboardItem::new_string(url));
            }
            MenuAction::Extra(index) => {
                if let Some(item) = self.overlay.menu().extra(index).cloned() {
                    item.run(cx);
                }
            }
        }
        cx.notify();
    }

    /// Handle a press on a header control. While the menu is interactive a
    /// press anywhere outside it only dismisses the menu.
    fn press(&mut self, control: HeaderControl, cx: &mut Context<'_, Self>) {
        #[cfg(feature = "menu")]
        if self.overlay.menu().is_interactive() {
            trace_log!("{:?} press dismisses the menu", control);
            let hide = self.overlay.menu_mut().close(Instant::now());
            self.schedule_popover(hide, cx);
            cx.notify();
            return;
        }

        match control {
            HeaderControl::Close => self.close(cx),
            HeaderControl::Back => self.go_back(cx),
            HeaderControl::Forward => self.go_forward(cx),
            // Also restarts a menu that is still playing its exit
            #[cfg(feature = "menu")]
            HeaderControl::Menu => {
                if let Some(trigger) = self.trigger_bounds {
                    self.open_menu(trigger, cx);
                }
            }
        }
    }

    // ========================================================================
    // Timers
    // ========================================================================

    /// Run `f` on this view after `delay`, unless the returned task is dropped.
    fn after<F>(cx: &mut Context<'_, Self>, delay: Duration, f: F) -> Task<()>
    where
        F: FnOnce(&mut Self, &mut Context<'_, Self>) + 'static,
    {
        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(delay).await;
            this.update(cx, |view, cx| f(view, cx)).ok();
        })
    }

    #[cfg(feature = "menu")]
    fn schedule_popover(&mut self, animation: Option<ScheduledAnimation>, cx: &mut Context<'_, Self>) {
        let Some(animation) = animation else {
            return;
        };
        trace_log!("Popover completion in {:?}", animation.duration);
        self.popover_task = Some(Self::after(cx, animation.duration, move |view, cx| {
            view.overlay
                .menu_mut()
                .popover_mut()
                .animation_finished(animation.handle);
            cx.notify();
        }));
    }

    #[cfg(feature = "progress")]
    fn schedule_progress(&mut self, step: Option<ScheduledStep>, cx: &mut Context<'_, Self>) {
        let Some(step) = step else {
            return;
        };
        self.progress_task = Some(Self::after(cx, step.delay, move |view, cx| {
            let next = view
                .overlay
                .progress_mut()
                .step_elapsed(step.handle, Instant::now());
            view.schedule_progress(next, cx);
            cx.notify();
        }));
    }

    // ========================================================================
    // Measurement
    // ========================================================================

    #[cfg(feature = "menu")]
    fn content_measured(&mut self, size: Size, cx: &mut Context<'_, Self>) {
        let popover = self.overlay.menu_mut().popover_mut();
        if popover.content_size().is_some() {
            return;
        }
        let enter = popover.content_measured(size, Instant::now());
        if enter.is_some() {
            debug_log!("Menu content measured: {}x{}", size.width, size.height);
            self.schedule_popover(enter, cx);
            cx.notify();
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn render_header(&self, cx: &mut Context<'_, Self>) -> Div {
        let header = self.overlay.header();
        let config = self.overlay.config();
        let (primary, secondary) = match header.theme {
            HeaderTheme::Dark => (rgb(0x1c1c1e), rgb(0x8e8e93)),
            HeaderTheme::Light => (rgb(0xffffff), rgb(0xd1d1d6)),
        };

        let mut row = div()
            .relative()
            .flex()
            .items_center()
            .gap_2()
            .h(px(HEADER_HEIGHT))
            .px_3()
            .bg(rgb(config.header_background))
            .text_color(primary);

        #[cfg(feature = "progress")]
        if self.overlay.progress().config().style == ProgressBarStyle::Background {
            let frame = self.overlay.progress().frame(Instant::now());
            let (color, alpha) = background_fill(header.theme);
            row = row.child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .h_full()
                    .w(relative(frame.fill))
                    .bg(rgb(color))
                    .opacity(alpha),
            );
        }

        row = row.child(header_button("✕", true).on_mouse_down(
            MouseButton::Left,
            cx.listener(|view, _event, _window, cx| view.press(HeaderControl::Close, cx)),
        ));

        if header.navigation_visible {
            row = row.child(header_button("‹", header.can_go_back).on_mouse_down(
                MouseButton::Left,
                cx.listener(|view, _event, _window, cx| view.press(HeaderControl::Back, cx)),
            ));
        }

        row = row.child(
            div()
                .flex()
                .flex_col()
                .flex_1()
                .overflow_hidden()
                .child(
                    div()
                        .text_sm()
                        .font_weight(FontWeight::SEMIBOLD)
                        .truncate()
                        .child(SharedString::from(header.title)),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(secondary)
                        .truncate()
                        .child(SharedString::from(header.subtitle)),
                ),
        );

        if header.navigation_visible {
            row = row.child(header_button("›", header.can_go_forward).on_mouse_down(
                MouseButton::Left,
                cx.listener(|view, _event, _window, cx| view.press(HeaderControl::Forward, cx)),
            ));
        }

        #[cfg(feature = "menu")]
        {
            let entity = cx.entity();
            row = row.child(
                header_button("⋯", true)
                    .relative()
                    .child(
                        canvas(
                            move |bounds, _window, cx| {
                                entity.update(cx, |view, _| {
                                    view.trigger_bounds = Some(Rect::from(bounds));
                                });
                            },
                            |_, _, _, _| {},
                        )
                        .absolute()
                        .size_full(),
                    )
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|view, _event, _window, cx| view.press(HeaderControl::Menu, cx)),
                    ),
            );
        }

        row
    }

    #[cfg(feature = "progress")]
    fn render_progress(&self, now: Instant) -> Option<Div> {
        let progress = self.overlay.progress();
        if progress.config().style != ProgressBarStyle::Normal {
            return None;
        }
        let frame = progress.frame(now);
        Some(
            div().w_full().h(px(frame.height)).child(
                div()
                    .h_full()
                    .w(relative(frame.fill))
                    .bg(rgb(progress.config().color)),
            ),
        )
    }

    #[cfg(feature = "menu")]
    fn render_menu_layer(&self, now: Instant, cx: &mut Context<'_, Self>) -> Option<Div> {
        let menu = self.overlay.menu();
        let popover = menu.popover();
        let frame = popover.frame(now)?;

        let mut panel = div()
            .absolute()
            .flex()
            .flex_col()
            .min_w(px(160.))
            .bg(rgb(0xffffff))
            .rounded_md()
            .shadow_lg()
            .text_color(rgb(0x1c1c1e))
            .opacity(frame.opacity);

        panel = match popover.bounds(now) {
            Some(bounds) => panel.left(px(bounds.left())).top(px(bounds.top())),
            None => panel.left(px(frame.left)).top(px(frame.top)),
        };
        if let Some(size) = frame.size {
            panel = panel
                .w(px(size.width))
                .h(px(size.height))
                .min_w(px(0.))
                .overflow_hidden();
        }

        for (index, item) in menu.items().iter().enumerate() {
            if index > 0 {
                panel = panel.child(div().h(px(1.)).w_full().bg(rgb(0xe5e5ea)));
            }
            panel = panel.child(
                div()
                    .px_4()
                    .py_3()
                    .text_sm()
                    .whitespace_nowrap()
                    .cursor_pointer()
                    .hover(|this| this.bg(rgb(0xf2f2f7)))
                    .child(SharedString::from(item.label.clone()))
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |view, _event, _window, cx| {
                            view.select_menu_item(index, cx);
                        }),
                    ),
            );
        }

        if popover.content_size().is_none() {
            let entity = cx.entity();
            panel = panel.child(
                canvas(
                    move |bounds, _window, cx| {
                        let size = Size::from(bounds.size);
                        entity.update(cx, |view, cx| view.content_measured(size, cx));
                    },
                    |_, _, _, _| {},
                )
                .absolute()
                .size_full(),
            );
        }

        let layer = div().absolute().top_0().left_0().size_full();
        if !menu.is_interactive() {
            // An exiting menu lets presses through, so the trigger can reopen it
            return Some(layer.child(panel));
        }
        Some(
            layer
                .occlude()
                .on_mouse_down(
                    MouseButton::Left,
                    cx.listener(|view, event: &MouseDownEvent, _window, cx| {
                        cx.stop_propagation();
                        let hide = view
                            .overlay
                            .menu_mut()
                            .pointer_down(Point::from(event.position), Instant::now());
                        if hide.is_some() {
                            view.schedule_popover(hide, cx);
                            cx.notify();
                        }
                    }),
                )
                .child(panel),
        )
    }

    /// Whether something interpolated by `now` is still moving.
    fn is_animating(&self, now: Instant) -> bool {
        let mut animating = false;
        #[cfg(feature = "menu")]
        {
            animating |= self.overlay.menu().popover().pending_animation().is_some();
        }
        #[cfg(feature = "progress")]
        {
            animating |= self.overlay.progress().is_active(now);
        }
        #[cfg(not(feature = "progress"))]
        let _ = now;
        animating
    }
}

impl Render for BrowserOverlayView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        if !self.overlay.is_open() && !self.dismissing {
            return div().into_any_element();
        }
        let now = Instant::now();

        #[cfg(feature = "menu")]
        self.overlay
            .menu_mut()
            .popover_mut()
            .viewport_changed(Size::from(window.viewport_size()));

        if self.is_animating(now) {
            window.request_animation_frame();
        }

        let mut root = div()
            .relative()
            .flex()
            .flex_col()
            .size_full()
            .bg(rgb(self.overlay.config().background_color))
            .child(self.render_header(cx));

        #[cfg(feature = "progress")]
        {
            root = root.children(self.render_progress(now));
        }

        root = root.child(
            div()
                .relative()
                .flex_1()
                .overflow_hidden()
                .children(self.content.clone()),
        );

        #[cfg(feature = "menu")]
        {
            root = root.children(self.render_menu_layer(now, cx));
        }

        present(
            root,
            self.overlay.config().presentation,
            self.presentations,
            self.dismissing,
        )
    }
}

/// Wrap `root` in the presentation animation for the current open or close.
fn present(
    root: Div,
    presentation: PresentationAnimation,
    counter: u64,
    dismissing: bool,
) -> AnyElement {
    let duration = presentation.duration();
    if duration.is_zero() {
        return root.into_any_element();
    }
    trace_log!(
        "Presenting overlay ({:?}, dismissing={})",
        presentation,
        dismissing
    );

    let id = SharedString::from(format!("browser-overlay-present-{}", counter));
    root.with_animation(id, Animation::new(duration), move |this, delta| {
        let progress = if dismissing { 1.0 - delta } else { delta };
        let (opacity, offset) = presentation.sample(progress);
        this.opacity(opacity).top(relative(offset))
    })
    .into_any_element()
}

/// Colour and opacity of the background-style progress fill: white over a
/// dark header, black over a light one.
#[cfg(feature = "progress")]
fn background_fill(theme: HeaderTheme) -> (u32, f32) {
    match theme {
        HeaderTheme::Light => (0xffffff, 0.2),
        HeaderTheme::Dark => (0x000000, 0.1),
    }
}

fn header_button(glyph: &'static str, enabled: bool) -> Div {
    let button = div()
        .flex()
        .items_center()
        .justify_center()
        .size(px(36.))
        .rounded_md()
        .text_lg()
        .child(glyph);
    if enabled {
        button.cursor_pointer().hover(|this| this.opacity(0.6))
    } else {
        button.opacity(0.3)
    }
}
