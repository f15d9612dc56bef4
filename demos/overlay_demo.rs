//! Browser overlay demo with a simulated web view.
//!
//! The "web view" is a list of fake pages. Clicking one records a navigation
//! and plays a fake load; the header's back/forward buttons and the overflow
//! menu behave as they would around a real web engine.

#![allow(clippy::needless_pass_by_ref_mut)]

use gpui::prelude::*;
use gpui::{
    div, px, rgb, size, App, Application, Bounds, Context, Entity, MouseButton, SharedString,
    TitlebarOptions, WeakEntity, Window, WindowBounds, WindowOptions,
};
use gpui_browser_overlay::{
    info_log, BrowserOverlay, BrowserOverlayView, ExtraMenuItem, OverlayCallbacks, OverlayConfig,
    Size,
};
use std::time::Duration;

const PAGES: [(&str, &str); 4] = [
    ("https://gpui.rs", "GPUI"),
    ("https://gpui.rs/docs", "Documentation"),
    ("https://gpui.rs/docs/elements", "Elements"),
    ("https://gpui.rs/blog", "Blog"),
];

fn main() {
    env_logger::init();
    info_log!("Starting browser overlay demo");

    Application::new().run(|cx: &mut App| {
        let bounds = Bounds::centered(None, size(px(420.), px(760.)), cx);
        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some("Browser Overlay Demo".into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            |_, cx| cx.new(DemoApp::new),
        )
        .unwrap();

        cx.activate(true);
    });
}

struct DemoApp {
    overlay: Entity<BrowserOverlayView>,
}

impl DemoApp {
    fn new(cx: &mut Context<'_, Self>) -> Self {
        let config = OverlayConfig::new(PAGES[0].0)
            .header_background(0xf8f8f8)
            .extra_menu_item(ExtraMenuItem::new("Say Hello").on_select(|_cx| {
                info_log!("Hello from the overflow menu");
            }));
        let callbacks = OverlayCallbacks::new()
            .on_close(|| info_log!("Overlay closed"))
            .on_go_back(|| info_log!("Went back"))
            .on_go_forward(|| info_log!("Went forward"));

        let overlay = BrowserOverlay::new(config, callbacks, Size::new(420.0, 760.0)).unwrap();

        let overlay = cx.new(|_| BrowserOverlayView::new(overlay));
        let web_view = cx.new(|_| FakeWebView {
            overlay: overlay.downgrade(),
        });
        overlay.update(cx, |view, cx| {
            view.set_content(web_view, cx);
            view.set_title(PAGES[0].1, cx);
        });

        Self { overlay }
    }
}

impl Render for DemoApp {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        div()
            .relative()
            .size_full()
            .bg(rgb(0xe5e5ea))
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_center()
                    .size_full()
                    .child(
                        div()
                            .px_6()
                            .py_3()
                            .rounded_lg()
                            .bg(rgb(0x2196f3))
                            .text_color(rgb(0xffffff))
                            .cursor_pointer()
                            .child("Open browser")
                            .on_mouse_down(
                                MouseButton::Left,
                                cx.listener(|this, _event, _window, cx| {
                                    this.overlay.update(cx, |view, cx| view.open(cx));
                                }),
                            ),
                    ),
            )
            // Renders nothing while closed
            .child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .size_full()
                    .child(self.overlay.clone()),
            )
    }
}

/// Stand-in for a platform web view.
struct FakeWebView {
    overlay: WeakEntity<BrowserOverlayView>,
}

impl FakeWebView {
    fn visit(&mut self, url: &'static str, title: &'static str, cx: &mut Context<'_, Self>) {
        let overlay = self.overlay.clone();
        overlay
            .update(cx, |view, cx| {
                view.record_navigation(url, cx);
                view.set_title("Loading...", cx);
                view.load_progress(0.1, cx).ok();
            })
            .ok();

        // Fake load: a few progress reports, then the title
        cx.spawn(async move |_, cx| {
            for value in [0.4, 0.7, 1.0] {
                cx.background_executor()
                    .timer(Duration::from_millis(250))
                    .await;
                overlay
                    .update(cx, |view, cx| {
                        view.load_progress(value, cx).ok();
                    })
                    .ok();
            }
            overlay
                .update(cx, |view, cx| view.set_title(title, cx))
                .ok();
        })
        .detach();
    }
}

impl Render for FakeWebView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let mut list = div().flex().flex_col().gap_2().p_4();
        for (url, title) in PAGES {
            list = list.child(
                div()
                    .p_3()
                    .rounded_md()
                    .bg(rgb(0xffffff))
                    .cursor_pointer()
                    .hover(|this| this.bg(rgb(0xf2f2f7)))
                    .child(SharedString::from(title))
                    .child(
                        div()
                            .text_xs()
                            .text_color(rgb(0x8e8e93))
                            .child(SharedString::from(url)),
                    )
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, _event, _window, cx| this.visit(url, title, cx)),
                    ),
            );
        }
        list
    }
}
