//! Overlay invariants, each with the place it is enforced and what breaks
//! without it.

use vitrine_dom::{Document, FocusOptions, Key, ListenerKind, MemoryDocument, Viewport};

use crate::{
	CloseReason, DismissListeners, OverlayController, OverlayParts, OverlaySpec, ScrollGuard,
	ScrollLock,
};

fn menu() -> (MemoryDocument, OverlayController) {
	let mut doc = MemoryDocument::new(Viewport {
		inner_width: 480,
		inner_height: 800,
		client_width: 465,
		scroll_y: 0.0,
	});
	let body = doc.body();
	let trigger = doc.append(body, "button").class("hamburger-menu").build();
	let panel = doc.append(body, "nav").class("main-nav").build();
	doc.append(panel, "a").attr("href", "#top");
	let ctl = OverlayController::bind(
		&mut doc,
		OverlaySpec::nav_menu(),
		OverlayParts::new(trigger, panel),
		Some(ScrollLock::shared()),
	);
	(doc, ctl)
}

/// Must install dismissal listeners at most once per open.
///
/// - Enforced in: `DismissListeners::register`
/// - Failure symptom: One Escape press runs the close path twice and a
///   handler outlives the overlay.
#[cfg_attr(test, test)]
pub(crate) fn test_listeners_register_once() {
	let mut doc = MemoryDocument::default();
	let mut pair = DismissListeners::new();
	assert!(pair.register(&mut doc));
	assert!(!pair.register(&mut doc));
	assert_eq!(doc.listener_stats().added, 2);
	assert!(pair.deregister(&mut doc));
	assert!(!pair.deregister(&mut doc));
	assert_eq!(doc.listener_stats().removed, 2);
}

/// Must restore body scroll styling exactly as found.
///
/// - Enforced in: `ScrollLock::unlock`
/// - Failure symptom: Page stays unscrollable or shifts sideways after the
///   menu closes.
#[cfg_attr(test, test)]
pub(crate) fn test_scroll_styles_restored_verbatim() {
	let mut doc = MemoryDocument::default();
	let body = doc.body();
	doc.set_style(body, "overflow", "clip");
	let mut lock = ScrollLock::new();
	lock.lock(&mut doc);
	lock.lock(&mut doc);
	lock.unlock(&mut doc);
	assert_eq!(doc.style(body, "overflow"), "clip");
	assert_eq!(doc.style(body, "padding-right"), "");
}

/// Must not classify a click on the trigger as an outside click.
///
/// - Enforced in: `OverlayController::on_document_click`
/// - Failure symptom: Clicking the trigger closes and immediately reopens
///   the panel, or never closes it.
#[cfg_attr(test, test)]
pub(crate) fn test_trigger_click_is_not_outside() {
	let (mut doc, mut ctl) = menu();
	let trigger = ctl.parts().trigger;
	ctl.toggle(&mut doc);
	assert!(!ctl.on_document_click(&mut doc, trigger));
	assert!(ctl.is_open(&doc));
}

/// Must close when focus leaves the document entirely.
///
/// - Enforced in: `OverlayController::on_focus_out`
/// - Failure symptom: Panel stays open after the user tabs into browser UI.
#[cfg_attr(test, test)]
pub(crate) fn test_focus_leaving_document_closes() {
	let mut doc = MemoryDocument::default();
	let body = doc.body();
	let root = doc.append(body, "div").attr("data-fab", "").build();
	let trigger = doc.append(root, "button").class("fab-btn").build();
	let actions = doc.append(root, "ul").class("fab-actions").build();
	let parts = OverlayParts::new(trigger, root).with_focus_scope(actions);
	let mut ctl = OverlayController::bind(&mut doc, OverlaySpec::fab(), parts, None);
	ctl.toggle(&mut doc);
	assert!(ctl.on_focus_out(&mut doc, None));
	assert!(!ctl.is_open(&doc));
}

/// Must hand focus back to the trigger on close, except after a focus
/// escape.
///
/// - Enforced in: `OverlayController::close`
/// - Failure symptom: Keyboard users lose their place after Escape, or get
///   yanked back after tabbing away.
#[cfg_attr(test, test)]
pub(crate) fn test_close_restores_focus_to_trigger() {
	let (mut doc, mut ctl) = menu();
	let trigger = ctl.parts().trigger;
	ctl.toggle(&mut doc);
	for id in doc.listeners(ListenerKind::KeyDown) {
		if ctl.handles(ListenerKind::KeyDown, id) {
			ctl.on_document_key(&mut doc, &Key::Escape);
		}
	}
	assert_eq!(doc.active_element(), Some(trigger));
	assert!(!CloseReason::FocusEscape.restores_focus());
	assert_eq!(
		doc.focus_log().last().map(|(_, opts)| *opts),
		Some(FocusOptions::PREVENT_SCROLL)
	);
}
