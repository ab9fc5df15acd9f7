use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use rstest::rstest;
use vitrine_dom::{FocusOptions, MemoryDocument, Viewport};

use super::*;
use crate::scroll_lock::{ScrollGuard, ScrollLock};

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

struct MenuPage {
	doc: MemoryDocument,
	trigger: NodeId,
	panel: NodeId,
	first_link: NodeId,
	external_link: NodeId,
	contact_link: NodeId,
	outside: NodeId,
}

fn menu_page() -> MenuPage {
	let mut doc = MemoryDocument::new(Viewport {
		inner_width: 500,
		inner_height: 800,
		client_width: 485,
		scroll_y: 0.0,
	});
	let body = doc.body();
	let header = doc.append(body, "header").class("main-header").build();
	let trigger = doc.append(header, "button").class("hamburger-menu").build();
	let panel = doc.append(header, "nav").class("main-nav").build();
	let first_link = doc.append(panel, "a").attr("href", "#home").build();
	let external_link = doc.append(panel, "a").attr("href", "/blog").build();
	let contact_link = doc.append(panel, "a").attr("href", "#contact").build();
	let main = doc.append(body, "main").build();
	let outside = doc.append(main, "button").id("outside").build();
	MenuPage {
		doc,
		trigger,
		panel,
		first_link,
		external_link,
		contact_link,
		outside,
	}
}

fn bind_menu(page: &mut MenuPage, scroll: Option<SharedScrollGuard>) -> OverlayController {
	init_tracing();
	let parts = OverlayParts::new(page.trigger, page.panel);
	OverlayController::bind(&mut page.doc, OverlaySpec::nav_menu(), parts, scroll)
}

struct FabPage {
	doc: MemoryDocument,
	root: NodeId,
	trigger: NodeId,
	actions: NodeId,
	first_action: NodeId,
	last_action: NodeId,
	elsewhere: NodeId,
}

fn fab_page() -> (FabPage, OverlayController) {
	init_tracing();
	let mut doc = MemoryDocument::default();
	let body = doc.body();
	let elsewhere = doc.append(body, "a").attr("href", "/pricing").build();
	let root = doc.append(body, "div").attr("data-fab", "").build();
	let trigger = doc.append(root, "button").class("fab-btn").build();
	let actions = doc.append(root, "ul").class("fab-actions").build();
	let first_item = doc.append(actions, "li").build();
	let first_action = doc.append(first_item, "a").attr("href", "tel:+5500000000").build();
	let last_item = doc.append(actions, "li").build();
	let last_action = doc.append(last_item, "a").attr("href", "https://wa.me/5500000000").build();

	let parts = OverlayParts::new(trigger, root).with_focus_scope(actions);
	let ctl = OverlayController::bind(&mut doc, OverlaySpec::fab(), parts, None);
	(
		FabPage {
			doc,
			root,
			trigger,
			actions,
			first_action,
			last_action,
			elsewhere,
		},
		ctl,
	)
}

/// Routes a click the way the site router does: trigger handlers stop
/// propagation, then panel handlers, then document listeners.
fn click(doc: &mut MemoryDocument, ctl: &mut OverlayController, target: NodeId) {
	if doc.contains(ctl.parts().trigger, target) {
		ctl.toggle(doc);
		return;
	}
	ctl.on_panel_click(doc, target);
	for id in doc.listeners(ListenerKind::Click) {
		if doc.has_listener(ListenerKind::Click, id) && ctl.handles(ListenerKind::Click, id) {
			ctl.on_document_click(doc, target);
		}
	}
}

fn press(doc: &mut MemoryDocument, ctl: &mut OverlayController, key: Key) {
	for id in doc.listeners(ListenerKind::KeyDown) {
		if doc.has_listener(ListenerKind::KeyDown, id) && ctl.handles(ListenerKind::KeyDown, id) {
			ctl.on_document_key(doc, &key);
		}
	}
}

#[derive(Default)]
struct RecordingGuard {
	locks: usize,
	unlocks: usize,
	locked: bool,
}

impl ScrollGuard for RecordingGuard {
	fn lock(&mut self, _doc: &mut dyn Document) {
		self.locks += 1;
		self.locked = true;
	}

	fn unlock(&mut self, _doc: &mut dyn Document) {
		self.unlocks += 1;
		self.locked = false;
	}

	fn is_locked(&self) -> bool {
		self.locked
	}
}

#[test]
fn bind_writes_aria_contract() {
	let mut page = menu_page();
	let ctl = bind_menu(&mut page, None);
	let doc = &page.doc;
	assert_eq!(doc.attribute(page.panel, "id").as_deref(), Some("site-menu"));
	assert_eq!(doc.attribute(page.trigger, "aria-controls").as_deref(), Some("site-menu"));
	assert_eq!(doc.attribute(page.trigger, "aria-expanded").as_deref(), Some("false"));
	assert_eq!(
		doc.attribute(page.trigger, "aria-label").as_deref(),
		Some("Open navigation menu")
	);
	assert_eq!(ctl.state(), OverlayState::Closed);
	assert!(!ctl.is_open(doc));
}

#[test]
fn bind_keeps_existing_panel_id() {
	let mut page = menu_page();
	page.doc.set_attribute(page.panel, "id", "primary-nav");
	bind_menu(&mut page, None);
	assert_eq!(
		page.doc.attribute(page.trigger, "aria-controls").as_deref(),
		Some("primary-nav")
	);
}

#[test]
fn bind_without_lock_request_drops_guard() {
	let (_, ctl) = fab_page();
	assert!(!ctl.uses_scroll_lock());

	let mut page = menu_page();
	let ctl = bind_menu(&mut page, Some(ScrollLock::shared()));
	assert!(ctl.uses_scroll_lock());
}

#[test]
fn menu_open_then_escape_round_trip() {
	let mut page = menu_page();
	let body = page.doc.body();
	page.doc.set_style(body, "overflow", "auto");
	page.doc.set_style(body, "padding-right", "2px");
	let lock = ScrollLock::shared();
	let mut ctl = bind_menu(&mut page, Some(lock.clone()));

	click(&mut page.doc, &mut ctl, page.trigger);
	let doc = &page.doc;
	assert!(doc.has_class(page.panel, "active"));
	assert!(doc.has_class(page.trigger, "active"));
	assert_eq!(doc.attribute(page.trigger, "aria-expanded").as_deref(), Some("true"));
	assert_eq!(doc.style(body, "overflow"), "hidden");
	assert_eq!(doc.style(body, "padding-right"), "15px");
	assert!(lock.borrow().is_locked());
	assert_eq!(doc.active_element(), Some(page.first_link));
	assert_eq!(doc.focus_log().last(), Some(&(page.first_link, FocusOptions::PREVENT_SCROLL)));
	assert_eq!(doc.listener_stats().outstanding(), 2);

	press(&mut page.doc, &mut ctl, Key::Escape);
	let doc = &page.doc;
	assert!(!doc.has_class(page.panel, "active"));
	assert!(!doc.has_class(page.trigger, "active"));
	assert_eq!(doc.attribute(page.trigger, "aria-expanded").as_deref(), Some("false"));
	assert_eq!(doc.style(body, "overflow"), "auto");
	assert_eq!(doc.style(body, "padding-right"), "2px");
	assert!(!lock.borrow().is_locked());
	assert_eq!(doc.active_element(), Some(page.trigger));
	assert_eq!(doc.listener_stats().outstanding(), 0);
	assert_eq!(ctl.state(), OverlayState::Closed);
}

#[test]
fn open_records_previously_focused_element() {
	let mut page = menu_page();
	let mut ctl = bind_menu(&mut page, None);
	page.doc.focus(page.outside, FocusOptions::default());
	ctl.toggle(&mut page.doc);
	assert_eq!(ctl.last_focused(), Some(page.outside));
	assert_eq!(page.doc.active_element(), Some(page.first_link));
}

#[test]
fn trigger_click_is_not_an_outside_click() {
	let mut page = menu_page();
	let mut ctl = bind_menu(&mut page, None);
	ctl.toggle(&mut page.doc);
	assert!(!ctl.on_document_click(&mut page.doc, page.trigger));
	assert!(ctl.is_open(&page.doc));
	assert!(!ctl.on_document_click(&mut page.doc, page.external_link));
	assert!(ctl.is_open(&page.doc));
}

#[test]
fn outside_click_closes_and_restores_focus() {
	let mut page = menu_page();
	let mut ctl = bind_menu(&mut page, None);
	click(&mut page.doc, &mut ctl, page.trigger);
	click(&mut page.doc, &mut ctl, page.outside);
	assert!(!ctl.is_open(&page.doc));
	assert_eq!(page.doc.active_element(), Some(page.trigger));
	assert_eq!(page.doc.listener_stats().outstanding(), 0);
}

#[rstest]
#[case::in_page_anchor(true)]
#[case::external_link(false)]
fn panel_link_click(#[case] in_page: bool) {
	let mut page = menu_page();
	let mut ctl = bind_menu(&mut page, Some(ScrollLock::shared()));
	click(&mut page.doc, &mut ctl, page.trigger);
	let target = if in_page {
		page.contact_link
	} else {
		page.external_link
	};
	click(&mut page.doc, &mut ctl, target);
	assert_eq!(ctl.is_open(&page.doc), !in_page);
}

#[test]
fn anchor_click_while_closed_leaves_focus_alone() {
	let mut page = menu_page();
	let mut ctl = bind_menu(&mut page, None);
	page.doc.focus(page.contact_link, FocusOptions::default());
	assert!(!ctl.on_panel_click(&mut page.doc, page.contact_link));
	assert_eq!(page.doc.active_element(), Some(page.contact_link));
}

#[rstest]
#[case(1000, true)]
#[case(901, true)]
#[case(900, false)]
#[case(600, false)]
fn resize_past_breakpoint_closes_menu(#[case] width: u32, #[case] closes: bool) {
	let mut page = menu_page();
	let mut ctl = bind_menu(&mut page, Some(ScrollLock::shared()));
	ctl.toggle(&mut page.doc);
	page.doc.resize(width, 800);
	assert_eq!(ctl.on_resize(&mut page.doc), closes);
	assert_eq!(ctl.is_open(&page.doc), !closes);
}

#[test]
fn resize_while_closed_does_nothing() {
	let mut page = menu_page();
	let mut ctl = bind_menu(&mut page, None);
	page.doc.resize(1200, 800);
	assert!(!ctl.on_resize(&mut page.doc));
	assert!(page.doc.focus_log().is_empty());
}

#[test]
fn toggle_reads_rendered_state() {
	let mut page = menu_page();
	let guard = Rc::new(RefCell::new(RecordingGuard::default()));
	let shared: SharedScrollGuard = guard.clone();
	let mut ctl = bind_menu(&mut page, Some(shared));

	ctl.toggle(&mut page.doc);
	// Someone else strips the class; the next toggle must open, not close.
	page.doc.remove_class(page.panel, "active");
	ctl.toggle(&mut page.doc);
	assert!(ctl.is_open(&page.doc));
	assert_eq!(page.doc.listener_stats().outstanding(), 2);
	assert_eq!(guard.borrow().locks, 1);

	ctl.toggle(&mut page.doc);
	assert!(!ctl.is_open(&page.doc));
	assert_eq!(page.doc.listener_stats().outstanding(), 0);
	assert_eq!(guard.borrow().unlocks, 1);
}

#[test]
fn menu_acquires_and_releases_injected_guard_once_per_cycle() {
	let mut page = menu_page();
	let guard = Rc::new(RefCell::new(RecordingGuard::default()));
	let shared: SharedScrollGuard = guard.clone();
	let mut ctl = bind_menu(&mut page, Some(shared));

	for _ in 0..3 {
		click(&mut page.doc, &mut ctl, page.trigger);
		press(&mut page.doc, &mut ctl, Key::Escape);
	}
	let guard = guard.borrow();
	assert_eq!((guard.locks, guard.unlocks), (3, 3));
	assert!(!guard.locked);
}

#[test]
fn close_without_open_touches_no_listeners() {
	let mut page = menu_page();
	let mut ctl = bind_menu(&mut page, None);
	ctl.close(&mut page.doc, CloseReason::Escape);
	assert_eq!(page.doc.listener_stats().removed, 0);
}

#[test]
fn fab_pointer_open_keeps_focus() {
	let (mut page, mut ctl) = fab_page();
	assert_eq!(page.doc.attribute(page.root, "aria-expanded").as_deref(), Some("false"));
	assert_eq!(
		page.doc.attribute(page.trigger, "aria-controls").as_deref(),
		Some("fab-actions")
	);

	click(&mut page.doc, &mut ctl, page.trigger);
	assert!(ctl.is_open(&page.doc));
	assert_eq!(page.doc.attribute(page.root, "aria-expanded").as_deref(), Some("true"));
	assert_eq!(page.doc.attribute(page.trigger, "aria-expanded").as_deref(), Some("true"));
	assert_eq!(page.doc.active_element(), None);
}

#[test]
fn fab_keyboard_open_focuses_first_action() {
	let (mut page, mut ctl) = fab_page();
	page.doc.focus(page.trigger, FocusOptions::default());
	ctl.toggle(&mut page.doc);
	assert_eq!(page.doc.active_element(), Some(page.first_action));
}

#[test]
fn fab_focus_escape_closes_without_stealing_focus() {
	let (mut page, mut ctl) = fab_page();
	page.doc.focus(page.trigger, FocusOptions::default());
	ctl.toggle(&mut page.doc);
	page.doc.focus(page.last_action, FocusOptions::default());

	assert!(!ctl.on_focus_out(&mut page.doc, Some(page.first_action)));
	assert!(ctl.is_open(&page.doc));

	page.doc.focus(page.elsewhere, FocusOptions::default());
	assert!(ctl.on_focus_out(&mut page.doc, Some(page.elsewhere)));
	assert!(!ctl.is_open(&page.doc));
	assert_eq!(page.doc.active_element(), Some(page.elsewhere));
	assert_eq!(page.doc.listener_stats().outstanding(), 0);
}

#[test]
fn fab_focus_leaving_document_closes() {
	let (mut page, mut ctl) = fab_page();
	ctl.toggle(&mut page.doc);
	assert!(ctl.on_focus_out(&mut page.doc, None));
	assert!(!ctl.is_open(&page.doc));
}

#[test]
fn fab_clicks_inside_container_do_not_dismiss() {
	let (mut page, mut ctl) = fab_page();
	click(&mut page.doc, &mut ctl, page.trigger);
	click(&mut page.doc, &mut ctl, page.actions);
	assert!(ctl.is_open(&page.doc));
	click(&mut page.doc, &mut ctl, page.elsewhere);
	assert!(!ctl.is_open(&page.doc));
}

#[test]
fn fab_escape_returns_focus_to_trigger() {
	let (mut page, mut ctl) = fab_page();
	page.doc.focus(page.trigger, FocusOptions::default());
	ctl.toggle(&mut page.doc);
	press(&mut page.doc, &mut ctl, Key::Escape);
	assert!(!ctl.is_open(&page.doc));
	assert_eq!(page.doc.active_element(), Some(page.trigger));
}

#[test]
fn non_escape_keys_are_ignored() {
	let (mut page, mut ctl) = fab_page();
	ctl.toggle(&mut page.doc);
	press(&mut page.doc, &mut ctl, Key::Tab);
	press(&mut page.doc, &mut ctl, Key::Other("a".into()));
	assert!(ctl.is_open(&page.doc));
}

#[derive(Debug, Clone)]
enum Input {
	Trigger,
	Outside,
	Inside,
	Anchor,
	Escape,
	Resize(u32),
}

fn input() -> impl Strategy<Value = Input> {
	prop_oneof![
		Just(Input::Trigger),
		Just(Input::Outside),
		Just(Input::Inside),
		Just(Input::Anchor),
		Just(Input::Escape),
		(320u32..1400).prop_map(Input::Resize),
	]
}

proptest! {
	#[test]
	fn rendered_state_aria_and_listeners_stay_in_step(inputs in prop::collection::vec(input(), 0..40)) {
		let mut page = menu_page();
		let lock = ScrollLock::shared();
		let mut ctl = bind_menu(&mut page, Some(lock.clone()));
		let (mut opens, mut closes) = (0usize, 0usize);

		for input in inputs {
			let before = ctl.state();
			match input {
				Input::Trigger => click(&mut page.doc, &mut ctl, page.trigger),
				Input::Outside => click(&mut page.doc, &mut ctl, page.outside),
				Input::Inside => click(&mut page.doc, &mut ctl, page.panel),
				Input::Anchor => click(&mut page.doc, &mut ctl, page.contact_link),
				Input::Escape => press(&mut page.doc, &mut ctl, Key::Escape),
				Input::Resize(width) => {
					page.doc.resize(width, 800);
					ctl.on_resize(&mut page.doc);
				}
			}
			match (before, ctl.state()) {
				(OverlayState::Closed, OverlayState::Open) => opens += 1,
				(OverlayState::Open, OverlayState::Closed) => closes += 1,
				_ => {}
			}

			let open = ctl.is_open(&page.doc);
			let expanded = page.doc.attribute(page.trigger, "aria-expanded");
			prop_assert_eq!(expanded.as_deref(), Some(if open { "true" } else { "false" }));
			prop_assert_eq!(open, ctl.state() == OverlayState::Open);
			prop_assert_eq!(lock.borrow().is_locked(), open);

			let stats = page.doc.listener_stats();
			prop_assert_eq!(stats.added, 2 * opens);
			prop_assert_eq!(stats.removed, 2 * closes);
			prop_assert_eq!(stats.outstanding(), if open { 2 } else { 0 });
		}
	}

	#[test]
	fn even_toggle_count_returns_to_closed(pairs in 0usize..20) {
		let mut page = menu_page();
		let mut ctl = bind_menu(&mut page, Some(ScrollLock::shared()));
		for _ in 0..pairs * 2 {
			ctl.toggle(&mut page.doc);
		}
		prop_assert!(!ctl.is_open(&page.doc));
		prop_assert_eq!(page.doc.listener_stats().outstanding(), 0);
		prop_assert_eq!(page.doc.listeners(ListenerKind::Click).len(), 0);
		prop_assert_eq!(page.doc.listeners(ListenerKind::KeyDown).len(), 0);
	}
}
