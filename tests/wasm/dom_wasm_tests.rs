//! Browser-backend smoke tests.
//!
//! Run with `wasm-pack test --chrome --headless` (or the wasm-bindgen test
//! runner of your choice). On native targets this file compiles to nothing;
//! the native backend is covered by the regular test suite.

#![cfg(target_arch = "wasm32")]

use domforge::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn build_attaches_to_body() {
	let body = document().body().unwrap();
	let card = div()
		.attr("class", "wasm-card")
		.style("padding", "4px")
		.container(&body)
		.build()
		.unwrap();
	assert_eq!(card.tag_name(), "div");
	assert_eq!(body.last_element_child(), Some(card.clone()));
	assert_eq!(card.style("padding").as_deref(), Some("4px"));
}

#[wasm_bindgen_test]
fn browser_selector_engine_answers_queries() {
	let body = document().body().unwrap();
	let host = div().attr("id", "wasm-host").container(&body).build().unwrap();
	host.append(span().attr("class", "wasm-item"))
		.unwrap()
		.append(span().attr("class", "wasm-item"))
		.unwrap();
	assert_eq!(host.find_all(".wasm-item").unwrap().len(), 2);
	assert!(find_one("#wasm-host").unwrap().is_some());
	// the browser rejects malformed selectors
	assert!(matches!(
		find_one("..broken"),
		Err(DomError::InvalidSelector { .. })
	));
}

#[wasm_bindgen_test]
fn class_toggle_round_trips() {
	let node = document().create_element("div").unwrap();
	node.set_class("lit", "toggle").unwrap();
	assert!(node.class("lit"));
	node.set_class("lit", "toggle").unwrap();
	assert!(!node.class("lit"));
}

#[wasm_bindgen_test]
fn listeners_fire_through_browser_dispatch() {
	use std::cell::Cell;
	use std::rc::Rc;

	let node = document().create_element("button").unwrap();
	let count = Rc::new(Cell::new(0u32));
	{
		let count = Rc::clone(&count);
		node.on_click(move |_| count.set(count.get() + 1));
	}
	node.dispatch("click").unwrap();
	assert_eq!(count.get(), 1);
}
