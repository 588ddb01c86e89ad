//! Chaining Operations Integration Tests
//!
//! Covers the fluent operation set end to end: chains return the same node,
//! getter/setter pairs stay structurally separate, toggle round-trips, and
//! append/prepend place children where they belong.

use std::cell::Cell;
use std::rc::Rc;

use domforge::prelude::*;

fn fresh(tag: &str) -> Element {
	document().create_element(tag).unwrap()
}

#[test]
fn test_chain_returns_the_same_node_at_every_step() {
	let node = fresh("div");
	let end = node
		.set_attr("a", 1)
		.unwrap()
		.set_style("color", "red")
		.unwrap()
		.on("click", |_| {});
	assert_eq!(*end, node);
	assert_eq!(node.attr("a").as_deref(), Some("1"));
	assert_eq!(node.style("color").as_deref(), Some("red"));
}

#[test]
fn test_getter_never_mutates_and_empty_set_is_a_set() {
	let node = fresh("div");
	assert_eq!(node.attr("data-x"), None);
	assert_eq!(node.attr("data-x"), None);
	node.set_attr("data-x", "").unwrap();
	assert_eq!(node.attr("data-x").as_deref(), Some(""));
	node.set_attr("data-x", 0).unwrap();
	assert_eq!(node.attr("data-x").as_deref(), Some("0"));
}

#[test]
fn test_setter_idempotence_and_toggle_round_trip() {
	let node = fresh("div");
	node.set_attr("x", "v").unwrap().set_attr("x", "v").unwrap();
	assert_eq!(node.attr("x").as_deref(), Some("v"));

	assert!(!node.class("y"));
	node.set_class("y", "toggle").unwrap();
	node.set_class("y", "toggle").unwrap();
	assert!(!node.class("y"));
}

#[test]
fn test_append_places_last_prepend_places_first() {
	let parent = fresh("div");
	parent.append(div().attr("id", "x")).unwrap();
	let appended = parent.last_element_child().unwrap();
	assert_eq!(appended.tag_name(), "div");
	assert_eq!(appended.attr("id").as_deref(), Some("x"));

	parent.prepend(span().attr("id", "y")).unwrap();
	let prepended = parent.first_element_child().unwrap();
	assert_eq!(prepended.attr("id").as_deref(), Some("y"));
	assert_eq!(parent.children().len(), 2);
}

#[test]
fn test_append_chain_builds_a_subtree() {
	let root = fresh("div");
	root.append(ul().children([
		li().text("one").build().unwrap(),
		li().text("two").build().unwrap(),
	]))
	.unwrap()
	.set_class("listing", true)
	.unwrap();
	let items = root.find_all("ul > li").unwrap();
	assert_eq!(items.len(), 2);
	assert_eq!(items[0].text_content().as_deref(), Some("one"));
	assert!(root.class("listing"));
}

#[test]
fn test_same_handler_registered_twice_runs_twice() {
	let node = fresh("button");
	let count = Rc::new(Cell::new(0u32));
	for _ in 0..2 {
		let count = Rc::clone(&count);
		node.on_click(move |_| count.set(count.get() + 1));
	}
	node.dispatch("click").unwrap();
	assert_eq!(count.get(), 2);
	node.dispatch("click").unwrap();
	assert_eq!(count.get(), 4);
}

#[test]
fn test_event_shortcuts_register_their_event_type() {
	let node = fresh("input");
	let seen = Rc::new(Cell::new(0u32));
	{
		let seen = Rc::clone(&seen);
		node.on_input(move |_| seen.set(seen.get() + 1));
	}
	{
		let seen = Rc::clone(&seen);
		node.on_change(move |_| seen.set(seen.get() + 10));
	}
	node.dispatch("input").unwrap();
	node.dispatch("change").unwrap();
	node.dispatch("submit").unwrap();
	assert_eq!(seen.get(), 11);
}

#[test]
fn test_computed_attr_on_existing_node_sees_receiver() {
	let node = fresh("td");
	node.set_attr("headers", Value::computed(|el: &Element| format!("col-{}", el.tag_name())))
		.unwrap();
	assert_eq!(node.attr("headers").as_deref(), Some("col-td"));
}

#[test]
fn test_class_value_computed_toggle() {
	let node = fresh("div");
	node.set_class("flip", ClassValue::computed(|_: &Element| "toggle")).unwrap();
	assert!(node.class("flip"));
	node.set_class("flip", ClassValue::computed(|_: &Element| "toggle")).unwrap();
	assert!(!node.class("flip"));
}

#[test]
fn test_style_pair_reads_back_and_clears() {
	let node = fresh("div");
	node.set_style("margin-top", "4px").unwrap();
	assert_eq!(node.style("margin-top").as_deref(), Some("4px"));
	node.set_style("margin-top", "").unwrap();
	assert_eq!(node.style("margin-top"), None);
}
