//! End-to-end computed value checks against challenge-style markup.

use css_quest_style::prelude::*;

const ARENA_CSS: &str = r#"
.challenge-arena-container * { box-sizing: border-box; }
div, span, p, ul, li, plate, apple, orange, pickle, bento, button {
    min-width: 10px;
    min-height: 10px;
    background-color: rgba(255, 255, 255, 0.1);
    border: 1px dashed rgba(255, 255, 255, 0.3);
    color: white;
    display: block;
    padding: 5px;
    margin: 5px;
    font-size: 14px;
    text-align: center;
    line-height: 1.2;
}
.box { width: 50px; height: 50px; background-color: #3498db; }
.item { width: 40px; height: 40px; background-color: #e74c3c; }
.card { padding: 10px; border-radius: 8px; }
"#;

fn arena(markup: &str, learner: &str) -> Arena {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let mut arena = Arena::from_markup(&format!(
        "<body><div class='challenge-arena-container'>{markup}</div></body>"
    ));
    arena.replace_stylesheet(StylePriority::Arena, ARENA_CSS);
    arena.replace_stylesheet(StylePriority::Learner, learner);
    arena
}

fn values(arena: &Arena, selector: &str, property: &str) -> Vec<String> {
    arena
        .query_selector_all(selector)
        .unwrap()
        .into_iter()
        .map(|node| arena.computed_value(node, property).unwrap())
        .collect()
}

#[test]
fn arena_preset_classes_apply() {
    let arena = arena("<div class='box'></div><div class='item'></div>", "");

    assert_eq!(values(&arena, ".box", "width"), ["50px"]);
    assert_eq!(values(&arena, ".box", "background-color"), ["rgb(52, 152, 219)"]);
    assert_eq!(values(&arena, ".item", "background-color"), ["rgb(231, 76, 60)"]);
    assert_eq!(values(&arena, ".item", "border-top-style"), ["dashed"]);
    assert_eq!(values(&arena, ".item", "border-top-color"), ["rgba(255, 255, 255, 0.3)"]);
    assert_eq!(values(&arena, ".item", "box-sizing"), ["border-box"]);
    assert_eq!(values(&arena, ".item", "line-height"), ["16.8px"]);
}

#[test]
fn learner_sheet_wins_on_equal_specificity() {
    let arena = arena(
        "<div class='box'></div><div class='item'></div>",
        ".box { background-color: rgb(173, 255, 47); }",
    );

    assert_eq!(values(&arena, ".box", "background-color"), ["rgb(173, 255, 47)"]);
    assert_eq!(values(&arena, ".item", "background-color"), ["rgb(231, 76, 60)"]);
}

#[test]
fn arena_sheet_wins_on_higher_specificity() {
    let arena = arena(
        "<div class='card red'></div>",
        "div { padding: 2px; }",
    );

    assert_eq!(values(&arena, ".card", "padding"), ["10px"]);
}

#[test]
fn shorthands_expand_and_serialize() {
    let arena = arena(
        "<div class='card'></div>",
        ".card { margin: 1px 2px 3px; border: 2px solid #ff0000; border-radius: 4px; gap: 8px 4px; flex: 1; }",
    );

    assert_eq!(values(&arena, ".card", "margin"), ["1px 2px 3px"]);
    assert_eq!(values(&arena, ".card", "margin-left"), ["2px"]);
    assert_eq!(values(&arena, ".card", "border"), ["2px solid rgb(255, 0, 0)"]);
    assert_eq!(values(&arena, ".card", "border-bottom-left-radius"), ["4px"]);
    assert_eq!(values(&arena, ".card", "row-gap"), ["8px"]);
    assert_eq!(values(&arena, ".card", "column-gap"), ["4px"]);
    assert_eq!(values(&arena, ".card", "flex-grow"), ["1"]);
    assert_eq!(values(&arena, ".card", "flex-basis"), ["0%"]);
}

#[test]
fn colors_serialize_canonically() {
    let arena = arena(
        "<p class='a'></p><p class='b'></p><p class='c'></p><p class='d'></p>",
        ".a { color: #0f0 } .b { color: hsl(120, 100%, 25%) } .c { color: rgba(0, 0, 255, 50%) } .d { color: transparent }",
    );

    assert_eq!(values(&arena, ".a", "color"), ["rgb(0, 255, 0)"]);
    assert_eq!(values(&arena, ".b", "color"), ["rgb(0, 128, 0)"]);
    assert_eq!(values(&arena, ".c", "color"), ["rgba(0, 0, 255, 0.5)"]);
    assert_eq!(values(&arena, ".d", "color"), ["rgba(0, 0, 0, 0)"]);
}

#[test]
fn malformed_rules_are_isolated() {
    let arena = arena(
        "<div class='box'></div>",
        ".box { width: 70px; height: ; color: red } .box:bogus { color: blue } .box { opacity: 0.5 }",
    );

    assert_eq!(values(&arena, ".box", "width"), ["70px"]);
    assert_eq!(values(&arena, ".box", "color"), ["rgb(255, 0, 0)"]);
    assert_eq!(values(&arena, ".box", "opacity"), ["0.5"]);
    assert_eq!(values(&arena, ".box", "height"), ["50px"]);
}

#[test]
fn structural_pseudo_classes() {
    let arena = arena(
        "<ul><li>1</li><li>2</li><li>3</li><li>4</li></ul>",
        "li:nth-child(2n) { color: red } li:first-child { color: blue } li:last-of-type { font-weight: bold }",
    );

    assert_eq!(
        values(&arena, "li", "color"),
        ["rgb(0, 0, 255)", "rgb(255, 0, 0)", "rgb(255, 255, 255)", "rgb(255, 0, 0)"]
    );
    assert_eq!(values(&arena, "li:last-child", "font-weight"), ["700"]);
}

#[test]
fn interaction_states_never_match_statically() {
    let arena = arena("<button class='button-hover'>b</button>", ".button-hover:hover { color: red }");

    assert_eq!(values(&arena, "button", "color"), ["rgb(255, 255, 255)"]);
    assert!(arena.query_selector_all("button:hover").unwrap().is_empty());
}

#[test]
fn display_values_for_flex_layouts() {
    let arena = arena(
        "<div class='row'><span class='cell'>a</span><span class='cell'>b</span></div>",
        ".row { display: flex; flex-direction: column; justify-content: space-between } .cell { display: inline-block }",
    );

    assert_eq!(values(&arena, ".row", "display"), ["flex"]);
    assert_eq!(values(&arena, ".row", "flex-flow"), ["column nowrap"]);
    assert_eq!(values(&arena, ".row", "justify-content"), ["space-between"]);
    assert_eq!(values(&arena, ".cell", "display"), ["block", "block"]);
}

#[test]
fn negative_font_size_is_dropped() {
    let arena = arena("<div class='box'><span>x</span></div>", ".box { font-size: -5px }");

    assert_eq!(values(&arena, ".box", "font-size"), ["14px"]);
    assert_eq!(values(&arena, ".box span", "font-size"), ["14px"]);
}

#[test]
fn transitions_serialize_every_part() {
    let arena = arena(
        "<div class='box'></div><div class='item'></div>",
        ".box { transition: all 0.3s ease } .item { transition: opacity 250ms, transform 1s ease-out 100ms }",
    );

    assert_eq!(values(&arena, ".box", "transition"), ["all 0.3s ease 0s"]);
    assert_eq!(
        values(&arena, ".item", "transition"),
        ["opacity 0.25s ease 0s, transform 1s ease-out 0.1s"]
    );
}
