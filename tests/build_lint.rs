#[path = "../build/lint.rs"]
mod lint;

use lint::{code_portion, has_underscore_binding};

#[test]
fn underscore_bindings_are_found_next_to_underscored_strings() {
    assert!(has_underscore_binding("let _x = \"a_b\";"));
    assert!(has_underscore_binding("fn f(_unused: u8, label: &str) {}"));
    assert!(has_underscore_binding("let c = '\"'; let _y = 1;"));
}

#[test]
fn underscores_inside_strings_comments_and_names_are_ignored() {
    assert!(!has_underscore_binding("let x = \"a_b _c\";"));
    assert!(!has_underscore_binding("let y_name = 1; // _later"));
    assert!(!has_underscore_binding("let n = 1_000_usize;"));
    assert!(!has_underscore_binding("let msg = \"say \\\"_hi\\\"\";"));
    assert!(!has_underscore_binding("match v { Some(_) => 1, _ => 0 }"));
}

#[test]
fn code_portion_blanks_strings_and_drops_comments() {
    assert_eq!(code_portion("a(\"x_y\") // note"), "a(\"   \") ");
}
