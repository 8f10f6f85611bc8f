#![cfg(target_arch = "wasm32")]

use sp_wasm::{canonicalize, compare, is_valid, load_rules, lookup, matches};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn canonical_forms() {
    assert_eq!(canonicalize("[*.]Example.COM", false).as_deref(), Some("[*.]example.com"));
    assert_eq!(canonicalize("file:///", false), None);
    assert_eq!(canonicalize("file:///", true).as_deref(), Some("file:///"));
    assert!(is_valid("https://*:443"));
    assert!(!is_valid("goo*gle.com"));
}

#[wasm_bindgen_test]
fn matching_and_ordering() {
    assert!(matches("[*.]google.com", "https://mail.google.com/inbox"));
    assert!(!matches("[*.]google.com", "https://example.org/"));
    assert!(!matches("[*.]google.com", "not a url"));
    assert_eq!(compare("mail.google.com", "[*.]google.com"), 1);
    assert_eq!(compare("[*.]google.com", "mail.google.com"), -1);
    assert_eq!(compare("a.com", "a.com"), 0);
}

#[wasm_bindgen_test]
fn rule_lookup() {
    assert!(load_rules("* ask\n[*.]google.com block\nmail.google.com allow\n").is_ok());
    assert_eq!(lookup("https://mail.google.com/", None).as_deref(), Some("allow"));
    assert_eq!(lookup("https://docs.google.com/", None).as_deref(), Some("block"));
    assert_eq!(lookup("https://example.org/", None).as_deref(), Some("ask"));
}
