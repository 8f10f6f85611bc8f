//! WebAssembly bindings for site patterns

use std::sync::Mutex;

use sp_core::parser::{parse, parse_parts};
use sp_core::{parse_rule_list, try_build, Pattern, RuleSet, ValidationMode};
use url::Url;
use wasm_bindgen::prelude::*;

static RULES: Mutex<Option<RuleSet>> = Mutex::new(None);

fn mode(legacy: bool) -> ValidationMode {
    if legacy {
        ValidationMode::Legacy
    } else {
        ValidationMode::Strict
    }
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Pattern for `spec`, warning on the console when it is rejected.
fn parse_logged(spec: &str, legacy: bool) -> Pattern {
    let pattern = parse(spec, mode(legacy));
    if !pattern.is_valid() {
        warn(&format!("sitepattern: rejected pattern {spec:?}"));
    }
    pattern
}

fn parse_url_logged(input: &str) -> Option<Url> {
    match Url::parse(input) {
        Ok(url) => Some(url),
        Err(e) => {
            warn(&format!("sitepattern: invalid URL {input:?}: {e}"));
            None
        }
    }
}

/// Canonical form of `spec`, or `undefined` when it is rejected.
#[wasm_bindgen]
pub fn canonicalize(spec: &str, legacy: bool) -> Option<String> {
    let pattern = parse_logged(spec, legacy);
    pattern.is_valid().then(|| pattern.to_string())
}

#[wasm_bindgen]
pub fn is_valid(spec: &str) -> bool {
    Pattern::from_string(spec).is_valid()
}

#[wasm_bindgen]
pub fn matches(spec: &str, url: &str) -> bool {
    let pattern = parse_logged(spec, false);
    parse_url_logged(url).is_some_and(|u| pattern.matches(&u))
}

/// Relation of `a` to `b`: 2 and -2 disjoint, 1 narrower, -1 broader, 0 identical.
#[wasm_bindgen]
pub fn compare(a: &str, b: &str) -> i32 {
    let a = parse_logged(a, false);
    let b = parse_logged(b, false);
    a.compare(&b) as i32
}

/// Canonical parts of `spec` as a plain object, or the rejection reason.
#[wasm_bindgen]
pub fn pattern_parts(spec: &str) -> Result<JsValue, JsValue> {
    let raw = parse_parts(spec).ok_or_else(|| JsValue::from_str("Malformed pattern"))?;
    let pattern = try_build(&raw, ValidationMode::Strict).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let parts = pattern
        .parts()
        .ok_or_else(|| JsValue::from_str("Pattern has no parts"))?;

    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"scheme".into(), &JsValue::from_str(&parts.scheme));
    let _ = js_sys::Reflect::set(&result, &"isSchemeWildcard".into(), &JsValue::from(parts.is_scheme_wildcard));
    let _ = js_sys::Reflect::set(&result, &"host".into(), &JsValue::from_str(&parts.host));
    let _ = js_sys::Reflect::set(&result, &"hasDomainWildcard".into(), &JsValue::from(parts.has_domain_wildcard));
    let _ = js_sys::Reflect::set(&result, &"port".into(), &JsValue::from_str(&parts.port));
    let _ = js_sys::Reflect::set(&result, &"isPortWildcard".into(), &JsValue::from(parts.is_port_wildcard));
    let _ = js_sys::Reflect::set(&result, &"path".into(), &JsValue::from_str(&parts.path));
    let _ = js_sys::Reflect::set(&result, &"isPathWildcard".into(), &JsValue::from(parts.is_path_wildcard));
    Ok(result.into())
}

/// Replace the loaded rule set with the rules parsed from `text`.
#[wasm_bindgen]
pub fn load_rules(text: &str) -> Result<JsValue, JsValue> {
    let (rules, stats) = parse_rule_list(text);
    let count = rules.len();

    let mut guard = RULES
        .lock()
        .map_err(|_| JsValue::from_str("Rule set lock poisoned"))?;
    *guard = Some(rules);

    if stats.skipped > 0 {
        warn(&format!("sitepattern: skipped {} malformed rules", stats.skipped));
    }

    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"lines".into(), &JsValue::from(stats.lines as u32));
    let _ = js_sys::Reflect::set(&result, &"rules".into(), &JsValue::from(count as u32));
    let _ = js_sys::Reflect::set(&result, &"skipped".into(), &JsValue::from(stats.skipped as u32));
    let _ = js_sys::Reflect::set(&result, &"replaced".into(), &JsValue::from(stats.replaced as u32));
    Ok(result.into())
}

/// Setting name of the most specific loaded rule matching both URLs.
///
/// `secondary_url` defaults to `url`. Returns `undefined` when no rule matches
/// or no rules are loaded.
#[wasm_bindgen]
pub fn lookup(url: &str, secondary_url: Option<String>) -> Option<String> {
    let primary = parse_url_logged(url)?;
    let secondary = match secondary_url {
        Some(s) => parse_url_logged(&s)?,
        None => primary.clone(),
    };

    let guard = RULES.lock().ok()?;
    let rules = guard.as_ref()?;
    rules
        .lookup(&primary, &secondary)
        .map(|rule| rule.setting.as_str().to_string())
}
