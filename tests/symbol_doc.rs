//! Symbol and method queries: full emission, redaction, fold matching, and
//! the not-found paths.

mod utils;

use pkgdoc::{Config, Error};
use pretty_assertions::assert_eq;
use utils::*;

#[test]
fn function_symbol_emits_signature_and_wrapped_doc() {
	let (out, found) = symbol(demo_input(), Config::new(), "F");
	assert!(found);
	let expected = concat!(
		"package demo // import \"example.com/demo\"\n",
		"\n",
		"func F(x int) string\n",
		"    F does stuff.\n",
		"\n",
	);
	assert_eq!(out, expected);
}

#[test]
fn unexported_symbol_reports_not_found() {
	let (out, found) = symbol(demo_input(), Config::new(), "g");
	assert!(!found);
	assert_eq!(out, "");
}

#[test]
fn unknown_symbol_reports_not_found() {
	let (out, found) = symbol(demo_input(), Config::new(), "Missing");
	assert!(!found);
	assert_eq!(out, "");
}

#[test]
fn fold_matching_reaches_symbols_case_insensitively() {
	let (_, found) = symbol(demo_input(), Config::new(), "weekday");
	assert!(found);
	let (_, found) = symbol(demo_input(), Config::new(), "maxwidth");
	assert!(found);
	// An upper-case pattern character demands an exact match.
	let (_, found) = symbol(demo_input(), Config::new(), "WEekday");
	assert!(!found);
}

#[test]
fn match_case_requires_exact_spelling() {
	let cfg = Config::new().with_match_case(true);
	let (_, found) = symbol(demo_input(), cfg, "weekday");
	assert!(!found);
	let (_, found) = symbol(demo_input(), cfg, "Weekday");
	assert!(found);
}

#[test]
fn struct_symbol_redacts_and_lists_members() {
	let (out, found) = symbol(demo_input(), Config::new(), "Buffer");
	assert!(found);
	let expected = concat!(
		"package demo // import \"example.com/demo\"\n",
		"\n",
		"type Buffer struct {\n",
		"\tCap int\n",
		"\t// Has unexported fields.\n",
		"}\n",
		"    A Buffer is a resizable byte container.\n",
		"\n",
		"\n",
		"func NewBuffer() *Buffer\n",
		"func (b *Buffer) Grow(n int)\n",
	);
	assert_eq!(out, expected);
}

#[test]
fn struct_symbol_with_unexported_switch_keeps_fields() {
	let cfg = Config::new().with_unexported(true);
	let (out, _) = symbol(demo_input(), cfg, "Buffer");
	assert!(out.contains("\tdata []byte\n"), "missing field:\n{out}");
	assert!(!out.contains("Has unexported fields."));
}

#[test]
fn interface_symbol_redacts_methods_but_keeps_error() {
	let (out, found) = symbol(demo_input(), Config::new(), "Reader");
	assert!(found);
	assert!(out.contains(concat!(
		"type Reader interface {\n",
		"\tRead(p []byte) (int, error)\n",
		"\terror\n",
		"\t// Has unexported methods.\n",
		"}\n",
	)));
	assert!(!out.contains("close()"));

	let cfg = Config::new().with_unexported(true);
	let (out, _) = symbol(demo_input(), cfg, "Reader");
	assert!(out.contains("\tclose()\n"), "missing method:\n{out}");
}

#[test]
fn type_symbol_lists_grouped_constants() {
	let (out, found) = symbol(demo_input(), Config::new(), "Weekday");
	assert!(found);
	let expected = concat!(
		"package demo // import \"example.com/demo\"\n",
		"\n",
		"type Weekday int\n",
		"    Weekday names a day of the week.\n",
		"\n",
		"\n",
		"const A Weekday = iota ...\n",
	);
	assert_eq!(out, expected);
}

#[test]
fn const_symbol_emits_exported_specs_only() {
	let (out, found) = symbol(demo_input(), Config::new(), "A");
	assert!(found);
	let expected = concat!(
		"package demo // import \"example.com/demo\"\n",
		"\n",
		"const (\n",
		"\tA Weekday = iota\n",
		"\tC\n",
		")\n",
		"    Days of the week.\n",
		"\n",
	);
	assert_eq!(out, expected);
}

#[test]
fn typed_const_is_reachable_by_exact_name() {
	// The group lives under its type but re-homing keeps it addressable.
	let (out, found) = symbol(demo_input(), Config::new(), "C");
	assert!(found);
	assert!(out.contains("const ("));
}

#[test]
fn method_query_emits_signature_and_doc() {
	let (result, out) = method(demo_input(), Config::new(), "Buffer", "Grow");
	assert!(result.expect("query succeeds"));
	let expected = concat!(
		"func (b *Buffer) Grow(n int)\n",
		"    Grow grows the buffer so that it can hold at least n more bytes.\n",
		"\n",
	);
	assert_eq!(out, expected);
}

#[test]
fn bare_method_name_falls_back_across_types() {
	let (out, found) = symbol(demo_input(), Config::new(), "Grow");
	assert!(found);
	assert!(out.contains("func (b *Buffer) Grow(n int)\n"));
}

#[test]
fn method_query_on_missing_method_is_not_found() {
	let (result, out) = method(demo_input(), Config::new(), "Buffer", "Shrink");
	assert!(!result.expect("query succeeds"));
	assert_eq!(out, "");
}

#[test]
fn method_query_on_non_type_is_fatal() {
	let (result, _) = method(demo_input(), Config::new(), "Missing", "Grow");
	let err = result.expect_err("query fails");
	assert!(matches!(err, Error::NotAType { .. }));
	assert_eq!(
		err.to_string(),
		"symbol Missing is not a type in package demo installed in \"example.com/demo\""
	);
}

#[test]
fn unexported_method_stays_hidden() {
	let (result, out) = method(demo_input(), Config::new(), "Buffer", "len");
	assert!(!result.expect("query succeeds"));
	assert_eq!(out, "");
}
