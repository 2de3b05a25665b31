//! Shared fixtures for the integration tests: a demo package exercising
//! every declaration kind, plus capture helpers running queries against an
//! in-memory sink.

#![allow(dead_code)]

use pkgdoc::{Config, Package, PackageInput, Result};

/// Package description for the `demo` package.
pub const DEMO_JSON: &str = r#"{
	"package": {
		"name": "demo",
		"import_path": "example.com/demo",
		"dir": "/src/demo",
		"files": ["demo.go"],
		"is_command": false
	},
	"file": {
		"doc": "Package demo does X.",
		"decls": [
			{"decl": "gen", "tok": "type", "specs": [
				{"spec": "type", "name": "Weekday",
				 "doc": "Weekday names a day of the week.",
				 "type": {"kind": "ident", "name": "int"}}
			]},
			{"decl": "gen", "tok": "type", "specs": [
				{"spec": "type", "name": "Buffer",
				 "doc": "A Buffer is a resizable byte container.",
				 "type": {"kind": "struct", "fields": [
					{"names": ["Cap"], "type": {"kind": "ident", "name": "int"}},
					{"names": ["data"], "type": {"kind": "array",
						"elt": {"kind": "ident", "name": "byte"}}}
				 ]}}
			]},
			{"decl": "gen", "tok": "type", "specs": [
				{"spec": "type", "name": "Reader",
				 "doc": "Reader wraps the basic Read method.",
				 "type": {"kind": "interface", "methods": [
					{"names": ["Read"], "type": {"kind": "func", "type": {
						"params": [{"names": ["p"], "type": {"kind": "array",
							"elt": {"kind": "ident", "name": "byte"}}}],
						"results": [{"type": {"kind": "ident", "name": "int"}},
						            {"type": {"kind": "ident", "name": "error"}}]
					}}},
					{"type": {"kind": "ident", "name": "error"}},
					{"names": ["close"], "type": {"kind": "func", "type": {}}}
				 ]}}
			]},
			{"decl": "gen", "tok": "const", "grouped": true,
			 "doc": "Days of the week.",
			 "specs": [
				{"spec": "value", "names": ["A"],
				 "type": {"kind": "ident", "name": "Weekday"},
				 "values": [{"kind": "lit", "value": "iota"}]},
				{"spec": "value", "names": ["b"]},
				{"spec": "value", "names": ["C"]}
			]},
			{"decl": "gen", "tok": "const",
			 "doc": "MaxWidth is the widest line printed.",
			 "specs": [
				{"spec": "value", "names": ["MaxWidth"],
				 "values": [{"kind": "lit", "value": "80"}]}
			]},
			{"decl": "gen", "tok": "var", "specs": [
				{"spec": "value", "names": ["Debug"],
				 "type": {"kind": "ident", "name": "bool"}}
			]},
			{"decl": "func", "name": "F", "doc": "F does stuff.",
			 "type": {
				"params": [{"names": ["x"], "type": {"kind": "ident", "name": "int"}}],
				"results": [{"type": {"kind": "ident", "name": "string"}}]
			 },
			 "body": {}},
			{"decl": "func", "name": "g", "type": {}, "body": {}},
			{"decl": "func", "name": "NewBuffer",
			 "doc": "NewBuffer returns an empty Buffer.",
			 "type": {"results": [{"type": {"kind": "star",
				"expr": {"kind": "ident", "name": "Buffer"}}}]},
			 "body": {}},
			{"decl": "func", "name": "Grow",
			 "doc": "Grow grows the buffer so that it can hold at least n more bytes.",
			 "recv": [{"names": ["b"], "type": {"kind": "star",
				"expr": {"kind": "ident", "name": "Buffer"}}}],
			 "type": {"params": [{"names": ["n"],
				"type": {"kind": "ident", "name": "int"}}]},
			 "body": {}},
			{"decl": "func", "name": "len",
			 "recv": [{"names": ["b"], "type": {"kind": "star",
				"expr": {"kind": "ident", "name": "Buffer"}}}],
			 "type": {"results": [{"type": {"kind": "ident", "name": "int"}}]},
			 "body": {}}
		],
		"notes": {"BUG": [{"uid": "r", "body": "the buffer never shrinks"}]}
	}
}"#;

/// Decode the demo package description.
pub fn demo_input() -> PackageInput {
	PackageInput::from_json(DEMO_JSON).expect("demo fixture decodes")
}

/// Run the package-overview query and capture its output.
pub fn overview(input: PackageInput, cfg: Config) -> String {
	let mut sink = Vec::new();
	Package::new(input, "demo.json", cfg, &mut sink)
		.package_doc()
		.expect("package_doc succeeds");
	String::from_utf8(sink).expect("output is utf-8")
}

/// Run a symbol query and capture its output along with the found flag.
pub fn symbol(input: PackageInput, cfg: Config, symbol: &str) -> (String, bool) {
	let mut sink = Vec::new();
	let found = Package::new(input, "demo.json", cfg, &mut sink)
		.symbol_doc(symbol)
		.expect("symbol_doc succeeds");
	(String::from_utf8(sink).expect("output is utf-8"), found)
}

/// Run a method query and capture its output along with the result.
pub fn method(
	input: PackageInput,
	cfg: Config,
	symbol: &str,
	method: &str,
) -> (Result<bool>, String) {
	let mut sink = Vec::new();
	let result = Package::new(input, "demo.json", cfg, &mut sink).method_doc(symbol, method);
	(result, String::from_utf8(sink).expect("output is utf-8"))
}
