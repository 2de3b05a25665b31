//! Symbol-name matching rules.
//!
//! A user pattern matches a candidate name only when the candidate is
//! exported. In the default mode a lower-case pattern character matches
//! either case of the candidate character while an upper-case pattern
//! character demands an exact match; strict mode requires byte equality.

use super::Config;

/// Whether a name is part of the public surface: its first character is an
/// upper-case letter. This is the single source of truth for visibility.
pub fn is_exported(name: &str) -> bool {
	name.chars().next().is_some_and(char::is_uppercase)
}

/// Whether the user's symbol matches the program's. The program name must be
/// exported; see the module docs for the case-folding rule.
pub fn matches(cfg: &Config, user: &str, program: &str) -> bool {
	if !is_exported(program) {
		return false;
	}
	if cfg.match_case {
		return user == program;
	}
	let mut program_chars = program.chars();
	for u in user.chars() {
		let Some(p) = program_chars.next() else {
			return false;
		};
		if u == p {
			continue;
		}
		if u.is_lowercase() && simple_fold(u) == simple_fold(p) {
			continue;
		}
		return false;
	}
	// Equal length required; no substring matches.
	program_chars.next().is_none()
}

/// The minimum character equivalent to `c` under simple case folding:
/// the smallest codepoint in the closure of the single-character upper- and
/// lower-case mappings.
pub(crate) fn simple_fold(c: char) -> char {
	let mut orbit = vec![c];
	let mut i = 0;
	while i < orbit.len() {
		let cur = orbit[i];
		for mapped in [
			single_char(cur.to_uppercase()),
			single_char(cur.to_lowercase()),
		]
		.into_iter()
		.flatten()
		{
			if !orbit.contains(&mapped) {
				orbit.push(mapped);
			}
		}
		i += 1;
	}
	orbit.into_iter().min().unwrap_or(c)
}

/// The mapping result when it is exactly one character, `None` otherwise
/// (multi-character case mappings take no part in simple folding).
fn single_char(mut mapped: impl Iterator<Item = char>) -> Option<char> {
	let first = mapped.next();
	if mapped.next().is_none() { first } else { None }
}
