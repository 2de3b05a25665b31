//! Plain-text rendering of doc comments.
//!
//! Doc text is split into paragraph and preformatted blocks. Paragraphs are
//! word-wrapped under an indent prefix; preformatted blocks (lines indented
//! in the source comment) are emitted verbatim under their own prefix after
//! the common leading whitespace is stripped.

/// Append `text` to `out`, word-wrapped and indented.
///
/// `prefix` is prepended to every paragraph line and `pre_prefix` to every
/// preformatted line. `width` is the maximum content width of a wrapped
/// line, not counting the prefix. Blocks are separated by one blank line and
/// the output always ends with a single newline (unless `text` holds no
/// blocks at all, in which case nothing is appended).
pub fn to_text(out: &mut String, text: &str, prefix: &str, pre_prefix: &str, width: usize) {
	let blocks = parse_blocks(text);
	for (i, b) in blocks.iter().enumerate() {
		if i > 0 {
			out.push('\n');
		}
		match b {
			TextBlock::Para(lines) => wrap_words(out, lines, prefix, width),
			TextBlock::Pre(lines) => {
				let strip = common_indent(lines);
				for line in lines {
					if line.trim().is_empty() {
						out.push('\n');
						continue;
					}
					out.push_str(pre_prefix);
					out.push_str(&line[strip..]);
					out.push('\n');
				}
			}
		}
	}
}

enum TextBlock<'a> {
	Para(Vec<&'a str>),
	Pre(Vec<&'a str>),
}

fn is_pre_line(line: &str) -> bool {
	line.starts_with(' ') || line.starts_with('\t')
}

fn parse_blocks(text: &str) -> Vec<TextBlock<'_>> {
	let lines: Vec<&str> = text.lines().collect();
	let mut blocks = Vec::new();
	let mut i = 0;
	while i < lines.len() {
		if lines[i].trim().is_empty() {
			i += 1;
			continue;
		}
		let start = i;
		if is_pre_line(lines[i]) {
			// Interior blank lines stay part of the preformatted block.
			while i < lines.len() && (lines[i].trim().is_empty() || is_pre_line(lines[i])) {
				i += 1;
			}
			let mut block = lines[start..i].to_vec();
			while block.last().is_some_and(|line| line.trim().is_empty()) {
				block.pop();
			}
			blocks.push(TextBlock::Pre(block));
		} else {
			while i < lines.len() && !lines[i].trim().is_empty() && !is_pre_line(lines[i]) {
				i += 1;
			}
			blocks.push(TextBlock::Para(lines[start..i].to_vec()));
		}
	}
	blocks
}

fn wrap_words(out: &mut String, lines: &[&str], prefix: &str, width: usize) {
	let mut line_len = 0;
	for word in lines.iter().flat_map(|line| line.split_whitespace()) {
		if line_len == 0 {
			out.push_str(prefix);
		} else if line_len + 1 + word.len() > width {
			out.push('\n');
			out.push_str(prefix);
			line_len = 0;
		} else {
			out.push(' ');
			line_len += 1;
		}
		out.push_str(word);
		line_len += word.len();
	}
	if line_len > 0 {
		out.push('\n');
	}
}

/// Byte length of the leading whitespace shared by every non-blank line.
fn common_indent(lines: &[&str]) -> usize {
	let mut common: Option<&str> = None;
	for line in lines {
		if line.trim().is_empty() {
			continue;
		}
		let indent = &line[..line.len() - line.trim_start().len()];
		common = Some(match common {
			None => indent,
			Some(prev) => {
				let shared = prev
					.bytes()
					.zip(indent.bytes())
					.take_while(|(a, b)| a == b)
					.count();
				&prev[..shared]
			}
		});
	}
	common.map_or(0, str::len)
}
