//! Template string parser.
//!
//! Syntax: `:name` declares a parameter whose value may not contain `/`,
//! `*name` declares one whose value may. Names are `[A-Za-z0-9_]+`.
//! Everything else is literal text.

use crate::error::{Result, RouteError};
use crate::pattern::Pattern;
use crate::segment::{is_name_char, Segment};
use std::collections::BTreeSet;

const PARAMETER_MARKER: char = ':';
const SLASH_PARAMETER_MARKER: char = '*';

/// Parse a template into a [`Pattern`].
///
/// # Errors
///
/// - [`RouteError::PatternSyntax`] if a marker is not followed by a name.
/// - [`RouteError::DuplicateParameter`] if a name is used twice.
///
/// # Examples
///
/// ```
/// use wayfinder_routes::{compiler, Segment};
///
/// let pattern = compiler::parse("/files/*path").unwrap();
/// assert_eq!(
///     pattern.segments(),
///     &[Segment::literal("/files/"), Segment::parameter("path", true)]
/// );
/// ```
pub fn parse(template: &str) -> Result<Pattern> {
	let mut segments = Vec::new();
	let mut names = BTreeSet::new();
	let mut literal = String::new();
	let mut chars = template.char_indices().peekable();

	while let Some((index, c)) = chars.next() {
		let allow_slashes = match c {
			PARAMETER_MARKER => false,
			SLASH_PARAMETER_MARKER => true,
			_ => {
				literal.push(c);
				continue;
			}
		};

		let mut name = String::new();
		while let Some((_, c)) = chars.next_if(|&(_, c)| is_name_char(c)) {
			name.push(c);
		}

		if name.is_empty() {
			let found = match chars.peek() {
				Some(&(rest, _)) => format!("'{}'", &template[rest..]),
				None => "end of pattern".to_string(),
			};
			return Err(RouteError::PatternSyntax {
				template: template.to_string(),
				index,
				message: format!("expecting name, found {found}"),
			});
		}

		if !names.insert(name.clone()) {
			return Err(RouteError::DuplicateParameter {
				template: template.to_string(),
				name,
			});
		}

		if !literal.is_empty() {
			segments.push(Segment::literal(std::mem::take(&mut literal)));
		}
		segments.push(Segment::parameter(name, allow_slashes));
	}

	if !literal.is_empty() || segments.is_empty() {
		segments.push(Segment::literal(literal));
	}

	Ok(Pattern::from_parts(segments, names))
}
