use crate::format::{group_digits, NumberLocale};

/// Text of a numeric field after decoration, with the caret position counted
/// in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorated {
	pub text: String,
	pub cursor: usize,
}

/// Keeps a free-text numeric field grouped while the user types.
///
/// On every keystroke the field content is reduced to its digits (a fraction
/// after the decimal separator is dropped), grouped again and written back.
/// The caret stays after the same digit it was after before decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveNumberInput {
	locale: NumberLocale,
}

impl LiveNumberInput {
	#[must_use]
	pub const fn new(locale: NumberLocale) -> Self {
		Self { locale }
	}

	#[must_use]
	pub const fn locale(&self) -> NumberLocale {
		self.locale
	}

	#[must_use]
	pub fn apply(&self, raw: &str, cursor: usize) -> Decorated {
		let negative = raw.trim_start().starts_with('-');

		let mut digits = String::new();
		let mut digits_before_cursor: usize = 0;
		for (position, c) in raw.chars().enumerate() {
			if c == self.locale.decimal() {
				break;
			}
			if c.is_ascii_digit() {
				digits.push(c);
				if position < cursor {
					digits_before_cursor += 1;
				}
			}
		}

		let significant = digits.trim_start_matches('0');
		let kept = if significant.is_empty() && !digits.is_empty() {
			"0"
		} else {
			significant
		};
		let dropped = digits.len() - kept.len();
		let digits_before_cursor = digits_before_cursor.saturating_sub(dropped).min(kept.len());

		// A lone sign is not a number yet
		let negative = negative && !kept.is_empty();

		let mut text = String::with_capacity(raw.len() + kept.len() / 3);
		if negative {
			text.push('-');
		}
		text.push_str(&group_digits(kept, self.locale.grouping()));

		let cursor = Self::cursor_after_digits(&text, negative, digits_before_cursor);

		Decorated { text, cursor }
	}

	/// Decorates a whole value at once, caret at the end
	#[must_use]
	pub fn format(&self, raw: &str) -> String {
		self.apply(raw, raw.chars().count()).text
	}

	fn cursor_after_digits(text: &str, negative: bool, digit_count: usize) -> usize {
		if digit_count == 0 {
			return usize::from(negative);
		}

		let mut seen = 0;
		for (position, c) in text.chars().enumerate() {
			if c.is_ascii_digit() {
				seen += 1;
				if seen == digit_count {
					return position + 1;
				}
			}
		}

		text.chars().count()
	}
}
