use std::{fmt, num::IntErrorKind, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Separators used to render and read back grouped integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct NumberLocale {
	tag: &'static str,
	grouping: char,
	decimal: char,
}

impl NumberLocale {
	pub const EN_US: Self = Self {
		tag: "en-US",
		grouping: ',',
		decimal: '.',
	};

	pub const EN_GB: Self = Self {
		tag: "en-GB",
		grouping: ',',
		decimal: '.',
	};

	pub const DE_DE: Self = Self {
		tag: "de-DE",
		grouping: '.',
		decimal: ',',
	};

	pub const FR_FR: Self = Self {
		tag: "fr-FR",
		grouping: '\u{202f}',
		decimal: ',',
	};

	#[must_use]
	pub const fn tag(&self) -> &'static str {
		self.tag
	}

	#[must_use]
	pub const fn grouping(&self) -> char {
		self.grouping
	}

	#[must_use]
	pub const fn decimal(&self) -> char {
		self.decimal
	}

	#[must_use]
	pub fn format_integer(&self, value: i64) -> String {
		let grouped = self.format_unsigned(value.unsigned_abs());
		if value < 0 {
			format!("-{grouped}")
		} else {
			grouped
		}
	}

	#[must_use]
	pub fn format_unsigned(&self, value: u64) -> String {
		group_digits(&value.to_string(), self.grouping)
	}

	/// Reads back a number written with this locale's separators.
	///
	/// Grouping separators and whitespace are ignored anywhere in the text. A
	/// fractional part is accepted and truncated, anything else that is not an
	/// integer literal is rejected.
	pub fn parse_integer(&self, text: &str) -> Result<i64, NumberError> {
		let cleaned = text
			.chars()
			.filter(|c| *c != self.grouping && !is_space(*c))
			.collect::<String>();

		if cleaned.is_empty() {
			return Err(NumberError::Empty);
		}

		let (integer, fraction) = cleaned
			.split_once(self.decimal)
			.unwrap_or((cleaned.as_str(), ""));

		let digits = integer.strip_prefix('-').unwrap_or(integer);
		if digits.is_empty()
			|| !digits.bytes().all(|b| b.is_ascii_digit())
			|| !fraction.bytes().all(|b| b.is_ascii_digit())
		{
			return Err(NumberError::Invalid(text.to_string()));
		}

		integer.parse::<i64>().map_err(|e| match e.kind() {
			IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
				NumberError::OutOfRange(text.to_string())
			}
			_ => NumberError::Invalid(text.to_string()),
		})
	}
}

impl Default for NumberLocale {
	fn default() -> Self {
		Self::EN_US
	}
}

impl fmt::Display for NumberLocale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.tag)
	}
}

impl FromStr for NumberLocale {
	type Err = UnknownLocaleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
			"en" | "en-us" => Ok(Self::EN_US),
			"en-gb" => Ok(Self::EN_GB),
			"de" | "de-de" => Ok(Self::DE_DE),
			"fr" | "fr-fr" => Ok(Self::FR_FR),
			_ => Err(UnknownLocaleError(s.to_string())),
		}
	}
}

impl<'de> Deserialize<'de> for NumberLocale {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer)?
			.parse()
			.map_err(de::Error::custom)
	}
}

impl From<NumberLocale> for String {
	fn from(locale: NumberLocale) -> Self {
		locale.tag.to_string()
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown locale '{0}', expected one of en-US, en-GB, de-DE, fr-FR")]
pub struct UnknownLocaleError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberError {
	#[error("no number was entered")]
	Empty,
	#[error("'{0}' is not a whole number")]
	Invalid(String),
	#[error("'{0}' is too large")]
	OutOfRange(String),
}

pub(crate) fn group_digits(digits: &str, separator: char) -> String {
	let len = digits.len();
	let mut grouped = String::with_capacity(len + len / 3 * separator.len_utf8());

	for (i, digit) in digits.chars().enumerate() {
		if i > 0 && (len - i) % 3 == 0 {
			grouped.push(separator);
		}
		grouped.push(digit);
	}

	grouped
}

pub(crate) fn is_space(c: char) -> bool {
	c.is_whitespace() || matches!(c, '\u{a0}' | '\u{202f}')
}

#[cfg(test)]
mod tests {
	use super::*;

	use pretty_assertions::assert_eq;

	#[test]
	fn groups_thousands() {
		let en = NumberLocale::EN_US;

		assert_eq!(en.format_integer(0), "0");
		assert_eq!(en.format_integer(999), "999");
		assert_eq!(en.format_integer(1_000), "1,000");
		assert_eq!(en.format_integer(1_234_567), "1,234,567");
		assert_eq!(en.format_integer(-45_000), "-45,000");
		assert_eq!(en.format_integer(i64::MIN), "-9,223,372,036,854,775,808");
		assert_eq!(NumberLocale::DE_DE.format_integer(1_234_567), "1.234.567");
		assert_eq!(
			NumberLocale::FR_FR.format_integer(1_234),
			"1\u{202f}234"
		);
	}

	#[test]
	fn parses_grouped_text() {
		let en = NumberLocale::EN_US;

		assert_eq!(en.parse_integer("1,234"), Ok(1234));
		assert_eq!(en.parse_integer(" 12 345 "), Ok(12345));
		assert_eq!(en.parse_integer("1,234.99"), Ok(1234));
		assert_eq!(en.parse_integer("-7"), Ok(-7));
		assert_eq!(en.parse_integer("42."), Ok(42));
		assert_eq!(NumberLocale::DE_DE.parse_integer("1.234,5"), Ok(1234));
	}

	#[test]
	fn rejects_malformed_text() {
		let en = NumberLocale::EN_US;

		assert_eq!(en.parse_integer(""), Err(NumberError::Empty));
		assert_eq!(en.parse_integer(" , "), Err(NumberError::Empty));
		assert_eq!(en.parse_integer("12abc"), Err(NumberError::Invalid("12abc".into())));
		assert_eq!(en.parse_integer(".5"), Err(NumberError::Invalid(".5".into())));
		assert_eq!(en.parse_integer("-"), Err(NumberError::Invalid("-".into())));
		assert_eq!(en.parse_integer("+5"), Err(NumberError::Invalid("+5".into())));
		assert_eq!(
			en.parse_integer("99,999,999,999,999,999,999"),
			Err(NumberError::OutOfRange("99,999,999,999,999,999,999".into()))
		);
	}

	#[test]
	fn format_then_parse_is_identity() {
		for locale in [NumberLocale::EN_US, NumberLocale::DE_DE, NumberLocale::FR_FR] {
			for n in [0, 7, 1_234, 1_000_000, 987_654_321, i64::MAX] {
				assert_eq!(locale.parse_integer(&locale.format_integer(n)), Ok(n));
			}
		}
	}

	#[test]
	fn locale_tags() {
		assert_eq!("en_US".parse::<NumberLocale>(), Ok(NumberLocale::EN_US));
		assert_eq!("DE".parse::<NumberLocale>(), Ok(NumberLocale::DE_DE));
		assert_eq!(NumberLocale::FR_FR.to_string(), "fr-FR");
		assert!("xx-YY".parse::<NumberLocale>().is_err());
		assert_eq!(
			serde_json::to_string(&NumberLocale::DE_DE).expect("serializes"),
			"\"de-DE\""
		);
	}

	#[test]
	fn locale_reads_back_from_owned_json() {
		let json = String::from(r#"{"locale": "fr_FR"}"#);
		let value = serde_json::from_str::<serde_json::Value>(&json).expect("valid json");

		assert_eq!(
			NumberLocale::deserialize(&value["locale"]).expect("known locale"),
			NumberLocale::FR_FR
		);
		assert!(serde_json::from_str::<NumberLocale>("\"xx-YY\"").is_err());
	}
}
