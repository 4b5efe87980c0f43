use std::collections::HashMap;

use serde::{ser::SerializeMap, Serialize, Serializer};
use thiserror::Error;

use crate::{
	definition::{label_for, MetricSet},
	format::{NumberError, NumberLocale},
	input::LiveNumberInput,
	value::MetricValues,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
	#[error("{}: {source}", label_for(.key))]
	Malformed {
		key: &'static str,
		#[source]
		source: NumberError,
	},
	#[error("{}: no value in the form", label_for(.0))]
	Missing(&'static str),
}

impl ParseError {
	#[must_use]
	pub const fn key(&self) -> &'static str {
		match self {
			Self::Malformed { key, .. } | Self::Missing(key) => key,
		}
	}
}

/// Parsed form values, one per editable metric in canonical order.
///
/// Serializes as the JSON object sent to `POST /stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditedMetrics {
	values: Vec<(&'static str, i64)>,
}

impl EditedMetrics {
	#[must_use]
	pub fn get(&self, key: &str) -> Option<i64> {
		self.values
			.iter()
			.find_map(|(k, value)| (*k == key).then_some(*value))
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
		self.values.iter().copied()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.values.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl Serialize for EditedMetrics {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.values.len()))?;
		for (key, value) in &self.values {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

/// Parses raw field texts for every editable metric of `set`.
///
/// The first bad or missing field rejects the whole form. Texts for keys that
/// are unknown or not editable are ignored.
pub fn parse_edited_form(
	set: &MetricSet,
	raw_inputs: &HashMap<String, String>,
	locale: NumberLocale,
) -> Result<EditedMetrics, ParseError> {
	set.editable()
		.map(|def| {
			let text = raw_inputs
				.get(def.key())
				.ok_or(ParseError::Missing(def.key()))?;
			parse_field(def.key(), text, locale).map(|value| (def.key(), value))
		})
		.collect::<Result<Vec<_>, _>>()
		.map(|values| EditedMetrics { values })
}

fn parse_field(key: &'static str, text: &str, locale: NumberLocale) -> Result<i64, ParseError> {
	locale
		.parse_integer(text)
		.map_err(|source| ParseError::Malformed { key, source })
}

/// Handle to one field of an [`EditDraft`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct DraftField {
	key: &'static str,
	text: String,
}

/// Uncommitted edit form for the editable metrics of a set.
///
/// Fields are bound once, when the draft is built, and addressed through
/// [`FieldId`]s afterwards. Editing a draft never touches fetched values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
	input: LiveNumberInput,
	fields: Vec<DraftField>,
}

impl EditDraft {
	/// Empty draft, every field blank
	#[must_use]
	pub fn new(set: &MetricSet, locale: NumberLocale) -> Self {
		Self {
			input: LiveNumberInput::new(locale),
			fields: set
				.editable()
				.map(|def| DraftField {
					key: def.key(),
					text: String::new(),
				})
				.collect(),
		}
	}

	/// Draft prefilled with the current values, formatted
	#[must_use]
	pub fn from_values(set: &MetricSet, values: &MetricValues, locale: NumberLocale) -> Self {
		let mut draft = Self::new(set, locale);
		for field in &mut draft.fields {
			field.text = locale.format_integer(values.get(field.key).current);
		}
		draft
	}

	#[must_use]
	pub const fn locale(&self) -> NumberLocale {
		self.input.locale()
	}

	#[must_use]
	pub fn field(&self, key: &str) -> Option<FieldId> {
		self.fields
			.iter()
			.position(|field| field.key == key)
			.map(FieldId)
	}

	pub fn fields(&self) -> impl Iterator<Item = (FieldId, &'static str, &str)> + '_ {
		self.fields
			.iter()
			.enumerate()
			.map(|(i, field)| (FieldId(i), field.key, field.text.as_str()))
	}

	#[must_use]
	pub fn text(&self, id: FieldId) -> Option<&str> {
		self.fields.get(id.0).map(|field| field.text.as_str())
	}

	/// Feeds a keystroke result into a field; returns where the caret goes
	pub fn input(&mut self, id: FieldId, raw: &str, cursor: usize) -> Option<usize> {
		let decorated = self.input.apply(raw, cursor);
		let field = self.fields.get_mut(id.0)?;
		field.text = decorated.text;
		Some(decorated.cursor)
	}

	/// Stores text exactly as typed; it is only checked by [`EditDraft::parse`]
	pub fn set_text(&mut self, id: FieldId, text: impl Into<String>) -> Option<()> {
		let field = self.fields.get_mut(id.0)?;
		field.text = text.into();
		Some(())
	}

	pub fn set_value(&mut self, id: FieldId, value: i64) -> Option<()> {
		let text = self.input.locale().format_integer(value);
		self.fields.get_mut(id.0).map(|field| field.text = text)
	}

	#[must_use]
	pub fn raw_inputs(&self) -> HashMap<String, String> {
		self.fields
			.iter()
			.map(|field| (field.key.to_string(), field.text.clone()))
			.collect()
	}

	pub fn parse(&self) -> Result<EditedMetrics, ParseError> {
		let locale = self.input.locale();
		self.fields
			.iter()
			.map(|field| parse_field(field.key, &field.text, locale).map(|value| (field.key, value)))
			.collect::<Result<Vec<_>, _>>()
			.map(|values| EditedMetrics { values })
	}
}
