//! Interactive prompts

use anyhow::{anyhow, bail, Result};
use bs_metrics::{EditDraft, FieldId};
use dialoguer::{Confirm, Input, Password};

/// Asks for confirmation unless `yes` was passed; a "no" aborts the command
pub fn confirm_or_abort(prompt: &str, yes: bool) -> Result<()> {
	if yes {
		return Ok(());
	}

	if Confirm::new().with_prompt(prompt).default(false).interact()? {
		Ok(())
	} else {
		bail!("Operation cancelled")
	}
}

pub fn text(prompt: &str) -> Result<String> {
	Ok(Input::<String>::new().with_prompt(prompt).interact_text()?)
}

pub fn password(prompt: &str) -> Result<String> {
	Ok(Password::new().with_prompt(prompt).interact()?)
}

/// Prompts for one draft field, prefilled with its current text.
///
/// The answer goes through the same live formatting as a keystroke, so
/// `12500` is stored as `12,500` under `en-US`.
pub fn metric_field(draft: &mut EditDraft, id: FieldId, label: &str) -> Result<()> {
	let current = draft.text(id).unwrap_or_default().to_string();
	let locale = draft.locale();

	let answer = Input::<String>::new()
		.with_prompt(label)
		.with_initial_text(current)
		.validate_with(|input: &String| -> Result<(), String> {
			locale
				.parse_integer(input)
				.map(|_| ())
				.map_err(|e| e.to_string())
		})
		.interact_text()?;

	store_answer(draft, id, &answer)
		.map(|_| ())
		.ok_or_else(|| anyhow!("{label} is not part of the form"))
}

/// Writes an answer into the draft as if typed with the caret at its end
fn store_answer(draft: &mut EditDraft, id: FieldId, answer: &str) -> Option<usize> {
	draft.input(id, answer, answer.chars().count())
}
