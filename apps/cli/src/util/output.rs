use anyhow::Result;
use bs_metrics::{Direction, PresentedMetric};
use bs_sync::{Notice, NoticeLevel};
use comfy_table::{presets::UTF8_BORDERS_ONLY, CellAlignment, Table};
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

/// Dashboard table: one row per metric, in the order given
pub fn stats_table(rows: &[PresentedMetric]) -> Table {
	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Metric", "Current", "Change"]);

	for row in rows {
		table.add_row(vec![
			row.label.clone(),
			row.current_display.clone(),
			colored_delta(row),
		]);
	}

	for column in [1, 2] {
		if let Some(column) = table.column_mut(column) {
			column.set_cell_alignment(CellAlignment::Right);
		}
	}

	table
}

fn colored_delta(row: &PresentedMetric) -> String {
	let text = row.delta_with_indicator();
	match row.direction {
		Direction::Increase => text.green().to_string(),
		Direction::Decrease => text.red().to_string(),
		Direction::Unchanged => text.dimmed().to_string(),
	}
}

pub fn print_notice(notice: &Notice) {
	match notice.level {
		NoticeLevel::Success => println!("{} {notice}", "✓".green()),
		NoticeLevel::Warning => eprintln!("{} {notice}", "!".yellow()),
		NoticeLevel::Error => eprintln!("{} {notice}", "✗".red()),
	}
}
