mod args;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use bs_metrics::{label_for, EditDraft, PresentedMetric};
use bs_sync::{
	HttpRemote, MetricSyncModel, MetricsRemote, Notice, Refresh, SubmitError, SubmitOutcome,
};
use clap::Subcommand;

use crate::{
	context::Context,
	util::{confirm, output::stats_table, prelude::*},
};

use self::args::*;

#[derive(Subcommand, Debug)]
pub enum StatsCmd {
	/// Show the battle stats dashboard
	Show,
	/// Edit every stat interactively, then submit
	Edit(StatsEditArgs),
	/// Change some stats, keeping the others at their current values
	Set(StatsSetArgs),
}

pub async fn run(ctx: &Context, cmd: StatsCmd) -> Result<()> {
	ctx.warn_if_logged_out();

	let model = MetricSyncModel::battle(HttpRemote::new(Arc::new(ctx.clone())), ctx.locale())
		.with_timeout(ctx.config.timeout());

	match cmd {
		StatsCmd::Show => {
			model
				.refresh()
				.await
				.map_err(|e| anyhow!(Notice::fetch_failed(&e)))?;

			let rows = model.presented().await;
			print_output!(ctx, &rows, |rows: &Vec<PresentedMetric>| println!(
				"{}",
				stats_table(rows)
			));
		}
		StatsCmd::Edit(args) => {
			let mut draft = prefill(&model).await;
			let fields = draft
				.fields()
				.map(|(id, key, _)| (id, label_for(key)))
				.collect::<Vec<_>>();

			for (id, label) in fields {
				confirm::metric_field(&mut draft, id, &label)?;
			}

			confirm_or_abort("Submit these stats?", args.yes)?;

			let outcome = model.submit_draft(&draft).await.map_err(submit_failed)?;
			report(ctx, &outcome)?;
		}
		StatsCmd::Set(args) => {
			let outcome = set(&model, &args.values).await?;
			report(ctx, &outcome)?;
		}
	}

	Ok(())
}

/// Draft holding the server values, or zeros when they could not be loaded
/// (an account that never submitted has no stats yet).
async fn prefill<R: MetricsRemote>(model: &MetricSyncModel<R>) -> EditDraft {
	if let Err(e) = model.refresh().await {
		print_notice(&Notice::fetch_failed(&e));
	}

	model.draft().await
}

async fn set<R: MetricsRemote>(
	model: &MetricSyncModel<R>,
	values: &[(String, String)],
) -> Result<SubmitOutcome> {
	let mut draft = prefill(model).await;

	for (key, value) in values {
		let id = draft
			.field(key)
			.ok_or_else(|| anyhow!("'{key}' is not an editable stat"))?;
		draft.set_text(id, value.as_str());
	}

	model.submit_draft(&draft).await.map_err(submit_failed)
}

fn submit_failed(e: SubmitError) -> anyhow::Error {
	anyhow!(Notice::submit_failed(&e))
}

fn report(ctx: &Context, outcome: &SubmitOutcome) -> Result<()> {
	for notice in Notice::submitted(outcome) {
		print_notice(&notice);
	}

	if let Ok(Refresh::Applied(rows)) = &outcome.resync {
		print_output!(ctx, rows, |rows: &Vec<PresentedMetric>| println!(
			"{}",
			stats_table(rows)
		));
	}

	Ok(())
}
