mod args;

use anyhow::Result;
use bs_api::feature_access::{self, FeatureAccessMatrix};
use clap::Subcommand;
use tracing::info;

use crate::{
	context::Context,
	util::{output::print_json, prelude::*},
};

use self::args::*;

#[derive(Subcommand, Debug)]
pub enum AccessCmd {
	/// Send the full feature access matrix (admins only)
	Update(AccessUpdateArgs),
}

pub async fn run(ctx: &Context, cmd: AccessCmd) -> Result<()> {
	match cmd {
		AccessCmd::Update(args) => {
			let matrix = args.matrix()?;

			if args.dry_run {
				return print_json(&matrix);
			}

			ctx.warn_if_logged_out();
			confirm_or_abort(
				&format!(
					"Replace feature access for {} users and {} features?",
					matrix.users().len(),
					matrix.features().len()
				),
				args.yes,
			)?;

			let path = args
				.path
				.as_deref()
				.unwrap_or(&ctx.config.feature_access_path);
			feature_access::update(ctx.request(), path, &matrix).await?;

			info!(path, "Feature access updated");
			print_output!(ctx, &matrix, |_: &FeatureAccessMatrix| {
				println!("Feature access updated successfully");
			});
		}
	}

	Ok(())
}
