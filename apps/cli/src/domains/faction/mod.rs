use anyhow::Result;
use bs_api::faction;
use clap::Subcommand;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use serde_json::json;

use crate::{context::Context, util::prelude::*};

#[derive(Subcommand, Debug)]
pub enum FactionCmd {
	/// Create a faction and get its invitation code
	Create { name: String },
	/// Join a faction with an invitation code
	Join { invitation_code: String },
	/// List the members of your faction
	Members,
}

pub async fn run(ctx: &Context, cmd: FactionCmd) -> Result<()> {
	ctx.warn_if_logged_out();

	match cmd {
		FactionCmd::Create { name } => {
			let out = faction::create(ctx.request(), &name).await?;
			print_output!(
				ctx,
				&json!({ "message": out.message, "invitation_code": out.invitation_code }),
				|_| println!("{}", out.confirmation())
			);
		}
		FactionCmd::Join { invitation_code } => {
			let message = faction::join(ctx.request(), invitation_code.trim()).await?;
			print_output!(ctx, &json!({ "message": message }), |_| println!("{message}"));
		}
		FactionCmd::Members => {
			let members = faction::members(ctx.request()).await?;
			print_output!(ctx, &members, |members: &Vec<String>| {
				if members.is_empty() {
					println!("No members found");
					return;
				}

				let mut table = Table::new();
				table.load_preset(UTF8_BORDERS_ONLY);
				table.set_header(vec!["Member"]);
				for member in members {
					table.add_row(vec![member]);
				}
				println!("{table}");
			});
		}
	}

	Ok(())
}
