use anyhow::Result;
use bs_api::auth;
use clap::Subcommand;
use serde_json::json;
use tracing::info;

use crate::{
	context::Context,
	util::{confirm, prelude::*},
};

#[derive(Subcommand, Debug)]
pub enum AuthCmd {
	/// Create an account
	Register {
		username: String,
		/// Prompted for when missing
		#[arg(long)]
		email: Option<String>,
		/// Prompted for when missing
		#[arg(long, env = "BS_PASSWORD", hide_env_values = true)]
		password: Option<String>,
	},
	/// Log in and remember the session
	Login {
		username: String,
		/// Prompted for when missing
		#[arg(long, env = "BS_PASSWORD", hide_env_values = true)]
		password: Option<String>,
	},
	/// Log out and forget the session
	Logout,
}

pub async fn run(ctx: &mut Context, cmd: AuthCmd) -> Result<()> {
	match cmd {
		AuthCmd::Register {
			username,
			email,
			password,
		} => {
			let email = match email {
				Some(email) => email,
				None => confirm::text("Email")?,
			};
			let password = match password {
				Some(password) => password,
				None => confirm::password("Password")?,
			};

			let message = auth::register(ctx.request(), &username, &email, &password).await?;
			print_output!(ctx, &json!({ "message": message }), |_| println!("{message}"));
		}
		AuthCmd::Login { username, password } => {
			let password = match password {
				Some(password) => password,
				None => confirm::password("Password")?,
			};

			let login = auth::login(ctx.request(), &username, &password).await?;
			ctx.set_session(login.session.clone())?;
			info!(%username, is_admin = login.response.is_admin, "Logged in");

			let destination = login.destination().to_string();
			let output = json!({
				"message": login.response.message,
				"is_admin": login.response.is_admin,
				"destination": destination,
			});
			print_output!(ctx, &output, |_| {
				println!(
					"{}",
					login
						.response
						.message
						.as_deref()
						.unwrap_or("Logged in successfully")
				);
				println!("Continue at {destination}");
			});
		}
		AuthCmd::Logout => {
			let res = auth::logout(ctx.request())
				.await
				.map(|message| println!("{message}"));
			report_error(&res);

			// Forget the session even when the server could not be reached
			ctx.set_session(None)?;
		}
	}

	Ok(())
}
