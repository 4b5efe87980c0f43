use anyhow::Result;
use bs_api::feature_access::FeatureAccessMatrix;
use clap::Args;

#[derive(Args, Debug)]
pub struct AccessUpdateArgs {
	/// User ids, one row each
	#[arg(long, required = true, value_delimiter = ',')]
	pub users: Vec<u64>,
	/// Feature names or column headers, one column each
	#[arg(long, required = true, value_delimiter = ',')]
	pub features: Vec<String>,
	/// Granted cells as `user:feature`; every other cell is sent as denied
	#[arg(long = "grant", value_parser = parse_grant)]
	pub grants: Vec<(u64, String)>,
	/// Endpoint path, defaults to the configured `feature_access_path`
	#[arg(long)]
	pub path: Option<String>,
	/// Print the payload instead of sending it
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,
	/// Skip confirmation prompt
	#[arg(long, short = 'y', default_value_t = false)]
	pub yes: bool,
}

impl AccessUpdateArgs {
	pub fn matrix(&self) -> Result<FeatureAccessMatrix> {
		let mut matrix = FeatureAccessMatrix::new(self.users.iter().copied(), &self.features);

		for (user, feature) in &self.grants {
			matrix.grant(*user, feature)?;
		}

		Ok(matrix)
	}
}

fn parse_grant(arg: &str) -> Result<(u64, String), String> {
	let (user, feature) = arg
		.split_once(':')
		.ok_or_else(|| format!("expected user:feature, got '{arg}'"))?;

	let user = user
		.trim()
		.parse()
		.map_err(|_| format!("'{user}' is not a user id"))?;

	Ok((user, feature.trim().to_string()))
}
