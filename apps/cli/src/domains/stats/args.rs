use clap::Args;

#[derive(Args, Debug)]
pub struct StatsEditArgs {
	/// Submit without asking for confirmation
	#[arg(long, short = 'y', default_value_t = false)]
	pub yes: bool,
}

#[derive(Args, Debug)]
pub struct StatsSetArgs {
	/// Stats to change, as `key=value` (e.g. `kills=1,250`)
	#[arg(required = true, value_parser = parse_assignment)]
	pub values: Vec<(String, String)>,
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
	let (key, value) = arg
		.split_once('=')
		.ok_or_else(|| format!("expected key=value, got '{arg}'"))?;

	let key = key.trim();
	if key.is_empty() {
		return Err(format!("missing stat name in '{arg}'"));
	}

	Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn assignments() {
		assert_eq!(
			parse_assignment("kills=1,250"),
			Ok(("kills".to_string(), "1,250".to_string()))
		);
		assert_eq!(
			parse_assignment(" lost_traps = 3 "),
			Ok(("lost_traps".to_string(), "3".to_string()))
		);
		assert!(parse_assignment("kills").is_err());
		assert!(parse_assignment("=3").is_err());
	}
}
