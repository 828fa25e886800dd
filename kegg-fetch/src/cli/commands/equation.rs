//! Decode a single equation

use anyhow::Result;
use kegg_fetch_core::split_equation;

use crate::cli::app::EquationArgs;
use crate::cli::display;

pub fn execute(args: EquationArgs) -> Result<()> {
    let equation = split_equation(&args.equation);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&equation)?);
    } else {
        println!("{}", display::format_equation(&equation));
    }

    Ok(())
}
