use anyhow::anyhow;
use awp_engine::available_parameters;
use clap::Args;
use serde_json::Value;

#[derive(Args, Debug, Clone)]
pub struct ParametersArgs {
    /// Only show one category (temperature, precipitation, wind, air_quality)
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Catalog, or one category of it, as a JSON value.
pub fn parameters_json(args: &ParametersArgs) -> anyhow::Result<Value> {
    let catalog = available_parameters();
    let value = match &args.category {
        Some(name) => {
            let category = catalog
                .get(name)
                .ok_or_else(|| anyhow!("Unknown parameter category '{name}'"))?;
            serde_json::to_value(category)?
        }
        None => serde_json::to_value(&catalog)?,
    };
    Ok(value)
}

pub fn run_parameters(args: &ParametersArgs) -> anyhow::Result<()> {
    let value = parameters_json(args)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
