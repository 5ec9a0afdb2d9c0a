mod cli;
mod models;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use eagerport_core::ModelRegistry;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    std::env::set_var("RUST_LOG", &cli.log);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let reg = builtin_registry()?;

    match cli.command {
        Command::List => print!("{}", list_models(&reg)),
        Command::Describe { name } => {
            let summary = reg.describe(&name)?;
            print!("{summary}");
        }
    }

    Ok(())
}

fn list_models(reg: &ModelRegistry) -> String {
    reg.names().iter().map(|name| format!("{name}\n")).collect()
}

fn builtin_registry() -> Result<ModelRegistry> {
    let mut reg = ModelRegistry::new();
    reg.register("mlp", models::MlpModel::default())?;
    reg.register("attention", models::AttentionModel::default())?;
    reg.register("conv", models::ConvModel::default())?;
    tracing::debug!(models = reg.len(), "builtin registry ready");
    Ok(reg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eagerport_core::EagerModel;

    #[test]
    fn builtin_models_describe_cleanly() -> Result<()> {
        let reg = builtin_registry()?;
        assert_eq!(reg.names(), vec!["attention", "conv", "mlp"]);
        for name in reg.names() {
            reg.describe(name)?;
        }
        Ok(())
    }

    #[test]
    fn attention_shares_dims_between_inputs() -> Result<()> {
        let summary = builtin_registry()?.describe("attention")?;
        assert_eq!(summary.kwargs[0].name, "mask");
        let seq: Vec<_> = summary
            .dynamic
            .iter()
            .filter(|d| d.dim.name == "seq")
            .map(|d| d.input.as_str())
            .collect();
        assert_eq!(seq, vec!["mask", "mask", "x"]);

        let module = models::AttentionModel::default().get_eager_model();
        assert_eq!(summary.kwargs[0].shape.dim(1), Some(module.heads));
        assert_eq!(summary.args[0].shape.dim(2), Some(module.embed_dim));
        Ok(())
    }

    #[test]
    fn example_inputs_follow_module_config() -> Result<()> {
        let reg = builtin_registry()?;

        let mlp = models::MlpModel::default().get_eager_model();
        let summary = reg.describe("mlp")?;
        assert_eq!(summary.args[0].shape.dim(1), mlp.widths.first().copied());

        let conv = models::ConvModel::default().get_eager_model();
        let summary = reg.describe("conv")?;
        assert_eq!(summary.args[0].shape.dim(1), Some(conv.channels));
        let height = summary
            .dynamic
            .iter()
            .find(|d| d.dim.name == "height")
            .map(|d| d.dim.min);
        assert_eq!(height, Some(Some(conv.kernel)));
        Ok(())
    }

    #[test]
    fn list_is_sorted_one_per_line() -> Result<()> {
        let reg = builtin_registry()?;
        assert_eq!(list_models(&reg), "attention\nconv\nmlp\n");
        Ok(())
    }

    #[test]
    fn parses_global_log_flag() -> Result<()> {
        let cli = Cli::try_parse_from(["eagerportctl", "--log", "debug", "describe", "mlp"])?;
        assert_eq!(cli.log, "debug");
        assert!(matches!(cli.command, Command::Describe { ref name } if name == "mlp"));

        let cli = Cli::try_parse_from(["eagerportctl", "list", "--log", "warn"])?;
        assert_eq!(cli.log, "warn");
        assert!(matches!(cli.command, Command::List));

        let cli = Cli::try_parse_from(["eagerportctl", "list"])?;
        assert_eq!(cli.log, "info");

        assert!(Cli::try_parse_from(["eagerportctl", "describe"]).is_err());
        Ok(())
    }
}
