use crate::cli::GenerateArgs;
use crate::services::output::emit;
use crate::services::synth::{GeneratorConfig, SyntheticGenerator};

pub fn handle_generate(json: bool, args: &GenerateArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig::new(args.users, args.seed, args.days, args.out_dir.clone());
    let report = SyntheticGenerator::new(config).run()?;

    emit(json, &report, |r| {
        let mut lines = vec![format!(
            "generated synthetic datasets for {} users (seed={})",
            r.users, r.seed
        )];
        lines.extend(
            r.files
                .iter()
                .map(|f| format!(" - {} written: {} ({} rows)", f.dataset, f.path, f.rows)),
        );
        lines
    })
}
