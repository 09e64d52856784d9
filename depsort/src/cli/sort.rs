use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use clap::Args;
use depsort::{AnalysisConfig, Analyzer};
use miden_diagnostics::{
    term::termcolor::ColorChoice, CodeMap, DefaultEmitter, DiagnosticsHandler,
};

#[derive(Args)]
pub struct Sort {
    /// Path to input file
    input: PathBuf,

    #[arg(
        short,
        long,
        help = "Output filename, default to the input file with the .txt extension"
    )]
    output: Option<PathBuf>,

    /// Print the report to stdout instead of writing it to a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Also list declarations with no parent and no remaining dependencies
    #[arg(long)]
    leaves: bool,
}

impl Sort {
    pub fn execute(&self) -> Result<(), String> {
        log::info!("Sorting declarations of {}", self.input.display());

        let codemap = Arc::new(CodeMap::new());
        let emitter = Arc::new(DefaultEmitter::new(ColorChoice::Auto));
        let diagnostics = Arc::new(DiagnosticsHandler::new(
            Default::default(),
            codemap.clone(),
            emitter,
        ));

        let config = AnalysisConfig::new().leaves(self.leaves);
        let analyzer = Analyzer::new(diagnostics.clone(), codemap, config);
        let report = match analyzer.analyze_file(&self.input) {
            Ok(report) => report,
            Err(err) => {
                diagnostics.emit(err);
                return Err("analysis failed".into());
            }
        };

        let rendered = report.render();
        if self.stdout {
            return io::stdout()
                .write_all(rendered.as_bytes())
                .map_err(|err| format!("{err:?}"));
        }

        let output_path = self.output_path();
        if output_path == self.input {
            return Err(format!(
                "refusing to overwrite {}, choose another path with --output",
                self.input.display()
            ));
        }
        fs::write(&output_path, rendered).map_err(|err| format!("{err:?}"))?;
        log::info!(
            "Ranked {} declarations ({} ready), report written to {}",
            report.len(),
            report.ready().count(),
            output_path.display()
        );
        Ok(())
    }

    fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.input.with_extension("txt"),
        }
    }
}
