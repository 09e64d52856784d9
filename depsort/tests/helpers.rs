use std::fs;

use depsort::{AnalysisConfig, RankedReport};

#[derive(Debug)]
pub enum TestError {
    IO(String),
}

pub struct Test {
    input_path: String,
    config: AnalysisConfig,
}

impl Test {
    pub fn new(input_path: String) -> Self {
        Test {
            input_path,
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_leaves(mut self) -> Self {
        self.config = self.config.leaves(true);
        self
    }

    pub fn analyze(&self) -> Result<RankedReport, TestError> {
        // load source input from file
        let source = fs::read_to_string(&self.input_path).map_err(|err| {
            TestError::IO(format!(
                "Failed to open input file `{:?}` - {}",
                self.input_path, err
            ))
        })?;

        Ok(depsort::analyze_with(&source, self.config))
    }

    pub fn render(&self) -> Result<String, TestError> {
        self.analyze().map(|report| report.render())
    }
}
