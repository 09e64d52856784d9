/// Options which change what the analysis reports, but never how declarations are ranked
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Adds a section listing the declarations with no parent and nothing left to port
    pub with_leaves: bool,
}
impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaves(mut self, with_leaves: bool) -> Self {
        self.with_leaves = with_leaves;
        self
    }
}
