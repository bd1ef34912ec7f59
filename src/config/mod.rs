// Configuration value objects and their validation
//
// AnalysisConfig parameterises model selection and improvement
// classification. TestSuiteConfig groups it with the data policy and the
// settings passed through to the external harness and build step.
//
// Both are constructed once per run, validated before use and read-only
// afterwards. Validation collects every violation instead of failing on the
// first one.

mod analysis;
mod suite;
mod validation;

pub use analysis::{
    default_analysis_config, AnalysisConfig, AnalysisOptions, OutputFiles, OutputOptions,
    OutputSetting,
};
pub use suite::{DataSource, TestSuiteConfig, TestSuiteOptions};
pub use validation::{
    check_distinct_sizes, Artifact, ValidationError, ValidationErrors, MIN_DISTINCT_INPUTS,
};
