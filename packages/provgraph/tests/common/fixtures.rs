//! Canned datasets

use super::builders::DatasetBuilder;

pub const T0: &str = "2016-01-01T10:00:00";
pub const T1: &str = "2016-01-02T10:00:00";
pub const T2: &str = "2016-01-03T10:00:00.123456";

/// ```text
/// s1 ─► a1 ─► a2      (an-align)
///  └──► b1            (an-count)
/// ```
/// Two workflows, one analysis each, both fed by the dataset.
pub fn two_workflows() -> DatasetBuilder {
    DatasetBuilder::new()
        .analysis("an-align", "wf-align", "Test workflow: Align reads (BWA)", T0)
        .analysis("an-count", "wf-count", "Count - features", T1)
        .source("s1")
        .file("a1", "an-align", &["s1"])
        .file("a2", "an-align", &["a1"])
        .file("b1", "an-count", &["s1"])
}

/// Two runs of the same workflow in one depth group with different shapes:
/// `an-x` reads two sources, `an-y` reads one.
pub fn repeated_workflow() -> DatasetBuilder {
    DatasetBuilder::new()
        .analysis("an-x", "wf-align", "Align reads", T0)
        .analysis("an-y", "wf-align", "Align reads", T1)
        .source("s1")
        .source("s2")
        .source("s3")
        .file("x1", "an-x", &["s1", "s2"])
        .file("x2", "an-x", &["x1"])
        .file("y1", "an-y", &["s3"])
}

/// Three analyses feeding each other in a ring
pub fn analysis_cycle() -> DatasetBuilder {
    DatasetBuilder::new()
        .analysis("an-1", "wf-1", "one", T0)
        .analysis("an-2", "wf-2", "two", T1)
        .analysis("an-3", "wf-3", "three", T2)
        .file("n1", "an-1", &["n3"])
        .file("n2", "an-2", &["n1"])
        .file("n3", "an-3", &["n2"])
}

/// A two-stage pipeline: the counting analysis consumes the aligner's output
pub fn chained_analyses() -> DatasetBuilder {
    DatasetBuilder::new()
        .analysis("an-align", "wf-align", "Align reads", T0)
        .analysis("an-count", "wf-count", "Count features", T1)
        .source("s1")
        .file("a1", "an-align", &["s1"])
        .file("a2", "an-align", &["a1"])
        .file("c1", "an-count", &["a2"])
        .file("c2", "an-count", &["c1"])
}
