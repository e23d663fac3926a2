use std::path::Path;

use anyhow::Context;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;

/// Build an ort cpu session for a YOLO darknet export.
pub fn build_session(model: &Path) -> anyhow::Result<Session> {
    ort::init()
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .commit()?;

    let session = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .commit_from_file(model)
        .with_context(|| format!("failed to load model {model:?}"))?;
    log::debug!("{session:?}");

    Ok(session)
}
