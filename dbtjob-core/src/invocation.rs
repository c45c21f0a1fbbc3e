//! dbt invocation formatting

/// Pool name of a job: the job id with `/` replaced by `_`
pub fn pool_name(job_id: &str) -> String {
    job_id.replace('/', "_")
}

/// Formats the dbt selector and vars for a job
///
/// Produces `+{model} --vars '{"pool_name": "{pool}", "scala_job_id": "{job_id}"}'`.
/// Values are substituted literally: a job id or model containing quotes
/// yields a string that no longer parses as shell or JSON.
pub fn format_invocation(model: &str, job_id: &str) -> String {
    format!(
        "+{} --vars '{{\"pool_name\": \"{}\", \"scala_job_id\": \"{}\"}}'",
        model,
        pool_name(job_id),
        job_id
    )
}
