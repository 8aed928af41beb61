use tentacles_core::api::ErrorReporter;

/// Logs every reported error at `warn`, including its source chain.
#[derive(Debug, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report_error(&self, error: &(dyn std::error::Error + 'static)) {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        tracing::warn!(
            target: "tentacles.errors",
            error = %error,
            caused_by = %chain.join(": "),
            "non-fatal error"
        );
    }
}
