//! Minimal `/metrics` endpoint. `tiny_http` rather than a full web
//! framework since this is ambient observability (§10.5), not a feature;
//! exporter wiring is explicitly out of scope (spec §1).

use mmf_orchestrator::METRICS;

/// Runs the metrics HTTP server until the process exits. Spawned onto its
/// own OS thread since `tiny_http::Server::recv` blocks synchronously; the
/// async control loop never waits on it.
pub fn serve(addr: &str) -> anyhow::Result<()> {
    let server = tiny_http::Server::http(addr)
        .map_err(|err| anyhow::anyhow!("failed to bind metrics server on {addr}: {err}"))?;

    tracing::info!(addr, "metrics server listening");

    for request in server.incoming_requests() {
        let body = METRICS.prometheus_format();
        let response = tiny_http::Response::from_string(body).with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/plain; version=0.0.4"[..])
                .expect("static header name/value is always valid"),
        );
        if let Err(err) = request.respond(response) {
            tracing::warn!(error = %err, "failed to write metrics response");
        }
    }

    Ok(())
}
