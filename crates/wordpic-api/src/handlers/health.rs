/// Liveness probe.
pub async fn liveness() -> &'static str {
    "App working fine!"
}
