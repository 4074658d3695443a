/// Resolve a result limit: local arg, then the global `--limit`, then the configured default.
#[must_use]
pub fn effective_limit(local: Option<usize>, global: Option<usize>, fallback: usize) -> usize {
    local.or(global).unwrap_or(fallback)
}
