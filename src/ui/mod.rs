pub(crate) mod live;

/// Placeholder shown wherever a time has no value yet (empty history, no run
/// on the clock).
pub(crate) const TIME_PLACEHOLDER: &str = "--";

/// Format an elapsed time the way the timing device reports it: millisecond
/// precision with a unit suffix, e.g. `2.345s`.
pub(crate) fn format_seconds(elapsed_s: f64) -> String {
    format!("{:.3}s", elapsed_s)
}
