// self
use crate::obs::{Operation, Outcome};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation_outcome(op: Operation, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"relax_operation_total",
			"op" => op.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (op, outcome);
	}
}

/// Records success or failure depending on how `result` settled.
pub fn record_operation_result<T, E>(op: Operation, result: &Result<T, E>) {
	let outcome = if result.is_ok() { Outcome::Success } else { Outcome::Failure };

	record_operation_outcome(op, outcome);
}

/// Records a response cache lookup (when enabled) and emits a trace event.
pub fn record_cache_lookup(hit: bool) {
	let result = if hit { "hit" } else { "miss" };

	#[cfg(feature = "tracing")]
	tracing::trace!(result, "response cache lookup");

	#[cfg(feature = "metrics")]
	{
		metrics::counter!("relax_cache_lookup_total", "result" => result).increment(1);
	}

	#[cfg(not(any(feature = "metrics", feature = "tracing")))]
	{
		let _ = result;
	}
}
