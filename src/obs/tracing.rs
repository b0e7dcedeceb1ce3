// crates.io
use tracing::{Instrument, instrument::Instrumented};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
// self
use crate::{_prelude::*, obs::CallKind};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "tekmetric_gateway=info,tower_http=info";

/// Output format for the process-wide subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
	/// Human-readable single-line output.
	#[default]
	Text,
	/// Newline-delimited JSON, one object per event.
	Json,
}
impl std::str::FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"text" | "pretty" | "" => Ok(Self::Text),
			"json" => Ok(Self::Json),
			other => Err(format!("unknown log format `{other}`")),
		}
	}
}

/// Installs the global subscriber. `RUST_LOG` wins over `filter` when set.
pub fn install_subscriber(filter: &str, format: LogFormat) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
	let registry = tracing_subscriber::registry().with(filter);

	match format {
		LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
		LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
	}
}

/// A span builder used around upstream calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		let span = tracing::info_span!("tekmetric_gateway.call", call = kind.as_str(), stage);

		Self { span }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}
