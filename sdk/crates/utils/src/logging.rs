use chrono::Utc;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Registry};

// Pretty formatter is formatted for console readability
pub struct PrettyFormatter;

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, _ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let now = Utc::now().format("%y-%m-%d %H:%M:%S").to_string();

        let ts_color = "\x1b[96m";
        let level_color = match *meta.level() {
            Level::TRACE => "\x1b[90m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        };
        let service_color = "\x1b[92m";
        let field_color = "\x1b[90m";
        let reset = "\x1b[0m";

        let mut visitor = FieldExtractor::default();
        event.record(&mut visitor);

        write!(writer, "{}{}{} | ", ts_color, now, reset)?;
        write!(writer, "{}{:<5}{} | ", level_color, *meta.level(), reset)?;
        write!(writer, "{}{:<10}{} | ", service_color, extract_service_name(meta.target()), reset)?;
        write!(writer, "{}", visitor.message)?;

        if !visitor.fields.is_empty() {
            let rendered: Vec<String> = visitor.fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            write!(writer, " {}({}){}", field_color, rendered.join(", "), reset)?;
        }

        writeln!(writer)
    }
}

// JSON formatter, one object per line
pub struct JsonEventFormatter;

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();

        let mut visitor = FieldExtractor::default();
        event.record(&mut visitor);

        let mut root = Map::new();
        root.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        root.insert("level".to_string(), Value::String(meta.level().to_string()));
        root.insert("target".to_string(), Value::String(meta.target().to_string()));
        root.insert("service".to_string(), Value::String(extract_service_name(meta.target()).to_string()));
        root.insert("message".to_string(), Value::String(visitor.message));

        let mut fields: Map<String, Value> = visitor.fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
        if let Some(span) = ctx.lookup_current() {
            fields.insert("span_name".to_string(), Value::String(span.metadata().name().to_string()));
        }
        if !fields.is_empty() {
            root.insert("fields".to_string(), Value::Object(fields));
        }

        let line = serde_json::to_string(&Value::Object(root)).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

#[derive(Default)]
struct FieldExtractor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for FieldExtractor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let formatted = format!("{:?}", value).trim_matches('"').to_string();
        if field.name() == "message" {
            self.message = formatted;
        } else {
            self.fields.push((field.name().to_string(), formatted));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }
}

/// Initialize the tracing subscriber with
/// - PrettyFormatter for console readability (when LOG_FORMAT != "json")
/// - JsonEventFormatter for json logging (when LOG_FORMAT = "json")
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rollups=info,warn"));

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let result = if log_format == "json" {
        let fmt_layer = fmt::layer().event_format(JsonEventFormatter);
        tracing::subscriber::set_global_default(Registry::default().with(env_filter).with(fmt_layer))
    } else {
        let fmt_layer = fmt::layer().event_format(PrettyFormatter);
        tracing::subscriber::set_global_default(Registry::default().with(env_filter).with(fmt_layer))
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already installed");
    }
}

/// Maps crate names to short display names for the service column
fn extract_service_name(target: &str) -> &'static str {
    if target.starts_with("rollups_graphql_client") {
        "GRAPHQL"
    } else if target.starts_with("rollups_ethereum_client") {
        "ETHEREUM"
    } else if target.starts_with("rollups_indexer_client_interface") || target.starts_with("rollups_chain_client_interface") {
        "IFACE"
    } else if target.starts_with("rollups_utils") {
        "UTILS"
    } else if target.starts_with("rollups_sdk") {
        "SDK"
    } else {
        "EXTERNAL"
    }
}
