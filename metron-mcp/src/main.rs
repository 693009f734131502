//! Metron MCP Server
//!
//! Line-delimited JSON-RPC over stdio. Logs go to stderr.
//!
//! Tools:
//! - convert: Convert a value between two unit abbreviations
//! - describe_unit: Describe one unit
//! - list_units: List units, filtered by measure and/or system
//! - search_units: Find units by abbreviation, name or tag
//! - list_measures: List measures and their systems
//! - reload_registry: Re-read the registry file and swap the cache
//!
//! Environment:
//! - METRON_REGISTRY_PATH: registry file (.json/.yaml/.yml); built-in units when unset
//! - METRON_NAMES_PATH: optional {raw name: display name} table
//! - METRON_STRICT: "1"/"true" to reject duplicate abbreviations
//! - RUST_LOG: log filter (default "info")

use metron_core::ErrorReport;
use metron_units::{config, RegistryError, SharedCache, UnitCache};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "metron";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server settings read from the environment
#[derive(Debug, Clone, Default)]
struct ServerConfig {
    registry_path: Option<PathBuf>,
    names_path: Option<PathBuf>,
    strict: bool,
}

impl ServerConfig {
    fn from_env() -> Self {
        ServerConfig {
            registry_path: env::var("METRON_REGISTRY_PATH").ok().map(PathBuf::from),
            names_path: env::var("METRON_NAMES_PATH").ok().map(PathBuf::from),
            strict: env::var("METRON_STRICT")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Load the registry and names and build a cache
    fn build_cache(&self) -> Result<UnitCache, RegistryError> {
        let registry = match &self.registry_path {
            Some(path) => config::load(path)?,
            None => metron_units::builtin::registry(),
        };
        let names = match &self.names_path {
            Some(path) => config::load_names(path)?,
            None => HashMap::new(),
        };
        let resolve = config::name_table(names);
        if self.strict {
            UnitCache::build_strict(registry, resolve)
        } else {
            Ok(UnitCache::build(registry, resolve))
        }
    }
}

struct Server {
    config: ServerConfig,
    cache: SharedCache,
}

impl Server {
    fn new(config: ServerConfig) -> Result<Self, RegistryError> {
        let cache = SharedCache::new(config.build_cache()?);
        Ok(Server { config, cache })
    }
}

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: -32602, message: message.into(), data: None }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = ServerConfig::from_env();
    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Metron MCP Server starting");
    info!(registry = ?config.registry_path, names = ?config.names_path, strict = config.strict, "configuration");

    let server = match Server::new(config) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to load unit registry: {}", e);
            std::process::exit(1);
        }
    };
    info!(units = server.cache.snapshot().len(), "server ready, waiting for requests");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let response = match serde_json::from_str::<McpRequest>(line) {
                    Ok(request) => {
                        debug!(method = %request.method, "processing");
                        let response = handle_request(&server, &request);
                        // Notifications (no id) get no response
                        if request.id.is_none() {
                            continue;
                        }
                        response
                    }
                    Err(e) => {
                        warn!("error parsing request: {}", e);
                        McpResponse {
                            jsonrpc: "2.0".to_string(),
                            id: None,
                            result: None,
                            error: Some(McpError {
                                code: -32700,
                                message: format!("Parse error: {}", e),
                                data: None,
                            }),
                        }
                    }
                };

                if let Err(e) = write_response(&response) {
                    error!("error writing response: {}", e);
                    break;
                }
            }
            Err(e) => {
                error!("error reading input: {}", e);
                break;
            }
        }
    }

    info!("server shutting down");
}

fn write_response(response: &McpResponse) -> io::Result<()> {
    let json = serde_json::to_string(response)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()
}

fn handle_request(server: &Server, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(server, &request.params),

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit conversion between metric, imperial and other unit systems"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Use list_measures and list_units to discover unit abbreviations, then convert values with convert. Abbreviations are case-sensitive (\"mW\" is not \"MW\")."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value from one unit to another of the same measure",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": { "type": "number", "description": "Value to convert" },
                        "from": { "type": "string", "description": "Source unit abbreviation (e.g. \"km\")" },
                        "to": { "type": "string", "description": "Target unit abbreviation (e.g. \"mi\")" }
                    },
                    "required": ["value", "from", "to"]
                }
            },
            {
                "name": "describe_unit",
                "description": "Describe a unit: measure, system, display name and tags",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "abbr": { "type": "string", "description": "Unit abbreviation" }
                    },
                    "required": ["abbr"]
                }
            },
            {
                "name": "list_units",
                "description": "List units, optionally filtered by measure and unit system. IMPERIAL falls back to METRIC for measures without imperial units.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "measure": { "type": "string", "description": "Measure name (e.g. \"length\")" },
                        "system": { "type": "string", "description": "Unit system (e.g. \"METRIC\", \"IMPERIAL\")" }
                    }
                }
            },
            {
                "name": "search_units",
                "description": "Find units whose abbreviation, name or tags contain a text",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Text to look for (case-insensitive)" }
                    },
                    "required": ["query"]
                }
            },
            {
                "name": "list_measures",
                "description": "List measures and the unit systems each one defines",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "reload_registry",
                "description": "Reload the unit registry from METRON_REGISTRY_PATH. The current registry stays active if loading fails.",
                "inputSchema": { "type": "object", "properties": {} }
            }
        ]
    }))
}

fn handle_tool_call(server: &Server, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert" => tool_convert(server, args),
        "describe_unit" => tool_describe_unit(server, args),
        "list_units" => tool_list_units(server, args),
        "search_units" => tool_search_units(server, args),
        "list_measures" => tool_list_measures(server),
        "reload_registry" => tool_reload_registry(server),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn text_arg<'a>(args: &'a JsonValue, tool: &str, arg: &str) -> Result<&'a str, McpError> {
    args.get(arg)
        .and_then(|v| v.as_str())
        .ok_or_else(|| report_to_mcp(ErrorReport::invalid_argument(tool, arg, "Text")))
}

fn report_to_mcp(report: ErrorReport) -> McpError {
    McpError {
        code: -32602,
        message: report.message.clone(),
        data: serde_json::to_value(&report).ok(),
    }
}

fn tool_error(report: &ErrorReport) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": report.to_string() }],
        "error": report,
        "isError": true
    })
}

fn tool_convert(server: &Server, args: JsonValue) -> Result<JsonValue, McpError> {
    let value = args.get("value")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| report_to_mcp(ErrorReport::invalid_argument("convert", "value", "Number")))?;
    let from = text_arg(&args, "convert", "from")?;
    let to = text_arg(&args, "convert", "to")?;

    let cache = server.cache.snapshot();
    match cache.convert(value, from, to) {
        Ok(result) => Ok(json!({
            "content": [{ "type": "text", "text": format!("{} {} = {} {}", value, from, result, to) }],
            "value": result,
            "isError": false
        })),
        Err(e) => {
            debug!("conversion rejected: {}", e);
            Ok(tool_error(&ErrorReport::from(&e)))
        }
    }
}

fn tool_describe_unit(server: &Server, args: JsonValue) -> Result<JsonValue, McpError> {
    let abbr = text_arg(&args, "describe_unit", "abbr")?;

    match server.cache.snapshot().describe(abbr) {
        Some(unit) => Ok(json!({
            "content": [{ "type": "text", "text": format!("{}: {} ({}, {})", unit.abbr, unit.name, unit.measure, unit.system) }],
            "unit": unit,
            "isError": false
        })),
        None => Ok(json!({
            "content": [{ "type": "text", "text": format!("Unknown unit: {}", abbr) }],
            "unit": null,
            "isError": false
        })),
    }
}

fn tool_list_units(server: &Server, args: JsonValue) -> Result<JsonValue, McpError> {
    let measure = args.get("measure").and_then(|v| v.as_str());
    let system = args.get("system").and_then(|v| v.as_str());

    let cache = server.cache.snapshot();
    let units = cache.list(measure, system);

    let mut result = json!({
        "content": [{ "type": "text", "text": units.iter().map(|u| u.abbr.as_str()).collect::<Vec<_>>().join(", ") }],
        "units": units,
        "isError": false
    });
    if let Some(m) = measure.filter(|m| cache.systems(m).is_none()) {
        result["warning"] = json!(ErrorReport::unknown_measure(m).with_note("list_units returned no units"));
    }
    Ok(result)
}

fn tool_search_units(server: &Server, args: JsonValue) -> Result<JsonValue, McpError> {
    let query = text_arg(&args, "search_units", "query")?;
    let units = server.cache.snapshot().search(query);

    Ok(json!({
        "content": [{ "type": "text", "text": format!("{} unit(s) match '{}'", units.len(), query) }],
        "units": units,
        "isError": false
    }))
}

fn tool_list_measures(server: &Server) -> Result<JsonValue, McpError> {
    let cache = server.cache.snapshot();
    let measures: Vec<JsonValue> = cache.measures()
        .into_iter()
        .map(|m| json!({ "name": m, "systems": cache.systems(m).unwrap_or_default() }))
        .collect();

    Ok(json!({
        "content": [{ "type": "text", "text": cache.measures().join(", ") }],
        "measures": measures,
        "isError": false
    }))
}

fn tool_reload_registry(server: &Server) -> Result<JsonValue, McpError> {
    match server.config.build_cache() {
        Ok(cache) => {
            let units = cache.len();
            server.cache.replace(cache);
            Ok(json!({
                "content": [{ "type": "text", "text": format!("Registry reloaded: {} units", units) }],
                "units": units,
                "isError": false
            }))
        }
        Err(e) => {
            warn!("registry reload failed: {}", e);
            Ok(tool_error(&ErrorReport::from(&e)))
        }
    }
}
