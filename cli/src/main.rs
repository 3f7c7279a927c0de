//! Terminal client for the causal network analysis backend.
//!
//! Talks to the same REST endpoints and Socket.IO chat channel as the browser
//! UI. Results go to stdout; progress and diagnostics go to stderr.

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use futures_util::{SinkExt, StreamExt};
use network::api::{
    CHAT_HISTORY_PATH, EffectEstimate, INDEPENDENCE_LOG_PATH, INDEPENDENCE_PATH, IndependenceTests, MarkovBlanket,
    NETWORK_PATH, NODE_VALUES_PATH, TRACK_ACTIONS_PATH, TrackActions, endpoint, estimate_effect_path,
    markov_blanket_path,
};
use network::socket::{ChannelEvent, UserMessage, connect_packet, pong_packet, read_channel_event, socket_endpoint};
use network::tools::{IndependenceRow, effect_rows, independence_rows};
use network::{ChangeSet, GraphElement, PendingEdit};
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid edge {0:?}; expected SOURCE->TARGET")]
    InvalidEdge(String),
    #[error("no independence test at row {0}")]
    MissingRow(usize),
    #[error("nothing to apply; pass --add or --delete")]
    EmptyChangeSet,
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("socket codec: {0}")]
    Codec(#[from] network::socket::CodecError),
    #[error("chat connection refused: {0}")]
    ConnectRefused(String),
    #[error("timed out waiting for chat reply")]
    Timeout,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "causal-cli", about = "Causal network backend CLI")]
struct Cli {
    #[arg(long, env = "CAUSAL_BACKEND_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Socket.IO server; derived from --base-url when omitted.
    #[arg(long, env = "CAUSAL_SOCKET_URL")]
    socket_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    socket_url: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read or edit the network.
    Network(NetworkCommand),
    /// Distinct values of every node.
    Values,
    /// Estimate the causal effect of a treatment on an outcome.
    Effect {
        /// `VARIABLE` or `VARIABLE~VALUE`.
        #[arg(long)]
        treatment: String,
        #[arg(long)]
        outcome: String,
    },
    /// Markov blanket of a node.
    Blanket { target: String },
    /// Conditional independencies implied by the network.
    Independence {
        /// Record the inspection of this row with the backend.
        #[arg(long)]
        log: Option<usize>,
    },
    /// Download the chat transcript.
    History {
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// Turn interaction tracking on or off.
    Track { state: TrackState },
    /// Send one message to the assistant and print the reply.
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
struct NetworkCommand {
    #[command(subcommand)]
    command: NetworkSubcommand,
}

#[derive(Subcommand, Debug)]
enum NetworkSubcommand {
    Get,
    Apply {
        /// Edge to add, as SOURCE->TARGET. Repeatable.
        #[arg(long = "add")]
        additions: Vec<String>,
        /// Edge to delete, as SOURCE->TARGET. Repeatable.
        #[arg(long = "delete")]
        deletions: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TrackState {
    On,
    Off,
}

#[derive(Args, Debug)]
struct ChatArgs {
    message: String,

    #[arg(long, default_value_t = false)]
    include_context: bool,

    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let socket_url = cli
        .socket_url
        .unwrap_or_else(|| network::socket::websocket_base(&cli.base_url).unwrap_or_else(|_| cli.base_url.clone()));
    let ctx = CliContext {
        base_url: cli.base_url,
        socket_url,
    };

    match cli.command {
        Command::Network(network) => run_network(&ctx, network).await,
        Command::Values => {
            let json = api_request(&ctx, reqwest::Method::GET, NODE_VALUES_PATH, None).await?;
            print_json(&json.json::<Value>().await?)
        }
        Command::Effect { treatment, outcome } => run_effect(&ctx, &treatment, &outcome).await,
        Command::Blanket { target } => run_blanket(&ctx, &target).await,
        Command::Independence { log } => run_independence(&ctx, log).await,
        Command::History { out } => run_history(&ctx, out).await,
        Command::Track { state } => {
            let body = serde_json::to_value(TrackActions {
                is_tracking: state == TrackState::On,
            })?;
            api_request(&ctx, reqwest::Method::PUT, TRACK_ACTIONS_PATH, Some(body)).await?;
            eprintln!("tracking {}", if state == TrackState::On { "on" } else { "off" });
            Ok(())
        }
        Command::Chat(args) => run_chat(&ctx, args).await,
    }
}

async fn run_network(ctx: &CliContext, network: NetworkCommand) -> Result<(), CliError> {
    match network.command {
        NetworkSubcommand::Get => {
            let response = api_request(ctx, reqwest::Method::GET, NETWORK_PATH, None).await?;
            print_json(&response.json::<Value>().await?)
        }
        NetworkSubcommand::Apply { additions, deletions } => {
            let changes = change_set(&additions, &deletions)?;
            if changes.changes.is_empty() {
                return Err(CliError::EmptyChangeSet);
            }
            let count = changes.changes.len();
            api_request(ctx, reqwest::Method::PUT, NETWORK_PATH, Some(serde_json::to_value(&changes)?)).await?;
            eprintln!("applied {count} change(s)");
            Ok(())
        }
    }
}

async fn run_effect(ctx: &CliContext, treatment: &str, outcome: &str) -> Result<(), CliError> {
    let path = estimate_effect_path(treatment, outcome);
    let estimate = api_request(ctx, reqwest::Method::GET, &path, None)
        .await?
        .json::<EffectEstimate>()
        .await?;
    println!("{}", format_effect(&estimate, outcome));
    Ok(())
}

async fn run_blanket(ctx: &CliContext, target: &str) -> Result<(), CliError> {
    let path = markov_blanket_path(target);
    let blanket = api_request(ctx, reqwest::Method::GET, &path, None)
        .await?
        .json::<MarkovBlanket>()
        .await?;
    for member in blanket.members(target) {
        println!("{member}");
    }
    Ok(())
}

async fn run_independence(ctx: &CliContext, log: Option<usize>) -> Result<(), CliError> {
    let tests = api_request(ctx, reqwest::Method::GET, INDEPENDENCE_PATH, None)
        .await?
        .json::<IndependenceTests>()
        .await?;
    let rows = independence_rows(&tests);
    for row in &rows {
        println!("{}", format_independence_row(row));
    }

    if let Some(index) = log {
        let row = rows.get(index).ok_or(CliError::MissingRow(index))?;
        let body = serde_json::to_value(row.log_body())?;
        api_request(ctx, reqwest::Method::PUT, INDEPENDENCE_LOG_PATH, Some(body)).await?;
        eprintln!("logged row {index}");
    }
    Ok(())
}

async fn run_history(ctx: &CliContext, out: Option<std::path::PathBuf>) -> Result<(), CliError> {
    let text = api_request(ctx, reqwest::Method::GET, CHAT_HISTORY_PATH, None)
        .await?
        .text()
        .await?;
    match out {
        Some(path) => {
            std::fs::write(&path, text)?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Outcome of reacting to one chat frame.
#[derive(Debug, PartialEq, Eq)]
enum ChatAction {
    Send(String),
    Wait,
    Done(String),
}

/// Advance the chat exchange. `outgoing` holds the user message until the
/// namespace connect is acknowledged.
fn next_chat_action(event: ChannelEvent, outgoing: &mut Option<String>) -> Result<ChatAction, CliError> {
    Ok(match event {
        ChannelEvent::Open(_) => ChatAction::Send(connect_packet()),
        ChannelEvent::Ping(data) => ChatAction::Send(pong_packet(&data)),
        ChannelEvent::Connected => outgoing.take().map_or(ChatAction::Wait, ChatAction::Send),
        ChannelEvent::Response(response) => ChatAction::Done(response.data),
        ChannelEvent::ConnectError(message) => return Err(CliError::ConnectRefused(message)),
        ChannelEvent::Disconnected => return Err(CliError::WsClosed),
        ChannelEvent::Event { .. } | ChannelEvent::Noop => ChatAction::Wait,
    })
}

async fn run_chat(ctx: &CliContext, args: ChatArgs) -> Result<(), CliError> {
    let url = socket_endpoint(&ctx.socket_url)?;
    let (mut stream, _) = connect_async(url.as_str())
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))?;

    let mut outgoing = Some(network::socket::user_message_packet(&UserMessage {
        message: args.message,
        send_user_actions: args.include_context,
    })?);

    let exchange = async {
        loop {
            let Some(message) = stream.next().await else {
                return Err(CliError::WsClosed);
            };
            let text = match message.map_err(|error| CliError::WsConnect(Box::new(error)))? {
                Message::Text(text) => text,
                Message::Close(_) => return Err(CliError::WsClosed),
                _ => continue,
            };
            match next_chat_action(read_channel_event(text.as_str())?, &mut outgoing)? {
                ChatAction::Send(packet) => {
                    stream
                        .send(Message::Text(packet.into()))
                        .await
                        .map_err(|error| CliError::WsConnect(Box::new(error)))?;
                }
                ChatAction::Wait => {}
                ChatAction::Done(reply) => return Ok::<_, CliError>(reply),
            }
        }
    };

    let reply = tokio::time::timeout(Duration::from_secs(args.timeout_secs), exchange)
        .await
        .map_err(|_| CliError::Timeout)??;
    println!("{reply}");
    let _ = stream.close(None).await;
    Ok(())
}

async fn api_request(
    ctx: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<reqwest::Response, CliError> {
    let client = reqwest::Client::new();
    let url = endpoint(&ctx.base_url, path);

    let request = client.request(method, &url);
    let request = if let Some(json) = body {
        request.json(&json)
    } else {
        request.header(reqwest::header::CONTENT_TYPE, "application/json")
    };

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CliError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

fn parse_edge(raw: &str) -> Result<GraphElement, CliError> {
    let (source, target) = raw
        .split_once("->")
        .map(|(s, t)| (s.trim(), t.trim()))
        .filter(|(s, t)| !s.is_empty() && !t.is_empty())
        .ok_or_else(|| CliError::InvalidEdge(raw.to_owned()))?;
    Ok(GraphElement::edge(source, target))
}

fn change_set(additions: &[String], deletions: &[String]) -> Result<ChangeSet, CliError> {
    let mut changes = Vec::with_capacity(additions.len() + deletions.len());
    for raw in additions {
        changes.push(PendingEdit::Addition(parse_edge(raw)?));
    }
    for raw in deletions {
        changes.push(PendingEdit::Deletion(parse_edge(raw)?));
    }
    Ok(ChangeSet { changes })
}

fn format_effect(estimate: &EffectEstimate, outcome: &str) -> String {
    let mut lines: Vec<String> = effect_rows(estimate, outcome)
        .into_iter()
        .map(|row| format!("{}\t{}", row.metric, row.value))
        .collect();
    if let Some(explanation) = &estimate.explanation {
        lines.push(format!("Explanation: {explanation}"));
    }
    lines.join("\n")
}

fn format_independence_row(row: &IndependenceRow) -> String {
    format!(
        "{}\t{}\t{}\t{:.2}",
        row.id,
        row.independence_assumption.join(" _||_ "),
        row.conditional_variables.join(", "),
        row.p_value
    )
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
