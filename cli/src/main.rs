
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("nothing to update; pass at least one of --name, --content, --actions, --query")]
    EmptyUpdate,
    #[error("nothing to change; pass --search and/or --sort")]
    EmptyView,
    #[error("nothing to configure; pass --environment, --variant, or --microphone")]
    EmptySettings,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "kb", about = "Knowledge base and agent playground CLI")]
struct Cli {
    #[arg(long, env = "KB_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
}

impl CliContext {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Topic(TopicCommand),
    Query(QueryCommand),
    Chat(ChatCommand),
    Call(CallCommand),
}

// =============================================================================
// TOPIC
// =============================================================================

#[derive(Args, Debug)]
struct TopicCommand {
    #[command(subcommand)]
    command: TopicSubcommand,
}

#[derive(Subcommand, Debug)]
enum TopicSubcommand {
    List,
    Get {
        topic_id: Uuid,
    },
    Create,
    Update(TopicUpdateArgs),
    Delete {
        topic_id: Uuid,
    },
    Duplicate {
        topic_id: Uuid,
    },
    Toggle {
        topic_id: Uuid,
    },
    CollapseAll,
    View {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, help = "name-asc, name-desc, newest, or oldest")]
        sort: Option<String>,
    },
}

#[derive(Args, Debug)]
struct TopicUpdateArgs {
    topic_id: Uuid,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    actions: Option<String>,
    #[arg(long = "query", help = "Replace example queries; repeat for each row")]
    queries: Vec<String>,
}

// =============================================================================
// QUERY ROWS
// =============================================================================

#[derive(Args, Debug)]
struct QueryCommand {
    #[command(subcommand)]
    command: QuerySubcommand,
}

#[derive(Subcommand, Debug)]
enum QuerySubcommand {
    Set {
        topic_id: Uuid,
        index: usize,
        value: String,
    },
    Remove {
        topic_id: Uuid,
        index: usize,
    },
}

// =============================================================================
// PLAYGROUND
// =============================================================================

#[derive(Args, Debug)]
struct ChatCommand {
    #[command(subcommand)]
    command: ChatSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChatSubcommand {
    Open(SessionArgs),
    Configure {
        session_id: Uuid,
        #[command(flatten)]
        session: SessionArgs,
    },
    Send {
        session_id: Uuid,
        content: String,
    },
    Show {
        session_id: Uuid,
    },
    Reset {
        session_id: Uuid,
    },
    Close {
        session_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct CallCommand {
    #[command(subcommand)]
    command: CallSubcommand,
}

#[derive(Subcommand, Debug)]
enum CallSubcommand {
    Open {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long, help = "default, builtin, or external")]
        microphone: Option<String>,
    },
    Configure {
        session_id: Uuid,
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long, help = "default, builtin, or external")]
        microphone: Option<String>,
    },
    Start {
        session_id: Uuid,
    },
    End {
        session_id: Uuid,
    },
    Show {
        session_id: Uuid,
    },
    Close {
        session_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct SessionArgs {
    #[arg(long, help = "draft, sandbox, pre-release, or live")]
    environment: Option<String>,
    #[arg(long, help = "default, variant-a, or variant-b")]
    variant: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Topic(topic) => run_topic(&ctx, topic).await,
        Command::Query(query) => run_query(&ctx, query).await,
        Command::Chat(chat) => run_chat(&ctx, chat).await,
        Command::Call(call) => run_call(&ctx, call).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.get(cli.url("/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_topic(cli: &CliContext, topic: TopicCommand) -> Result<(), CliError> {
    let (method, path, body) = match topic.command {
        TopicSubcommand::List => (reqwest::Method::GET, "/api/topics".to_owned(), None),
        TopicSubcommand::Get { topic_id } => (reqwest::Method::GET, format!("/api/topics/{topic_id}"), None),
        TopicSubcommand::Create => (reqwest::Method::POST, "/api/topics".to_owned(), None),
        TopicSubcommand::Update(args) => {
            let path = format!("/api/topics/{}", args.topic_id);
            (reqwest::Method::PATCH, path, Some(update_body(args)?))
        }
        TopicSubcommand::Delete { topic_id } => (reqwest::Method::DELETE, format!("/api/topics/{topic_id}"), None),
        TopicSubcommand::Duplicate { topic_id } => {
            (reqwest::Method::POST, format!("/api/topics/{topic_id}/duplicate"), None)
        }
        TopicSubcommand::Toggle { topic_id } => (reqwest::Method::POST, format!("/api/topics/{topic_id}/toggle"), None),
        TopicSubcommand::CollapseAll => (reqwest::Method::POST, "/api/topics/collapse-all".to_owned(), None),
        TopicSubcommand::View { search, sort } => {
            (reqwest::Method::PATCH, "/api/topics/view".to_owned(), Some(view_body(search, sort)?))
        }
    };

    let json = api_request(cli, method, &path, body).await?;
    print_json(&json)
}

async fn run_query(cli: &CliContext, query: QueryCommand) -> Result<(), CliError> {
    let json = match query.command {
        QuerySubcommand::Set { topic_id, index, value } => {
            let path = format!("/api/topics/{topic_id}/queries/{index}");
            api_request(cli, reqwest::Method::PUT, &path, Some(json!({ "value": value }))).await?
        }
        QuerySubcommand::Remove { topic_id, index } => {
            let path = format!("/api/topics/{topic_id}/queries/{index}");
            api_request(cli, reqwest::Method::DELETE, &path, None).await?
        }
    };
    print_json(&json)
}

async fn run_chat(cli: &CliContext, chat: ChatCommand) -> Result<(), CliError> {
    let (method, path, body) = match chat.command {
        ChatSubcommand::Open(args) => (reqwest::Method::POST, "/api/chat".to_owned(), Some(session_body(args, None))),
        ChatSubcommand::Configure { session_id, session } => (
            reqwest::Method::PATCH,
            format!("/api/chat/{session_id}"),
            Some(settings_body(session, None)?),
        ),
        ChatSubcommand::Send { session_id, content } => (
            reqwest::Method::POST,
            format!("/api/chat/{session_id}/messages"),
            Some(json!({ "content": content })),
        ),
        ChatSubcommand::Show { session_id } => (reqwest::Method::GET, format!("/api/chat/{session_id}"), None),
        ChatSubcommand::Reset { session_id } => (reqwest::Method::POST, format!("/api/chat/{session_id}/reset"), None),
        ChatSubcommand::Close { session_id } => (reqwest::Method::DELETE, format!("/api/chat/{session_id}"), None),
    };

    let json = api_request(cli, method, &path, body).await?;
    print_json(&json)
}

async fn run_call(cli: &CliContext, call: CallCommand) -> Result<(), CliError> {
    let (method, path, body) = match call.command {
        CallSubcommand::Open { session, microphone } => (
            reqwest::Method::POST,
            "/api/call".to_owned(),
            Some(session_body(session, microphone)),
        ),
        CallSubcommand::Configure { session_id, session, microphone } => (
            reqwest::Method::PATCH,
            format!("/api/call/{session_id}"),
            Some(settings_body(session, microphone)?),
        ),
        CallSubcommand::Start { session_id } => (reqwest::Method::POST, format!("/api/call/{session_id}/start"), None),
        CallSubcommand::End { session_id } => (reqwest::Method::POST, format!("/api/call/{session_id}/end"), None),
        CallSubcommand::Show { session_id } => (reqwest::Method::GET, format!("/api/call/{session_id}"), None),
        CallSubcommand::Close { session_id } => (reqwest::Method::DELETE, format!("/api/call/{session_id}"), None),
    };

    let json = api_request(cli, method, &path, body).await?;
    print_json(&json)
}

/// Build a topic patch body from the flags that were passed.
fn update_body(args: TopicUpdateArgs) -> Result<Value, CliError> {
    let mut body = Map::new();
    if let Some(name) = args.name {
        body.insert("name".to_owned(), Value::String(name));
    }
    if let Some(content) = args.content {
        body.insert("content".to_owned(), Value::String(content));
    }
    if let Some(actions) = args.actions {
        body.insert("actions".to_owned(), Value::String(actions));
    }
    if !args.queries.is_empty() {
        let rows = args
            .queries
            .into_iter()
            .map(|value| json!({ "id": Uuid::new_v4(), "value": value }))
            .collect();
        body.insert("example_queries".to_owned(), Value::Array(rows));
    }

    if body.is_empty() {
        return Err(CliError::EmptyUpdate);
    }
    Ok(Value::Object(body))
}

fn view_body(search: Option<String>, sort: Option<String>) -> Result<Value, CliError> {
    if search.is_none() && sort.is_none() {
        return Err(CliError::EmptyView);
    }
    let mut body = Map::new();
    if let Some(search) = search {
        body.insert("search".to_owned(), Value::String(search));
    }
    if let Some(sort) = sort {
        body.insert("sort".to_owned(), Value::String(sort));
    }
    Ok(Value::Object(body))
}

fn session_body(args: SessionArgs, microphone: Option<String>) -> Value {
    let mut body = Map::new();
    if let Some(environment) = args.environment {
        body.insert("environment".to_owned(), Value::String(environment));
    }
    if let Some(variant) = args.variant {
        body.insert("variant".to_owned(), Value::String(variant));
    }
    if let Some(microphone) = microphone {
        body.insert("microphone".to_owned(), Value::String(microphone));
    }
    Value::Object(body)
}

/// Like [`session_body`], but an update with no fields is refused.
fn settings_body(args: SessionArgs, microphone: Option<String>) -> Result<Value, CliError> {
    let body = session_body(args, microphone);
    if body.as_object().is_some_and(Map::is_empty) {
        return Err(CliError::EmptySettings);
    }
    Ok(body)
}

async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let client = reqwest::Client::new();
    let request = client.request(method, cli.url(path));
    // Open endpoints read a JSON body even when every field is defaulted.
    let request = if let Some(json) = body {
        request.json(&json)
    } else {
        request
    };

    let response = request.send().await?;
    let status = response.status();
    let value = response
        .json::<Value>()
        .await
        .unwrap_or_else(|_| Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            message: value.to_string(),
        });
    }

    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    if value.is_null() {
        println!("ok");
        return Ok(());
    }
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
