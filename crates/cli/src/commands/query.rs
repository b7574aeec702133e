use std::io::Write as _;

use anyhow::Result;
use dbchat_client::{ApiGateway, ApiOutcome};
use dbchat_state::ChatSession;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

pub(crate) async fn run_ask(gateway: &ApiGateway, question: &str) -> Result<()> {
    match gateway.send_query(question).await {
        ApiOutcome::Success { data } => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            if data.success {
                Ok(())
            } else {
                Err(anyhow::anyhow!(data.error.unwrap_or_else(|| "Query failed".to_owned())))
            }
        },
        ApiOutcome::Failure { error } => Err(anyhow::anyhow!(error)),
    }
}

const CHAT_HELP: &str = "\
Type a question, or one of:
  :schema          list tables and relationships
  :tables          table names in the cached schema
  :table <name>    show one table from the cached schema
  :refresh         re-introspect the database
  :history         recent questions
  :clear           forget the conversation
  :quit            leave";

/// Line-oriented chat loop on stdin/stdout. Ends on `:quit` or EOF.
pub(crate) async fn run_chat(gateway: ApiGateway) -> Result<()> {
    let mut session = ChatSession::new(gateway);
    if let ApiOutcome::Failure { error } = session.load_schema().await {
        eprintln!("warning: could not load schema: {error}");
    } else {
        println!("Connected to {} ({} tables).", session.api().base_url(), session.schema().table_count());
    }
    println!("{CHAT_HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
            (":quit" | ":q" | ":exit", _) => break,
            (":help", _) => println!("{CHAT_HELP}"),
            (":schema", _) => print_schema(&session),
            (":tables", _) => print_table_names(&session),
            (":table", name) => {
                session.schema_mut().select_table(Some(name));
                match session.schema().selected_table_info() {
                    Some(table) => print!("{}", render::render_table(table)),
                    None => println!("no table named {name:?} in the cached schema"),
                }
            },
            (":refresh", _) => match session.refresh_schema().await {
                ApiOutcome::Success { .. } => {
                    println!("schema refreshed: {} tables", session.schema().table_count());
                },
                ApiOutcome::Failure { error } => eprintln!("error: {error}"),
            },
            (":history", _) => {
                print!("{}", render::render_history(session.conversation().recent_history()));
            },
            (":clear", _) => match session.clear_history().await {
                ApiOutcome::Success { .. } => println!("conversation cleared"),
                ApiOutcome::Failure { error } => eprintln!("error: {error}"),
            },
            (cmd, _) if cmd.starts_with(':') => println!("unknown command {cmd}, try :help"),
            _ => {
                let reply = session.ask(line).await;
                println!("{}", render::render_message(reply));
            },
        }
    }
    Ok(())
}

fn print_table_names<A: dbchat_client::ChatApi>(session: &ChatSession<A>) {
    let cache = session.schema();
    if !cache.is_schema_loaded() {
        println!("no schema loaded");
        return;
    }
    for name in cache.table_names() {
        println!("  {name}");
    }
}

fn print_schema<A: dbchat_client::ChatApi>(session: &ChatSession<A>) {
    let cache = session.schema();
    let Some(schema) = cache.schema() else {
        println!("no schema loaded");
        return;
    };
    if !schema.summary.is_empty() {
        println!("{}", schema.summary.trim());
    }
    for table in &schema.tables {
        println!("  {} ({} rows, {} columns)", table.name, table.row_count, table.columns.len());
    }
    for rel in &schema.relationships {
        println!("  {}.{} -> {}.{}", rel.from_table, rel.from_column, rel.to_table, rel.to_column);
    }
}
