//! Interactive console host for the lay-advisor dialogue engine.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use lay_advisor::adapters::InMemoryTemplateStore;
use lay_advisor::application::{SessionOrchestrator, StreamHandle};
use lay_advisor::config::AppConfig;
use lay_advisor::ports::TemplateStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.engine.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    let pack = config.content_pack()?;
    let store = Arc::new(InMemoryTemplateStore::from_pack(&pack)?) as Arc<dyn TemplateStore>;
    let orchestrator = SessionOrchestrator::from_pack(&pack, store, config.engine.stream_buffer);
    let typing_delay = Duration::from_millis(config.engine.typing_delay_ms);

    let (session_id, opening) = orchestrator.open_session().await?;
    render(opening, typing_delay).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "exit" {
            break;
        }
        let stream = orchestrator.handle_turn(session_id, Some(&line)).await?;
        render(stream, typing_delay).await?;
    }

    orchestrator.end_session(&session_id).await;
    Ok(())
}

/// Renders a fragment stream as a typing effect, printing only the suffix
/// each fragment adds.
async fn render(mut stream: StreamHandle, delay: Duration) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut printed = 0;
    while let Some(fragment) = stream.next_fragment().await {
        if fragment.len() > printed {
            stdout.write_all(fragment[printed..].as_bytes()).await?;
            stdout.flush().await?;
            printed = fragment.len();
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    stdout.write_all(b"\n\n").await?;
    stdout.flush().await?;
    Ok(())
}
