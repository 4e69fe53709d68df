//! Backend actor: runs requests off the event loop and reports completions

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::client::Backend;
use super::error::BackendError;
use super::types::{ChatRequest, EmailSummary};
use crate::constants::{BACKEND_COMMAND_CAPACITY, BACKEND_EVENT_CAPACITY};

/// Commands that can be sent to the backend actor
#[derive(Debug)]
pub enum BackendCommand {
    /// Fetch and summarize the latest emails
    FetchEmails { generation: u64, model: String },
    /// Ask a follow-up question about one email
    Chat {
        generation: u64,
        request: ChatRequest,
    },
    /// Shutdown the actor
    Shutdown,
}

/// Events emitted by the backend actor.
///
/// `generation` echoes the value of the command that caused the event so the
/// app can drop results of superseded requests.
#[derive(Debug)]
pub enum BackendEvent {
    EmailsFetched {
        generation: u64,
        result: Result<Vec<EmailSummary>, BackendError>,
    },
    ChatAnswered {
        generation: u64,
        result: Result<String, BackendError>,
    },
}

/// Handle for communicating with the backend actor
pub struct BackendHandle {
    pub cmd_tx: mpsc::Sender<BackendCommand>,
    pub event_rx: mpsc::Receiver<BackendEvent>,
}

/// Spawn the backend actor task
pub fn spawn_backend_actor<B>(backend: B) -> BackendHandle
where
    B: Backend + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(BACKEND_COMMAND_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(BACKEND_EVENT_CAPACITY);

    tokio::spawn(backend_actor_loop(Arc::new(backend), cmd_rx, event_tx));

    BackendHandle { cmd_tx, event_rx }
}

async fn backend_actor_loop<B>(
    backend: Arc<B>,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
    event_tx: mpsc::Sender<BackendEvent>,
) where
    B: Backend + 'static,
{
    // At most one request of each kind is worth finishing: a newer one
    // makes the older result unusable, so the older task is aborted.
    let mut fetch_task: Option<JoinHandle<()>> = None;
    let mut chat_task: Option<JoinHandle<()>> = None;

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::FetchEmails { generation, model } => {
                abort_superseded(&mut fetch_task, "email fetch");
                tracing::info!("Fetching email summaries (request {}, model {})", generation, model);

                let backend = Arc::clone(&backend);
                let event_tx = event_tx.clone();
                fetch_task = Some(tokio::spawn(async move {
                    let result = backend.summarize_emails(model).await;
                    if let Err(ref e) = result {
                        tracing::warn!("Email fetch {} failed: {}", generation, e);
                    }
                    if event_tx
                        .send(BackendEvent::EmailsFetched { generation, result })
                        .await
                        .is_err()
                    {
                        tracing::warn!("Backend actor: event receiver dropped");
                    }
                }));
            }

            BackendCommand::Chat {
                generation,
                request,
            } => {
                abort_superseded(&mut chat_task, "chat");
                tracing::info!(
                    "Sending chat question for email {} (request {}, {} prior turns)",
                    request.email_id,
                    generation,
                    request.history.len()
                );

                let backend = Arc::clone(&backend);
                let event_tx = event_tx.clone();
                chat_task = Some(tokio::spawn(async move {
                    let result = backend.chat(request).await;
                    if let Err(ref e) = result {
                        tracing::warn!("Chat request {} failed: {}", generation, e);
                    }
                    if event_tx
                        .send(BackendEvent::ChatAnswered { generation, result })
                        .await
                        .is_err()
                    {
                        tracing::warn!("Backend actor: event receiver dropped");
                    }
                }));
            }

            BackendCommand::Shutdown => {
                break;
            }
        }
    }

    abort_superseded(&mut fetch_task, "email fetch");
    abort_superseded(&mut chat_task, "chat");
}

fn abort_superseded(task: &mut Option<JoinHandle<()>>, kind: &str) {
    if let Some(task) = task.take()
        && !task.is_finished()
    {
        tracing::debug!("Aborting in-flight {} request", kind);
        task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::client::MockBackend;
    use crate::backend::error::Endpoint;
    use crate::backend::types::EmailId;
    use std::time::Duration;

    fn summary(id: i64, subject: &str) -> EmailSummary {
        EmailSummary {
            id: EmailId::from(id),
            subject: Some(subject.to_string()),
            from: None,
            summary: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_reports_emails_with_generation() {
        let mut mock = MockBackend::new();
        mock.expect_summarize_emails()
            .with(mockall::predicate::eq("llama3.1-8b".to_string()))
            .returning(|_| Box::pin(async { Ok(vec![summary(1, "Hi")]) }));

        let mut handle = spawn_backend_actor(mock);
        handle
            .cmd_tx
            .send(BackendCommand::FetchEmails {
                generation: 4,
                model: "llama3.1-8b".to_string(),
            })
            .await
            .unwrap();

        match handle.event_rx.recv().await.unwrap() {
            BackendEvent::EmailsFetched { generation, result } => {
                assert_eq!(generation, 4);
                assert_eq!(result.unwrap(), vec![summary(1, "Hi")]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chat_failure_is_forwarded() {
        let mut mock = MockBackend::new();
        mock.expect_chat().returning(|_| {
            Box::pin(async {
                Err(BackendError::Http {
                    endpoint: Endpoint::Chat,
                    status: 500,
                    message: None,
                })
            })
        });

        let mut handle = spawn_backend_actor(mock);
        handle
            .cmd_tx
            .send(BackendCommand::Chat {
                generation: 1,
                request: ChatRequest {
                    email_id: EmailId::from(1),
                    question: "What's this about?".to_string(),
                    history: Vec::new(),
                    model: "llama3.1-8b".to_string(),
                },
            })
            .await
            .unwrap();

        match handle.event_rx.recv().await.unwrap() {
            BackendEvent::ChatAnswered { generation, result } => {
                assert_eq!(generation, 1);
                assert!(matches!(
                    result,
                    Err(BackendError::Http { status: 500, .. })
                ));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_newer_fetch_aborts_older_one() {
        let mut mock = MockBackend::new();
        mock.expect_summarize_emails()
            .with(mockall::predicate::eq("slow".to_string()))
            .returning(|_| {
                Box::pin(std::future::pending::<Result<Vec<EmailSummary>, BackendError>>())
            });
        mock.expect_summarize_emails()
            .with(mockall::predicate::eq("fast".to_string()))
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));

        let mut handle = spawn_backend_actor(mock);
        for (generation, model) in [(1, "slow"), (2, "fast")] {
            handle
                .cmd_tx
                .send(BackendCommand::FetchEmails {
                    generation,
                    model: model.to_string(),
                })
                .await
                .unwrap();
        }

        match handle.event_rx.recv().await.unwrap() {
            BackendEvent::EmailsFetched { generation, .. } => assert_eq!(generation, 2),
            other => panic!("unexpected event: {other:?}"),
        }

        // The aborted request never reports back
        let extra = tokio::time::timeout(Duration::from_millis(50), handle.event_rx.recv()).await;
        assert!(extra.is_err());
    }
}
