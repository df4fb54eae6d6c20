//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{HttpSearchBackend, SearchDispatcher, SearchEvent, Settings};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::startup(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ))));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let backend = match HttpSearchBackend::new(&settings) {
                Ok(backend) => backend,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_search_error(
                        UiErrorContext::BackendStartup,
                        &err,
                    )));
                    tracing::error!("failed to build search backend: {err}");
                    return;
                }
            };
            tracing::info!(api_base_url = %settings.api_base_url, "backend worker ready");

            let mut dispatcher = SearchDispatcher::new(Arc::new(backend));
            let mut events = dispatcher.subscribe();
            let forward_tx = ui_tx.clone();
            let forward_task = tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(SearchEvent::Completed {
                            generation,
                            outcome,
                        }) => {
                            if forward_tx
                                .send(UiEvent::SearchCompleted {
                                    generation,
                                    outcome,
                                })
                                .is_err()
                            {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "search event stream lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Search(request) => dispatcher.dispatch(request),
                    BackendCommand::Cancel => dispatcher.cancel(),
                }
            }

            tracing::debug!("ui command queue closed; stopping backend worker");
            drop(dispatcher);
            forward_task.abort();
        });
    });
}
