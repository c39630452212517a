use std::sync::{mpsc, Arc};
use std::thread;

use tailor_logging::{tailor_debug, tailor_info};
use thiserror::Error;

use crate::pipeline::{ChannelProgressSink, ResumePipeline};
use crate::{EngineEvent, GenerationJob};

enum EngineCommand {
    Generate { job: GenerationJob },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start the engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(pipeline: ResumePipeline) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let pipeline = Arc::new(pipeline);

        thread::Builder::new()
            .name("resume-engine".to_string())
            .spawn(move || {
                // One action at a time: the next command waits for the current run.
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Generate { job } => {
                            let sink = ChannelProgressSink::new(event_tx.clone());
                            let result = runtime.block_on(pipeline.run(&job, &sink));
                            let _ = event_tx
                                .send(EngineEvent::Finished(result.map_err(|e| e.to_failure())));
                        }
                    }
                }
                tailor_debug!("Engine command channel closed");
            })?;

        tailor_info!("Engine started");
        Ok(Self { cmd_tx, event_rx })
    }

    pub fn generate(&self, job: GenerationJob) {
        let _ = self.cmd_tx.send(EngineCommand::Generate { job });
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}
