//! Resource services.
//!
//! Each service is a thin handle borrowed from a [`Client`](crate::Client),
//! e.g. `client.chat().create(&request)`.

mod agents;
mod batch;
mod chat;
mod classifiers;
mod embeddings;
mod files;
mod fim;
mod fine_tuning;
mod models;
mod moderations;
mod ocr;

pub use agents::AgentsService;
pub use batch::BatchService;
pub use chat::{ChatBuilder, ChatService};
pub use classifiers::ClassifiersService;
pub use embeddings::{cosine_similarity, EmbeddingsService, DEFAULT_EMBEDDING_BATCH_SIZE};
pub use files::FilesService;
pub use fim::FimService;
pub use fine_tuning::FineTuningService;
pub use models::ModelsService;
pub use moderations::ModerationsService;
pub use ocr::OcrService;
