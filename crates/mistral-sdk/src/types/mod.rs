//! Request and response types for the Mistral API.
//!
//! Response structs are lenient: fields the server may omit default instead
//! of failing deserialization.

mod agents;
mod batch;
mod chat;
mod classifiers;
mod common;
mod embeddings;
mod files;
mod fim;
mod fine_tuning;
mod models;
mod moderations;
mod ocr;

pub use agents::{AgentAction, AgentFunction, AgentRequest, AgentResponse, AgentTool};
pub use batch::{BatchJob, BatchOptions, BatchRequest, BatchResult, BatchSummary, RetryOptions};
pub use chat::{
    ChatChoice, ChatCompletionChunk, ChatCompletionRequest, ChatCompletionRequestBuilder,
    ChatCompletionResponse, ChunkChoice, Delta, ResponseFormat,
};
pub use classifiers::{ClassifierRequest, ClassifierResponse, ClassifierResult};
pub use common::{
    ContentDelta, Function, FunctionCall, Message, Role, Tool, ToolCall, Usage,
};
pub use embeddings::{
    EmbeddingData, EmbeddingMetadata, EmbeddingRequest, EmbeddingResponse,
    EnhancedEmbeddingRequest, EnhancedEmbeddingResponse,
};
pub use files::{File, FileList, FilePurpose};
pub use fim::{FimChoice, FimRequest, FimResponse};
pub use fine_tuning::{CreateFineTuningJobRequest, FineTuningJob, FineTuningJobList};
pub use models::{EnhancedModel, Model, ModelCapability, ModelList, ModelPerformance, TokenCosts};
pub use moderations::{
    ChatModerationRequest, ModerationRequest, ModerationResponse, ModerationResult,
};
pub use ocr::{BoundingBox, OcrBlock, OcrJob, OcrRequest, OcrResponse, OcrResult};
