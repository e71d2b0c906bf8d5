pub mod accounts;
pub mod drawings;
pub mod generator;

pub use accounts::{AccountService, RegistrationPolicy};
pub use drawings::{DrawingError, DrawingPayload, DrawingService, DrawingView};
pub use generator::{generate_batch, Complexity, GenerationRequest, GeneratorError};
