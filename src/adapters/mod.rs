// Adapters layer: concrete implementations of the external collaborators (search API, language model).

pub mod openai;
pub mod prompt;
pub mod tavily;

pub use openai::OpenAiVerdictRequester;
pub use tavily::TavilySearchClient;
