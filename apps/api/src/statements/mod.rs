// Statement generation: prompt construction, the single provider call,
// and strict shape validation of the reply.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
