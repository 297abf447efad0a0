// file: src/agent/orchestrator.rs
// description: coordinates routing, optional search, and final answer
// reference: orchestrates the two-phase query pipeline

use crate::agent::prompt;
use crate::agent::router;
use crate::error::Result;
use crate::llm::LlmClient;
use crate::search::{SearchClient, SEARCH_FAILED};
use async_trait::async_trait;
use tracing::{info, warn};

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<String>;
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        LlmClient::complete(self, prompt).await
    }
}

#[async_trait]
impl SearchProvider for SearchClient {
    async fn search(&self, query: &str) -> Result<String> {
        SearchClient::search(self, query).await
    }
}

/// Everything observable about one pipeline run. The driver prints the
/// intermediate routing decision alongside the final answer.
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub query: String,
    pub decision: String,
    pub searched: bool,
    pub context: Option<String>,
    pub answer: String,
}

pub struct Agent<C, S> {
    llm: C,
    search: S,
}

impl<C: CompletionProvider, S: SearchProvider> Agent<C, S> {
    pub fn new(llm: C, search: S) -> Self {
        Self { llm, search }
    }

    /// Run the two-phase pipeline: routing decision, optional web search,
    /// final answer. Holds no state between runs.
    ///
    /// A failed search degrades to placeholder context and the pipeline
    /// continues; a failed completion propagates, so an outage is never
    /// mistaken for a routing decision or an answer.
    pub async fn run(&self, query: &str) -> Result<AgentOutcome> {
        let decision = self.llm.complete(&prompt::routing_prompt(query)).await?;
        let decision = decision.trim().to_lowercase();
        info!("Routing decision for query: {}", decision);

        if router::needs_search(&decision) {
            let context = match self.search.search(query).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Search failed, continuing without results: {}", e);
                    SEARCH_FAILED.to_string()
                }
            };

            let answer = self
                .llm
                .complete(&prompt::context_prompt(&context, query))
                .await?;

            Ok(AgentOutcome {
                query: query.to_string(),
                decision,
                searched: true,
                context: Some(context),
                answer,
            })
        } else {
            let answer = self.llm.complete(query).await?;

            Ok(AgentOutcome {
                query: query.to_string(),
                decision,
                searched: false,
                context: None,
                answer,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentError;
    use crate::search::NO_ANSWER;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Completion fake: scripted replies in call order, captured prompts.
    struct ScriptedLlm {
        replies: Mutex<Vec<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedLlm {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies.lock().unwrap().remove(0)
        }
    }

    /// Search fake: fixed answer, or a network error when `answer` is None.
    struct FakeSearch {
        answer: Option<String>,
        queries: Mutex<Vec<String>>,
    }

    impl FakeSearch {
        fn ok(answer: &str) -> Self {
            Self {
                answer: Some(answer.to_string()),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                answer: None,
                queries: Mutex::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchProvider for FakeSearch {
        async fn search(&self, query: &str) -> Result<String> {
            self.queries.lock().unwrap().push(query.to_string());
            match &self.answer {
                Some(s) => Ok(s.clone()),
                None => Err(AgentError::Network {
                    service: "search provider".to_string(),
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_negative_route_answers_with_raw_query() {
        let llm = ScriptedLlm::new(vec![
            Ok("no".to_string()),
            Ok("Paris is the capital of France.".to_string()),
        ]);
        let search = FakeSearch::ok("unused");
        let agent = Agent::new(llm, search);

        let outcome = agent.run("What is the capital of France?").await.unwrap();

        assert!(!outcome.searched);
        assert_eq!(outcome.context, None);
        assert_eq!(outcome.answer, "Paris is the capital of France.");
        // No search issued, and the final completion saw the raw query.
        assert!(agent.search.queries().is_empty());
        assert_eq!(agent.llm.prompts()[1], "What is the capital of France?");
    }

    #[tokio::test]
    async fn test_affirmative_route_searches_once_and_embeds_context() {
        let llm = ScriptedLlm::new(vec![
            Ok("Yes.".to_string()),
            Ok("Llama 3 adds a larger context window.".to_string()),
        ]);
        let search = FakeSearch::ok("Llama 3 was released in 2024.");
        let agent = Agent::new(llm, search);

        let query = "What are the key features of the new Llama 3 model?";
        let outcome = agent.run(query).await.unwrap();

        assert!(outcome.searched);
        assert_eq!(agent.search.queries(), vec![query.to_string()]);

        let final_prompt = &agent.llm.prompts()[1];
        assert!(final_prompt.contains("---\nLlama 3 was released in 2024.\n---"));
        assert!(final_prompt.contains(query));
        assert_eq!(outcome.answer, "Llama 3 adds a larger context window.");
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_placeholder_context() {
        let llm = ScriptedLlm::new(vec![
            Ok("yes".to_string()),
            Ok("Best effort answer.".to_string()),
        ]);
        let search = FakeSearch::failing();
        let agent = Agent::new(llm, search);

        let outcome = agent.run("What happened today?").await.unwrap();

        assert!(outcome.searched);
        assert_eq!(outcome.context.as_deref(), Some(SEARCH_FAILED));
        assert!(agent.llm.prompts()[1].contains("Failed to search"));
    }

    #[tokio::test]
    async fn test_no_answer_sentinel_flows_into_context() {
        let llm = ScriptedLlm::new(vec![
            Ok("yes".to_string()),
            Ok("Nothing current found.".to_string()),
        ]);
        let search = FakeSearch::ok(NO_ANSWER);
        let agent = Agent::new(llm, search);

        let outcome = agent.run("latest obscure news?").await.unwrap();

        assert!(agent.llm.prompts()[1].contains("No answer found."));
        assert_eq!(outcome.answer, "Nothing current found.");
    }

    #[tokio::test]
    async fn test_routing_failure_propagates_without_searching() {
        let llm = ScriptedLlm::new(vec![Err(AgentError::EmptyCompletion)]);
        let search = FakeSearch::ok("unused");
        let agent = Agent::new(llm, search);

        let result = agent.run("anything").await;

        assert!(matches!(result, Err(AgentError::EmptyCompletion)));
        assert!(agent.search.queries().is_empty());
    }

    #[tokio::test]
    async fn test_verbose_decision_still_routes_to_search() {
        let llm = ScriptedLlm::new(vec![
            Ok("maybe yes maybe no".to_string()),
            Ok("answer".to_string()),
        ]);
        let search = FakeSearch::ok("context");
        let agent = Agent::new(llm, search);

        let outcome = agent.run("q").await.unwrap();
        assert!(outcome.searched);
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let query = "What is the capital of France?";
        let mut answers = Vec::new();

        for _ in 0..2 {
            let llm = ScriptedLlm::new(vec![
                Ok("no".to_string()),
                Ok("Paris.".to_string()),
            ]);
            let agent = Agent::new(llm, FakeSearch::ok("unused"));
            let outcome = agent.run(query).await.unwrap();
            answers.push((outcome.decision, outcome.answer));
        }

        assert_eq!(answers[0], answers[1]);
    }
}
