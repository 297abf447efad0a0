// file: src/agent/prompt.rs
// description: prompt construction for routing and answer phases

/// Ask the model whether the query needs a live web search. The model is
/// instructed to answer only "yes" or "no"; `router::needs_search` parses
/// whatever actually comes back.
pub fn routing_prompt(query: &str) -> String {
    format!(
        "Do this query require real-time information that you do not have access to? \
         If not, does the following query require a real-time web search to answer? \
         Answer only with 'yes' or 'no'.\n\nQuery: {}",
        query
    )
}

/// Wrap a search result as delimited context ahead of the user's query.
pub fn context_prompt(context: &str, query: &str) -> String {
    format!(
        "Based on the following context from a web search, please provide a concise \
         answer to the user's query.\n\n\
         Context from search:\n\
         ---\n\
         {}\n\
         ---\n\n\
         User Query: {}",
        context, query
    )
}
