//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the game over MCP on stdio so an assistant can play it. The
//! server holds at most one game; `new_game` replaces it.
//!
//! Each `#[tool]` method delegates to `hotcold-core`. Player mistakes
//! (invalid guesses, words outside the list, giving up too early) come back
//! as tool error results so the caller can read the message and carry on.
//! Only provider and serialization failures become protocol errors.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;
use tokio::sync::Mutex;

use hotcold_core::{GameError, GameOptions, GameSession, ModelCache, Vocabulary, feedback};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `new_game` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct NewGameParams {
    /// Secret word to use instead of a random one (for testing).
    pub target: Option<String>,
}

/// Parameters for the `guess` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GuessParams {
    /// The word to guess.
    pub word: String,
}

/// Parameters for the `classify_rank` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ClassifyRankParams {
    /// Rank of a guess (1 is closest).
    pub rank: usize,
    /// Number of ranked words.
    pub total: usize,
}

/// MCP server that hosts one Hot or Cold game at a time.
#[derive(Clone)]
pub struct GameServer {
    vocabulary: Arc<Vocabulary>,
    model: Arc<ModelCache>,
    options: GameOptions,
    game: Arc<Mutex<Option<GameSession>>>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

#[tool_router]
impl GameServer {
    /// Create a server with no game in progress.
    pub fn new(vocabulary: Arc<Vocabulary>, model: Arc<ModelCache>, options: GameOptions) -> Self {
        Self {
            vocabulary,
            model,
            options,
            game: Arc::new(Mutex::new(None)),
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "vocabulary_size": self.vocabulary.len(),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Start a new game, replacing any current one.
    #[tool(
        description = "Start a new game. Picks a secret word, ranks every word in the list by similarity to it, and returns the word length and the number of ranked words."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    async fn new_game(
        &self,
        Parameters(params): Parameters<NewGameParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "new_game", pinned = params.target.is_some(), "executing MCP tool");

        let vocabulary = Arc::clone(&self.vocabulary);
        let model = Arc::clone(&self.model);
        let session = match params.target {
            Some(ref target) => {
                match GameSession::with_target(target, vocabulary, model, self.options) {
                    Ok(session) => session,
                    Err(err) => return game_error(err),
                }
            }
            None => GameSession::new(vocabulary, model, self.options),
        };

        if let Err(err) = session.rankings().await {
            return game_error(err);
        }

        let summary = session.summary();
        *self.game.lock().await = Some(session);

        tracing::info!(tool = "new_game", target_len = summary.target_len, "MCP tool completed");
        json_result(&summary)
    }

    /// Submit a guess in the current game.
    #[tool(
        description = "Guess a word in the current game. Returns its rank (1 = closest), the number of ranked words and a hot/cold tier, or a win."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    async fn guess(
        &self,
        Parameters(params): Parameters<GuessParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "guess", "executing MCP tool");

        let mut game = self.game.lock().await;
        let Some(session) = game.as_mut() else {
            return Ok(no_game());
        };

        match session.submit(&params.word).await {
            Ok(outcome) => {
                tracing::info!(tool = "guess", guesses = session.guess_count(), "MCP tool completed");
                json_result(&outcome)
            }
            Err(err) => game_error(err),
        }
    }

    /// Give up and reveal the word.
    #[tool(
        description = "Give up the current game and reveal the secret word. Only allowed after a minimum number of guesses."
    )]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    async fn give_up(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "give_up", "executing MCP tool");

        let mut game = self.game.lock().await;
        let Some(session) = game.as_mut() else {
            return Ok(no_game());
        };

        match session.give_up() {
            Ok(_) => {
                tracing::info!(tool = "give_up", "MCP tool completed");
                json_result(&session.summary())
            }
            Err(err) => game_error(err),
        }
    }

    /// Guesses so far, closest first.
    #[tool(description = "List the guesses made in the current game, closest first, with the game status.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    async fn guess_history(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "guess_history", "executing MCP tool");

        let game = self.game.lock().await;
        let Some(session) = game.as_ref() else {
            return Ok(no_game());
        };

        #[derive(Serialize)]
        struct History<'a> {
            #[serde(flatten)]
            summary: hotcold_core::GameSummary,
            history: Vec<&'a hotcold_core::GuessData>,
        }

        json_result(&History {
            summary: session.summary(),
            history: session.history_by_rank(),
        })
    }

    /// Temperature tier for a rank.
    #[tool(description = "Classify a rank out of a total into its hot/cold tier and message.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn classify_rank(
        &self,
        Parameters(params): Parameters<ClassifyRankParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "classify_rank", rank = params.rank, total = params.total, "executing MCP tool");

        match feedback::classify(params.rank, params.total) {
            Ok(feedback) => json_result(&feedback),
            Err(err) => Ok(CallToolResult::error(vec![Content::text(err.to_string())])),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Player mistakes become tool errors; everything else is a protocol error.
fn game_error(err: GameError) -> Result<CallToolResult, McpError> {
    if err.is_user_error() {
        tracing::debug!(error = %err, "guess rejected");
        Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
    } else {
        Err(McpError::internal_error(err.to_string(), None))
    }
}

fn no_game() -> CallToolResult {
    CallToolResult::error(vec![Content::text(
        "no game in progress; call new_game first",
    )])
}

#[tool_handler]
impl ServerHandler for GameServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Call new_game, then guess words; lower ranks are closer in meaning to the secret word.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
