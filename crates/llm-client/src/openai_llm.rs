//! OpenAI-compatible [`LlmClient`] implementation over async-openai.

use anyhow::Result;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolArgs, ChatCompletionToolType,
    CreateChatCompletionRequestArgs, FunctionCall, FunctionObjectArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{mask_token, AssistantTurn, ChatMessage, LlmClient, ToolCallRequest, ToolSpec};

/// Chat client for OpenAI-compatible endpoints with native tool calling.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    masked_key: String,
}

impl OpenAILlmClient {
    /// Builds a client for the given API key, base URL, and model.
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        let masked_key = mask_token(&api_key);
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model,
            masked_key,
        }
    }
}

/// Converts one conversation message into the OpenAI request shape.
fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let openai_msg: ChatCompletionRequestMessage = match msg {
        ChatMessage::System { content } => ChatCompletionRequestSystemMessageArgs::default()
            .content(content.clone())
            .build()?
            .into(),
        ChatMessage::User { content } => ChatCompletionRequestUserMessageArgs::default()
            .content(content.clone())
            .build()?
            .into(),
        ChatMessage::Assistant {
            content,
            tool_calls,
        } => {
            let mut args = ChatCompletionRequestAssistantMessageArgs::default();
            args.content(content.clone());
            if !tool_calls.is_empty() {
                args.tool_calls(
                    tool_calls
                        .iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id.clone(),
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name.clone(),
                                arguments: call.arguments.clone(),
                            },
                        })
                        .collect::<Vec<_>>(),
                );
            }
            args.build()?.into()
        }
        ChatMessage::Tool {
            content,
            tool_call_id,
        } => ChatCompletionRequestToolMessageArgs::default()
            .content(content.clone())
            .tool_call_id(tool_call_id.clone())
            .build()?
            .into(),
    };
    Ok(openai_msg)
}

/// Converts a tool spec into the OpenAI tool definition.
fn to_openai_tool(spec: &ToolSpec) -> Result<ChatCompletionTool> {
    let function = FunctionObjectArgs::default()
        .name(spec.name.clone())
        .description(spec.description.clone())
        .parameters(spec.parameters.clone())
        .build()?;
    Ok(ChatCompletionToolArgs::default()
        .r#type(ChatCompletionToolType::Function)
        .function(function)
        .build()?)
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages, tools))]
    async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<AssistantTurn> {
        let openai_messages = messages
            .iter()
            .map(to_openai_message)
            .collect::<Result<Vec<_>>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(self.model.clone()).messages(openai_messages);
        if !tools.is_empty() {
            let tool_defs = tools.iter().map(to_openai_tool).collect::<Result<Vec<_>>>()?;
            builder.tools(tool_defs);
        }
        let request = builder.build()?;

        debug!(
            model = %self.model,
            api_key = %self.masked_key,
            message_count = messages.len(),
            tool_count = tools.len(),
            "Sending chat completion request"
        );

        let response = self.client.chat().create(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Chat completion returned no choices"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCallRequest {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        Ok(AssistantTurn {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
        })
    }
}
